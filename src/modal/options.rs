//! Presentation options for a single dialog invocation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Arbitrary value stored in the parameter bag.
pub type ParamValue = serde_json::Value;

/// Parameter key the sample callers use to pass the dialog size class.
pub const MODAL_CSS_PARAM: &str = "ModalCSS";

/// Parameter key the sample callers use to pass the dialog body class.
pub const MODAL_BODY_CSS_PARAM: &str = "ModalBodyCSS";

/// How a dialog should be presented.
///
/// Built by the calling view for one `show` and handed to the mounted dialog.
/// While the dialog is open it can be patched with [`ModalUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalOptions {
    pub title: String,
    pub hide_header: bool,
    pub show_close_button: bool,
    pub modal_css_class: String,
    pub modal_body_css_class: String,
    pub parameters: HashMap<String, ParamValue>,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            hide_header: true,
            show_close_button: false,
            modal_css_class: String::new(),
            modal_body_css_class: String::new(),
            parameters: HashMap::new(),
        }
    }
}

impl ModalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Shows the header (title bar). Headers are hidden by default.
    #[must_use]
    pub const fn with_header(mut self) -> Self {
        self.hide_header = false;
        self
    }

    #[must_use]
    pub const fn with_close_button(mut self) -> Self {
        self.show_close_button = true;
        self
    }

    #[must_use]
    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.modal_css_class = class.into();
        self
    }

    #[must_use]
    pub fn with_body_css_class(mut self, class: impl Into<String>) -> Self {
        self.modal_body_css_class = class.into();
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set_parameter(key, value);
        self
    }

    /// Inserts a parameter, replacing any previous value under the same key.
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.parameters.insert(key.into(), value.into());
    }

    pub fn parameter(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }

    /// Returns the parameter rendered as text, or an empty string if absent.
    ///
    /// Strings are returned without quotes, `null` maps to an empty string and
    /// any other value uses its JSON representation.
    pub fn get_parameter_as_string(&self, key: &str) -> String {
        match self.parameters.get(key) {
            None | Some(ParamValue::Null) => String::new(),
            Some(ParamValue::String(value)) => value.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// The dialog size class, falling back to the `ModalCSS` parameter.
    pub fn effective_css_class(&self) -> String {
        if self.modal_css_class.is_empty() {
            self.get_parameter_as_string(MODAL_CSS_PARAM)
        } else {
            self.modal_css_class.clone()
        }
    }

    /// The dialog body class, falling back to the `ModalBodyCSS` parameter.
    pub fn effective_body_css_class(&self) -> String {
        if self.modal_body_css_class.is_empty() {
            self.get_parameter_as_string(MODAL_BODY_CSS_PARAM)
        } else {
            self.modal_body_css_class.clone()
        }
    }

    /// Applies a patch field by field. Parameters are merged key by key.
    pub fn apply(&mut self, update: ModalUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(hide_header) = update.hide_header {
            self.hide_header = hide_header;
        }
        if let Some(show_close_button) = update.show_close_button {
            self.show_close_button = show_close_button;
        }
        if let Some(class) = update.modal_css_class {
            self.modal_css_class = class;
        }
        if let Some(class) = update.modal_body_css_class {
            self.modal_body_css_class = class;
        }
        self.parameters.extend(update.parameters);
    }
}

/// Partial [`ModalOptions`]; `None` fields keep the live value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalUpdate {
    pub title: Option<String>,
    pub hide_header: Option<bool>,
    pub show_close_button: Option<bool>,
    pub modal_css_class: Option<String>,
    pub modal_body_css_class: Option<String>,
    pub parameters: HashMap<String, ParamValue>,
}

impl ModalUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn hide_header(mut self, hide: bool) -> Self {
        self.hide_header = Some(hide);
        self
    }

    #[must_use]
    pub const fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = Some(show);
        self
    }

    #[must_use]
    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.modal_css_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn body_css_class(mut self, class: impl Into<String>) -> Self {
        self.modal_body_css_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

impl From<ModalOptions> for ModalUpdate {
    fn from(options: ModalOptions) -> Self {
        Self {
            title: Some(options.title),
            hide_header: Some(options.hide_header),
            show_close_button: Some(options.show_close_button),
            modal_css_class: Some(options.modal_css_class),
            modal_body_css_class: Some(options.modal_body_css_class),
            parameters: options.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = ModalOptions::default();
        assert_eq!(options.title, "");
        assert!(options.hide_header);
        assert!(!options.show_close_button);
        assert!(options.modal_css_class.is_empty());
        assert!(options.modal_body_css_class.is_empty());
        assert!(options.parameters.is_empty());
    }

    #[test]
    fn test_missing_parameter_is_empty() {
        let options = ModalOptions::new().with_parameter("Message", "hello");
        assert_eq!(options.get_parameter_as_string("missing"), "");
        assert!(options.parameter("missing").is_none());
    }

    #[test]
    fn test_parameter_as_string() {
        let options = ModalOptions::new()
            .with_parameter("Message", "Try navigating")
            .with_parameter("Count", 3)
            .with_parameter("Flag", true)
            .with_parameter("Nothing", ParamValue::Null);

        assert_eq!(options.get_parameter_as_string("Message"), "Try navigating");
        assert_eq!(options.get_parameter_as_string("Count"), "3");
        assert_eq!(options.get_parameter_as_string("Flag"), "true");
        assert_eq!(options.get_parameter_as_string("Nothing"), "");
    }

    #[test]
    fn test_last_write_wins() {
        let mut options = ModalOptions::new().with_parameter("Message", "first");
        options.set_parameter("Message", "second");
        assert_eq!(options.parameters.len(), 1);
        assert_eq!(options.get_parameter_as_string("Message"), "second");
    }

    #[test]
    fn test_apply_title_only() {
        let mut options = ModalOptions::new()
            .with_title("Before")
            .with_header()
            .with_css_class("modal-xl")
            .with_parameter("Message", "kept");

        options.apply(ModalUpdate::new().title("X"));

        assert_eq!(options.title, "X");
        assert!(!options.hide_header);
        assert_eq!(options.modal_css_class, "modal-xl");
        assert_eq!(options.get_parameter_as_string("Message"), "kept");
    }

    #[test]
    fn test_apply_merges_parameters() {
        let mut options = ModalOptions::new()
            .with_parameter("A", 1)
            .with_parameter("B", 2);

        options.apply(ModalUpdate::new().parameter("B", 20).parameter("C", 30));

        assert_eq!(options.parameter("A"), Some(&json!(1)));
        assert_eq!(options.parameter("B"), Some(&json!(20)));
        assert_eq!(options.parameter("C"), Some(&json!(30)));
    }

    #[test]
    fn test_effective_css_falls_back_to_parameters() {
        let options = ModalOptions::new()
            .with_parameter(MODAL_CSS_PARAM, "modal-xl")
            .with_parameter(MODAL_BODY_CSS_PARAM, "p-0");
        assert_eq!(options.effective_css_class(), "modal-xl");
        assert_eq!(options.effective_body_css_class(), "p-0");

        let options = options.with_css_class("modal-sm");
        assert_eq!(options.effective_css_class(), "modal-sm");
    }
}
