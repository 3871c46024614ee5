use std::fmt;

use serde::{Deserialize, Serialize};

use super::options::ParamValue;

/// Closed set of dialog outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalResultType {
    Ok,
    Cancel,
    Exit,
    #[default]
    Unset,
}

impl fmt::Display for ModalResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "OK",
            Self::Cancel => "Cancel",
            Self::Exit => "Exit",
            Self::Unset => "Unset",
        };
        f.write_str(name)
    }
}

/// Outcome of one dialog interaction, consumed once by the awaiting caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalResult {
    pub result_type: ModalResultType,
    pub data: Option<ParamValue>,
}

impl ModalResult {
    pub const fn new(result_type: ModalResultType, data: Option<ParamValue>) -> Self {
        Self { result_type, data }
    }

    pub const fn ok(data: Option<ParamValue>) -> Self {
        Self::new(ModalResultType::Ok, data)
    }

    pub const fn cancel() -> Self {
        Self::new(ModalResultType::Cancel, None)
    }

    pub const fn exit(data: Option<ParamValue>) -> Self {
        Self::new(ModalResultType::Exit, data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(ModalResult::ok(Some(json!(5))).result_type, ModalResultType::Ok);
        assert_eq!(ModalResult::ok(Some(json!(5))).data, Some(json!(5)));

        let cancel = ModalResult::cancel();
        assert_eq!(cancel.result_type, ModalResultType::Cancel);
        assert!(cancel.data.is_none());

        assert_eq!(ModalResult::exit(None).result_type, ModalResultType::Exit);
    }

    #[test]
    fn test_default_is_unset() {
        assert_eq!(ModalResult::default().result_type, ModalResultType::Unset);
    }

    #[test]
    fn test_result_type_display() {
        assert_eq!(ModalResultType::Ok.to_string(), "OK");
        assert_eq!(ModalResultType::Cancel.to_string(), "Cancel");
    }
}
