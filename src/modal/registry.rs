use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use super::ModalError;
use super::host::ModalHandle;
use crate::Theme;
use crate::config::KeyResolver;
use crate::ui::{EventResult, Keybinding, Result};
use crate::view::{View, ViewContext, ViewManager};

/// Type descriptor of a dialog, used to look up how to mount it.
///
/// # Example
///
/// ```rust,ignore
/// use crate::modal::DialogKind;
///
/// let kind = DialogKind::new("yes-no");
/// assert_eq!(kind.to_string(), "yes-no");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogKind(&'static str);

impl DialogKind {
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Type token for a dialog that can be shown with `show::<D>()`.
pub trait Dialog {
    const KIND: DialogKind;
}

/// Everything a dialog receives when it is mounted.
pub struct DialogContext {
    pub view: ViewContext,
    pub modal: ModalHandle,
}

impl DialogContext {
    pub const fn new(view: ViewContext, modal: ModalHandle) -> Self {
        Self { view, modal }
    }

    pub const fn resolver(&self) -> &Arc<KeyResolver> {
        self.view.resolver()
    }
}

/// A mounted dialog instance.
///
/// Dialogs capture all input while open and end the interaction by closing
/// their [`ModalHandle`].
pub trait DialogView: View {
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>>;

    fn handle_tick(&mut self) {}

    /// Render the dialog body; the surrounding frame is drawn by the host.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}

/// Mounts dialogs of one kind.
///
/// Implement this to make a dialog available to the [`DialogRegistry`].
pub trait DialogProvider: Send + Sync {
    fn kind(&self) -> DialogKind;

    /// Human-readable name (e.g., "Yes / No").
    fn display_name(&self) -> &'static str;

    /// Create a new dialog instance for the given context.
    fn mount(&self, ctx: DialogContext) -> Box<dyn DialogView>;
}

/// Registry of dialogs the hosting environment can mount.
pub struct DialogRegistry {
    providers: HashMap<DialogKind, Arc<dyn DialogProvider>>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a dialog provider.
    ///
    /// If a provider for the same kind already exists, it will be replaced.
    pub fn register<P: DialogProvider + 'static>(&mut self, provider: P) {
        self.providers.insert(provider.kind(), Arc::new(provider));
    }

    pub fn get(&self, kind: DialogKind) -> Option<Arc<dyn DialogProvider>> {
        self.providers.get(&kind).cloned()
    }

    /// All registered kinds, sorted.
    pub fn kinds(&self) -> Vec<DialogKind> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Mount the dialog that is currently open on the manager's host.
    ///
    /// Returns `Ok(None)` when no dialog is open.
    ///
    /// # Errors
    /// Returns [`ModalError::UnregisteredDialog`] if the open kind has no provider.
    pub fn mount_open(
        &self,
        manager: &ViewManager,
        resolver: Arc<KeyResolver>,
    ) -> std::result::Result<Option<Box<dyn DialogView>>, ModalError> {
        let Some((kind, handle)) = manager.host().open_dialog() else {
            return Ok(None);
        };
        let provider = self.get(kind).ok_or(ModalError::UnregisteredDialog(kind))?;
        let ctx = DialogContext::new(ViewContext::new(manager, resolver), handle);
        Ok(Some(provider.mount(ctx)))
    }
}

impl Default for DialogRegistry {
    fn default() -> Self {
        Self::new()
    }
}
