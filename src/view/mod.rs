//! The view contract shared by pages and dialogs.
//!
//! Every mountable view carries a [`ViewContext`]: a per-instance [`ViewId`]
//! and the session's [`ViewManager`]. The hosting environment creates the
//! context when it mounts the view; views never look the manager up
//! themselves.

mod manager;

use std::fmt;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use uuid::Uuid;

pub use manager::ViewManager;

use crate::Theme;
use crate::config::KeyResolver;
use crate::ui::{EventResult, Keybinding, Result};

/// Identity of one mounted view instance.
///
/// Only meant for diagnostics and equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "{}", &simple[..8])
    }
}

/// Context injected into a view at mount time.
#[derive(Clone)]
pub struct ViewContext {
    id: ViewId,
    manager: ViewManager,
    resolver: Arc<KeyResolver>,
}

impl ViewContext {
    /// Creates the context for a newly mounted view with a fresh identity.
    pub fn new(manager: &ViewManager, resolver: Arc<KeyResolver>) -> Self {
        Self {
            id: ViewId::generate(),
            manager: manager.clone(),
            resolver,
        }
    }

    pub const fn id(&self) -> ViewId {
        self.id
    }

    pub const fn manager(&self) -> &ViewManager {
        &self.manager
    }

    pub const fn resolver(&self) -> &Arc<KeyResolver> {
        &self.resolver
    }
}

impl fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("id", &self.id)
            .field("locked", &self.manager.is_locked())
            .finish_non_exhaustive()
    }
}

/// Anything the hosting environment can mount.
pub trait View {
    /// The context supplied at mount time.
    fn context(&self) -> &ViewContext;

    fn id(&self) -> ViewId {
        self.context().id()
    }

    fn manager(&self) -> &ViewManager {
        self.context().manager()
    }
}

/// A full-page view taking part in navigation.
pub trait Page: View {
    /// Title shown in the status bar.
    fn title(&self) -> &'static str;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for animations and polling.
    fn handle_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Keybindings shown in the status bar while this page is active.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingsConfig;

    fn resolver() -> Arc<KeyResolver> {
        Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())))
    }

    #[test]
    fn test_view_ids_are_unique() {
        let manager = ViewManager::new();
        let a = ViewContext::new(&manager, resolver());
        let b = ViewContext::new(&manager, resolver());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn test_contexts_share_manager() {
        let manager = ViewManager::new();
        let page = ViewContext::new(&manager, resolver());
        let dialog = ViewContext::new(page.manager(), resolver());

        assert_ne!(page.id(), dialog.id());
        dialog.manager().lock_view();
        assert!(page.manager().is_locked());
        assert!(manager.is_locked());
    }

    #[test]
    fn test_view_id_display_is_short() {
        let manager = ViewManager::new();
        let ctx = ViewContext::new(&manager, resolver());
        assert_eq!(ctx.id().to_string().len(), 8);
    }
}
