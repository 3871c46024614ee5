use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{CounterAction, DialogAction, ForecastAction, GlobalAction, IndexAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to actions using the configured bindings.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::ToggleLock => &kb.toggle_lock,
            GlobalAction::Index => &kb.index,
            GlobalAction::Counter => &kb.counter,
            GlobalAction::FetchData => &kb.fetch_data,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    fn index(&self, action: IndexAction) -> &KeyBinding {
        let kb = &self.keybindings.index;
        match action {
            IndexAction::ExitConfirm => &kb.exit_confirm,
            IndexAction::FetchDataDialog => &kb.fetch_data_dialog,
            IndexAction::CounterDialog => &kb.counter_dialog,
        }
    }

    pub fn matches_index(&self, event: &KeyEvent, action: IndexAction) -> bool {
        self.index(action).matches(event)
    }

    pub fn display_index(&self, action: IndexAction) -> String {
        self.index(action).display()
    }

    fn counter(&self, action: CounterAction) -> &KeyBinding {
        let kb = &self.keybindings.counter;
        match action {
            CounterAction::Increment => &kb.increment,
            CounterAction::Decrement => &kb.decrement,
            CounterAction::Submit => &kb.submit,
        }
    }

    pub fn matches_counter(&self, event: &KeyEvent, action: CounterAction) -> bool {
        self.counter(action).matches(event)
    }

    pub fn display_counter(&self, action: CounterAction) -> String {
        self.counter(action).display()
    }

    fn forecast(&self, action: ForecastAction) -> &KeyBinding {
        let kb = &self.keybindings.forecast;
        match action {
            ForecastAction::Reload => &kb.reload,
            ForecastAction::Submit => &kb.submit,
        }
    }

    pub fn matches_forecast(&self, event: &KeyEvent, action: ForecastAction) -> bool {
        self.forecast(action).matches(event)
    }

    pub fn display_forecast(&self, action: ForecastAction) -> String {
        self.forecast(action).display()
    }

    fn dialog(&self, action: DialogAction) -> &KeyBinding {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Confirm => &kb.confirm,
            DialogAction::Cancel => &kb.cancel,
            DialogAction::Close => &kb.close,
        }
    }

    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        self.dialog(action).matches(event)
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        self.dialog(action).display()
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_dialog_bindings() {
        let resolver = KeyResolver::default();
        assert!(resolver.matches_dialog(&key(KeyCode::Char('y')), DialogAction::Confirm));
        assert!(resolver.matches_dialog(&key(KeyCode::Enter), DialogAction::Confirm));
        assert!(resolver.matches_dialog(&key(KeyCode::Char('n')), DialogAction::Cancel));
        assert!(resolver.matches_dialog(&key(KeyCode::Esc), DialogAction::Close));
        assert!(!resolver.matches_dialog(&key(KeyCode::Esc), DialogAction::Cancel));
    }

    #[test]
    fn test_display() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.display_global(GlobalAction::ToggleLock), "l");
        assert_eq!(resolver.display_dialog(DialogAction::Confirm), "y/Y/Enter");
        assert_eq!(resolver.display_counter(CounterAction::Increment), "+/Space/Up");
    }
}
