use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub toggle_lock: KeyBinding,
    pub index: KeyBinding,
    pub counter: KeyBinding,
    pub fetch_data: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexKeybindings {
    pub exit_confirm: KeyBinding,
    pub fetch_data_dialog: KeyBinding,
    pub counter_dialog: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterKeybindings {
    pub increment: KeyBinding,
    pub decrement: KeyBinding,
    pub submit: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastKeybindings {
    pub reload: KeyBinding,
    pub submit: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub confirm: KeyBinding,
    pub cancel: KeyBinding,
    /// Dismisses dialogs shown with a close button.
    pub close: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub index: IndexKeybindings,
    pub counter: CounterKeybindings,
    pub forecast: ForecastKeybindings,
    pub dialog: DialogKeybindings,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::char('q').into(),
            toggle_lock: Key::char('l').into(),
            index: Key::char('1').into(),
            counter: Key::char('2').into(),
            fetch_data: Key::char('3').into(),
        }
    }
}

impl Default for IndexKeybindings {
    fn default() -> Self {
        Self {
            exit_confirm: Key::char('e').into(),
            fetch_data_dialog: Key::char('f').into(),
            counter_dialog: Key::char('c').into(),
        }
    }
}

impl Default for CounterKeybindings {
    fn default() -> Self {
        Self {
            increment: KeyBinding::multiple(vec![
                Key::char('+'),
                Key::char(' '),
                Key::new(KeyCode::Up),
            ]),
            decrement: KeyBinding::multiple(vec![Key::char('-'), Key::new(KeyCode::Down)]),
            submit: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for ForecastKeybindings {
    fn default() -> Self {
        Self {
            reload: Key::char('r').into(),
            submit: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            confirm: KeyBinding::multiple(vec![
                Key::char('y'),
                Key::char('Y'),
                Key::new(KeyCode::Enter),
            ]),
            cancel: KeyBinding::multiple(vec![Key::char('n'), Key::char('N')]),
            close: Key::new(KeyCode::Esc).into(),
        }
    }
}
