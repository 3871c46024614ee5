pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::*;
pub use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Frames per second.
    pub frame_rate: f64,
    /// Ticks per second, drives spinners and polling.
    pub tick_rate: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            tick_rate: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crossterm::event::KeyCode;

    use super::*;
    use crate::config::key::{Key, KeyBinding};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme.name, "Catppuccin Mocha");
        assert!((config.ui.frame_rate - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.keybindings.global.quit, KeyBinding::from(Key::char('q')));
    }

    #[test]
    fn test_partial_keybindings_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [ui]
            tick_rate = 10.0

            [keybindings.dialog]
            close = "q"
            "#,
        )
        .unwrap();

        assert!((config.ui.tick_rate - 10.0).abs() < f64::EPSILON);
        assert!((config.ui.frame_rate - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.keybindings.dialog.close, KeyBinding::from(Key::char('q')));
        assert_eq!(
            config.keybindings.dialog.cancel,
            KeyBinding::multiple(vec![Key::char('n'), Key::char('N')])
        );
        assert_eq!(
            config.keybindings.counter.submit,
            KeyBinding::from(Key::new(KeyCode::Enter))
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = loader::load_from(Path::new("/nonexistent/lazyview/config.toml")).unwrap();
        assert_eq!(config.theme.name, "Catppuccin Mocha");
    }
}
