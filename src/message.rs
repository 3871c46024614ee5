//! Application-level messages.
//!
//! Background tasks (such as a page awaiting a dialog) talk to the [`App`]
//! through these messages; the app processes them between events.
//!
//! [`App`]: crate::app::App

use crate::ui::Toast;

#[derive(Debug, Clone)]
pub enum AppMessage {
    // === Lifecycle ===
    /// Periodic tick for animations and polling
    Tick,
    /// Render the UI
    Render,
    /// Terminal resized
    Resize(u16, u16),
    /// Suspend the application (Ctrl+Z)
    Suspend,
    /// Resume from suspension
    Resume,
    /// Quit the application
    Quit,
    /// Clear and redraw the screen
    ClearScreen,

    // === Feedback ===
    /// Show a toast notification
    Notify(Toast),
}
