//! Awaitable modal dialogs.
//!
//! A view asks the [`ModalHost`] (through the [`ViewManager`]) to show a
//! dialog of some [`Dialog`] kind. The host records the request and hands back
//! a [`PendingResult`] future. The hosting environment notices the open
//! request, mounts the dialog through the [`DialogRegistry`], and the dialog
//! eventually closes itself through its [`ModalHandle`], which resolves the
//! caller's future exactly once.
//!
//! [`ViewManager`]: crate::view::ViewManager
//! [`ModalHandle`]: host::ModalHandle

mod frame;
mod host;
mod options;
mod registry;
mod result;

pub use frame::ModalFrame;
pub use host::{ModalHost, ModalId, PendingResult};
pub use options::{MODAL_BODY_CSS_PARAM, MODAL_CSS_PARAM, ModalOptions};
pub use registry::{Dialog, DialogContext, DialogKind, DialogProvider, DialogRegistry, DialogView};
pub use result::{ModalResult, ModalResultType};

/// Misuse of the show/close protocol or a dialog configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    #[error("a '{open}' dialog is already open")]
    AlreadyOpen { open: DialogKind },

    #[error("no dialog is open")]
    NotOpen,

    #[error("dialog {expected} is no longer open (dialog {open} is)")]
    Stale { expected: ModalId, open: ModalId },

    #[error("result for dialog {0} was already delivered")]
    AlreadyResolved(ModalId),

    #[error("no dialog registered for kind '{0}'")]
    UnregisteredDialog(DialogKind),
}
