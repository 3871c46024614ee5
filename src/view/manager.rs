use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::modal::{Dialog, ModalError, ModalHost, ModalOptions, PendingResult};

#[derive(Default)]
struct Inner {
    locked: AtomicBool,
    host: ModalHost,
}

/// Session-scoped coordinator every view receives.
///
/// Owns the navigation lock flag and the [`ModalHost`]. The flag is independent
/// of the modal state; callers lock before showing a dialog and unlock after
/// the result arrives.
///
/// Cloning yields another handle to the same session.
#[derive(Clone, Default)]
pub struct ViewManager {
    inner: Arc<Inner>,
}

impl ViewManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks navigation. Idempotent.
    pub fn lock_view(&self) {
        if !self.inner.locked.swap(true, Ordering::SeqCst) {
            debug!("view locked");
        }
    }

    /// Allows navigation again. Idempotent.
    pub fn unlock_view(&self) {
        if self.inner.locked.swap(false, Ordering::SeqCst) {
            debug!("view unlocked");
        }
    }

    pub fn is_locked(&self) -> bool {
        self.inner.locked.load(Ordering::SeqCst)
    }

    /// Locks the view until the returned guard is dropped.
    pub fn lock_scope(&self) -> ViewLock {
        self.lock_view();
        ViewLock {
            manager: self.clone(),
        }
    }

    /// Opens a dialog of type `D` and returns its eventual result.
    ///
    /// The dialog is open once this returns; await the [`PendingResult`] to
    /// suspend until it closes.
    ///
    /// # Errors
    /// Returns [`ModalError::AlreadyOpen`] if another dialog is still open.
    pub fn show_modal_async<D: Dialog>(
        &self,
        options: ModalOptions,
    ) -> Result<PendingResult, ModalError> {
        self.inner.host.show::<D>(options)
    }

    /// The modal host, for the hosting environment that mounts dialogs.
    pub(crate) fn host(&self) -> &ModalHost {
        &self.inner.host
    }
}

/// Keeps the view locked while alive.
#[must_use = "the view unlocks as soon as the guard is dropped"]
pub struct ViewLock {
    manager: ViewManager,
}

impl Drop for ViewLock {
    fn drop(&mut self) {
        self.manager.unlock_view();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::modal::{DialogKind, ModalResult, ModalResultType};

    struct YesNo;

    impl Dialog for YesNo {
        const KIND: DialogKind = DialogKind::new("test-yes-no");
    }

    #[test]
    fn test_lock_is_idempotent() {
        let manager = ViewManager::new();
        assert!(!manager.is_locked());

        manager.lock_view();
        manager.lock_view();
        assert!(manager.is_locked());

        manager.unlock_view();
        manager.unlock_view();
        assert!(!manager.is_locked());
    }

    #[test]
    fn test_lock_independent_of_modal() {
        let manager = ViewManager::new();
        manager.lock_view();
        assert!(!manager.host().is_open());

        let _pending = manager.show_modal_async::<YesNo>(ModalOptions::new()).unwrap();
        manager.unlock_view();
        assert!(manager.host().is_open());
        assert!(!manager.is_locked());
    }

    #[test]
    fn test_lock_scope_unlocks_on_drop() {
        let manager = ViewManager::new();
        {
            let _lock = manager.lock_scope();
            assert!(manager.is_locked());
        }
        assert!(!manager.is_locked());
    }

    #[test]
    fn test_clones_share_state() {
        let manager = ViewManager::new();
        let other = manager.clone();
        other.lock_view();
        assert!(manager.is_locked());
    }

    #[tokio::test]
    async fn test_exit_confirm_scenario() {
        let manager = ViewManager::new();

        let view = {
            let manager = manager.clone();
            tokio::spawn(async move {
                manager.lock_view();
                let options = ModalOptions::new()
                    .with_title("Exit Confirm")
                    .with_parameter("Message", "Try navigating");
                let pending = manager.show_modal_async::<YesNo>(options).unwrap();
                let result = pending.await;
                manager.unlock_view();
                result
            })
        };

        while !manager.host().is_open() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert!(manager.is_locked());

        // The dialog reads its message, the user picks "No".
        let (_, handle) = manager.host().open_dialog().unwrap();
        let options = handle.options().unwrap();
        assert_eq!(options.title, "Exit Confirm");
        assert_eq!(options.get_parameter_as_string("Message"), "Try navigating");
        handle.close(ModalResult::cancel()).unwrap();

        let result = view.await.unwrap();
        assert_eq!(result.result_type, ModalResultType::Cancel);
        assert!(!manager.is_locked());
        assert!(!manager.host().is_open());
    }

    #[tokio::test]
    async fn test_second_show_is_rejected_while_first_pending() {
        let manager = ViewManager::new();
        let first = manager.show_modal_async::<YesNo>(ModalOptions::new()).unwrap();

        let second = manager.show_modal_async::<YesNo>(ModalOptions::new());
        assert!(matches!(second, Err(ModalError::AlreadyOpen { .. })));

        manager
            .host()
            .close(ModalResult::ok(Some(json!("first"))))
            .unwrap();
        assert_eq!(first.await.data, Some(json!("first")));
    }
}
