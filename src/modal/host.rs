use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::options::{ModalOptions, ModalUpdate};
use super::registry::{Dialog, DialogKind};
use super::result::ModalResult;
use super::ModalError;

/// Identifies one show-operation on a [`ModalHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(u64);

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Single-resolution completion slot.
struct CompletionSlot {
    id: ModalId,
    sender: Option<oneshot::Sender<ModalResult>>,
}

impl CompletionSlot {
    fn resolve(&mut self, result: ModalResult) -> Result<(), ModalError> {
        let sender = self
            .sender
            .take()
            .ok_or(ModalError::AlreadyResolved(self.id))?;
        if sender.send(result).is_err() {
            debug!(modal = %self.id, "caller stopped waiting before the dialog closed");
        }
        Ok(())
    }
}

struct OpenModal {
    id: ModalId,
    kind: DialogKind,
    options: ModalOptions,
    revision: u64,
    slot: CompletionSlot,
}

#[derive(Default)]
struct HostState {
    open: Option<OpenModal>,
    next_id: u64,
}

/// Point-in-time copy of the open dialog, used by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSnapshot {
    pub id: ModalId,
    pub kind: DialogKind,
    pub options: ModalOptions,
    /// Incremented on every `update`; a change means the dialog needs a redraw.
    pub revision: u64,
}

/// Owns the single "currently displayed dialog" slot.
///
/// State machine: `Closed -> show -> Open -> close | dismiss -> Closed`, with
/// `update` as a self-loop on `Open`. A second `show` while a dialog is open is
/// rejected with [`ModalError::AlreadyOpen`].
///
/// Cloning yields another handle to the same slot.
#[derive(Clone, Default)]
pub struct ModalHost {
    state: Arc<Mutex<HostState>>,
}

impl ModalHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a dialog of type `D` and returns the eventual result.
    ///
    /// The request is recorded before this returns; awaiting the returned
    /// future does not block the UI thread.
    ///
    /// # Errors
    /// Returns [`ModalError::AlreadyOpen`] if another dialog is still open.
    pub fn show<D: Dialog>(&self, options: ModalOptions) -> Result<PendingResult, ModalError> {
        self.show_kind(D::KIND, options)
    }

    /// Opens a dialog by its kind descriptor.
    ///
    /// # Errors
    /// Returns [`ModalError::AlreadyOpen`] if another dialog is still open.
    pub fn show_kind(
        &self,
        kind: DialogKind,
        options: ModalOptions,
    ) -> Result<PendingResult, ModalError> {
        let mut state = self.state();
        if let Some(open) = &state.open {
            warn!(requested = %kind, open = %open.kind, "rejected show while a dialog is open");
            return Err(ModalError::AlreadyOpen { open: open.kind });
        }

        state.next_id += 1;
        let id = ModalId(state.next_id);
        let (sender, receiver) = oneshot::channel();
        debug!(modal = %id, %kind, title = %options.title, "dialog opened");
        state.open = Some(OpenModal {
            id,
            kind,
            options,
            revision: 0,
            slot: CompletionSlot {
                id,
                sender: Some(sender),
            },
        });

        Ok(PendingResult { id, receiver })
    }

    /// Merges `update` into the live options and marks the dialog for redraw.
    ///
    /// Does nothing when no dialog is open.
    pub fn update(&self, update: Option<ModalUpdate>) {
        self.update_modal(None, update);
    }

    /// Applies `update` if a dialog is open and, when `id` is given, it is
    /// that show-operation.
    fn update_modal(&self, id: Option<ModalId>, update: Option<ModalUpdate>) {
        let mut state = self.state();
        let Some(open) = state
            .open
            .as_mut()
            .filter(|open| id.is_none_or(|id| open.id == id))
        else {
            debug!(modal = ?id, "ignored update for a dialog that is not open");
            return;
        };
        if let Some(update) = update {
            open.options.apply(update);
        }
        open.revision += 1;
    }

    /// Closes the open dialog with a `Cancel` result.
    ///
    /// # Errors
    /// Returns [`ModalError::NotOpen`] if no dialog is open.
    pub fn dismiss(&self) -> Result<(), ModalError> {
        self.close(ModalResult::cancel())
    }

    /// Resolves the open dialog's pending result and unmounts it.
    ///
    /// # Errors
    /// Returns [`ModalError::NotOpen`] if no dialog is open.
    pub fn close(&self, result: ModalResult) -> Result<(), ModalError> {
        let mut state = self.state();
        let mut open = state.open.take().ok_or(ModalError::NotOpen)?;
        debug!(modal = %open.id, kind = %open.kind, result = %result.result_type, "dialog closed");
        open.slot.resolve(result)
    }

    /// Closes the dialog only if `id` is still the open show-operation.
    fn close_modal(&self, id: ModalId, result: ModalResult) -> Result<(), ModalError> {
        let mut state = self.state();
        let open_id = state
            .open
            .as_ref()
            .map(|open| open.id)
            .ok_or(ModalError::NotOpen)?;
        if open_id != id {
            return Err(ModalError::Stale {
                expected: id,
                open: open_id,
            });
        }
        let mut open = state.open.take().ok_or(ModalError::NotOpen)?;
        debug!(modal = %id, kind = %open.kind, result = %result.result_type, "dialog closed itself");
        open.slot.resolve(result)
    }

    pub fn is_open(&self) -> bool {
        self.state().open.is_some()
    }

    pub fn current_id(&self) -> Option<ModalId> {
        self.state().open.as_ref().map(|open| open.id)
    }

    /// A copy of the live options of the open dialog.
    pub fn options(&self) -> Option<ModalOptions> {
        self.state().open.as_ref().map(|open| open.options.clone())
    }

    pub fn snapshot(&self) -> Option<ModalSnapshot> {
        self.state().open.as_ref().map(|open| ModalSnapshot {
            id: open.id,
            kind: open.kind,
            options: open.options.clone(),
            revision: open.revision,
        })
    }

    /// The open dialog's kind and a handle bound to its show-operation, read
    /// together so both describe the same dialog.
    pub fn open_dialog(&self) -> Option<(DialogKind, ModalHandle)> {
        self.state().open.as_ref().map(|open| {
            let handle = ModalHandle {
                host: self.clone(),
                id: open.id,
            };
            (open.kind, handle)
        })
    }
}

/// The eventual result of a `show`.
///
/// Resolves once the dialog is closed. If the host is dropped without
/// closing, the result defaults to `Cancel`.
#[must_use = "the dialog result is only delivered when this future is awaited"]
pub struct PendingResult {
    id: ModalId,
    receiver: oneshot::Receiver<ModalResult>,
}

impl PendingResult {
    pub const fn id(&self) -> ModalId {
        self.id
    }
}

impl Future for PendingResult {
    type Output = ModalResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let id = self.id;
        Pin::new(&mut self.receiver).poll(cx).map(|received| {
            received.unwrap_or_else(|_| {
                warn!(modal = %id, "dialog abandoned without a result, treating as cancel");
                ModalResult::cancel()
            })
        })
    }
}

/// A mounted dialog's view of its host, bound to one show-operation.
///
/// Operations through a handle whose show-operation already ended fail with
/// [`ModalError::NotOpen`] or [`ModalError::Stale`] instead of touching a
/// newer dialog.
#[derive(Clone)]
pub struct ModalHandle {
    host: ModalHost,
    id: ModalId,
}

impl ModalHandle {
    pub const fn id(&self) -> ModalId {
        self.id
    }

    /// The live options, or `None` once this dialog has closed.
    pub fn options(&self) -> Option<ModalOptions> {
        let state = self.host.state();
        state
            .open
            .as_ref()
            .filter(|open| open.id == self.id)
            .map(|open| open.options.clone())
    }

    /// Like [`ModalHost::update`], restricted to this dialog.
    pub fn update(&self, update: Option<ModalUpdate>) {
        self.host.update_modal(Some(self.id), update);
    }

    /// # Errors
    /// Fails if this dialog is no longer open.
    pub fn close(&self, result: ModalResult) -> Result<(), ModalError> {
        self.host.close_modal(self.id, result)
    }

    /// # Errors
    /// Fails if this dialog is no longer open.
    pub fn dismiss(&self) -> Result<(), ModalError> {
        self.close(ModalResult::cancel())
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;
    use serde_json::json;

    use super::*;
    use crate::modal::ModalResultType;

    struct YesNo;

    impl Dialog for YesNo {
        const KIND: DialogKind = DialogKind::new("test-yes-no");
    }

    struct Other;

    impl Dialog for Other {
        const KIND: DialogKind = DialogKind::new("test-other");
    }

    fn handle(host: &ModalHost) -> ModalHandle {
        host.open_dialog().map(|(_, handle)| handle).unwrap()
    }

    #[test]
    fn test_open_dialog_pairs_kind_with_its_show() {
        let host = ModalHost::new();
        assert!(host.open_dialog().is_none());

        let first = host.show::<YesNo>(ModalOptions::new()).unwrap();
        let (kind, handle) = host.open_dialog().unwrap();
        assert_eq!(kind, YesNo::KIND);
        assert_eq!(handle.id(), first.id());

        handle.dismiss().unwrap();
        let second = host.show::<Other>(ModalOptions::new()).unwrap();
        let (kind, handle) = host.open_dialog().unwrap();
        assert_eq!(kind, Other::KIND);
        assert_eq!(handle.id(), second.id());
    }

    #[test]
    fn test_show_does_not_resolve_before_close() {
        let host = ModalHost::new();
        let mut pending = host.show::<YesNo>(ModalOptions::new()).unwrap();

        assert!(host.is_open());
        assert_eq!(host.snapshot().map(|open| open.kind), Some(YesNo::KIND));
        assert!((&mut pending).now_or_never().is_none());

        host.close(ModalResult::ok(Some(json!("done")))).unwrap();
        let result = pending.now_or_never().expect("resolved after close");
        assert_eq!(result, ModalResult::ok(Some(json!("done"))));
        assert!(!host.is_open());
    }

    #[test]
    fn test_dismiss_resolves_cancel_without_data() {
        let host = ModalHost::new();
        let pending = host.show::<YesNo>(ModalOptions::new()).unwrap();

        host.dismiss().unwrap();

        let result = pending.now_or_never().unwrap();
        assert_eq!(result.result_type, ModalResultType::Cancel);
        assert!(result.data.is_none());
    }

    #[test]
    fn test_close_without_open_dialog_fails() {
        let host = ModalHost::new();
        assert_eq!(host.close(ModalResult::cancel()), Err(ModalError::NotOpen));
        assert_eq!(host.dismiss(), Err(ModalError::NotOpen));
    }

    #[test]
    fn test_double_close_fails() {
        let host = ModalHost::new();
        let _pending = host.show::<YesNo>(ModalOptions::new()).unwrap();

        host.close(ModalResult::exit(None)).unwrap();
        assert_eq!(host.close(ModalResult::exit(None)), Err(ModalError::NotOpen));
    }

    #[test]
    fn test_completion_slot_resolves_once() {
        let (sender, _receiver) = oneshot::channel();
        let mut slot = CompletionSlot {
            id: ModalId(7),
            sender: Some(sender),
        };
        assert!(slot.resolve(ModalResult::cancel()).is_ok());
        assert_eq!(
            slot.resolve(ModalResult::cancel()),
            Err(ModalError::AlreadyResolved(ModalId(7)))
        );
    }

    #[test]
    fn test_concurrent_show_is_rejected() {
        let host = ModalHost::new();
        let _pending = host
            .show::<YesNo>(ModalOptions::new().with_title("first"))
            .unwrap();

        let second = host.show::<Other>(ModalOptions::new().with_title("second"));
        assert!(matches!(
            second,
            Err(ModalError::AlreadyOpen { open }) if open == YesNo::KIND
        ));
        assert_eq!(host.options().unwrap().title, "first");
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let host = ModalHost::new();
        let _pending = host
            .show::<YesNo>(
                ModalOptions::new()
                    .with_title("Before")
                    .with_close_button()
                    .with_parameter("Message", "kept"),
            )
            .unwrap();

        host.update(Some(ModalUpdate::new().title("X")));

        let snapshot = host.snapshot().unwrap();
        assert_eq!(snapshot.options.title, "X");
        assert!(snapshot.options.show_close_button);
        assert_eq!(snapshot.options.get_parameter_as_string("Message"), "kept");
        assert_eq!(snapshot.revision, 1);
    }

    #[test]
    fn test_update_without_options_only_bumps_revision() {
        let host = ModalHost::new();
        let _pending = host.show::<YesNo>(ModalOptions::new()).unwrap();

        host.update(None);

        let snapshot = host.snapshot().unwrap();
        assert_eq!(snapshot.options, ModalOptions::new());
        assert_eq!(snapshot.revision, 1);
    }

    #[test]
    fn test_update_on_closed_host_is_noop() {
        let host = ModalHost::new();
        host.update(Some(ModalUpdate::new().title("X")));
        assert!(!host.is_open());
        assert!(host.options().is_none());
    }

    #[test]
    fn test_stale_handle_cannot_close_newer_dialog() {
        let host = ModalHost::new();
        let first = host.show::<YesNo>(ModalOptions::new()).unwrap();
        let stale = handle(&host);
        stale.close(ModalResult::exit(None)).unwrap();
        assert_eq!(first.now_or_never().unwrap().result_type, ModalResultType::Exit);

        let mut second = host.show::<Other>(ModalOptions::new()).unwrap();
        let current = handle(&host);

        assert_eq!(
            stale.close(ModalResult::ok(None)),
            Err(ModalError::Stale {
                expected: stale.id(),
                open: current.id(),
            })
        );
        assert!(stale.options().is_none());
        assert!(host.is_open());
        assert!((&mut second).now_or_never().is_none());

        current.dismiss().unwrap();
        assert_eq!(second.now_or_never().unwrap(), ModalResult::cancel());
        assert_eq!(current.dismiss(), Err(ModalError::NotOpen));
    }

    #[test]
    fn test_dropped_host_resolves_cancel() {
        let host = ModalHost::new();
        let pending = host.show::<YesNo>(ModalOptions::new()).unwrap();
        drop(host);

        assert_eq!(pending.now_or_never().unwrap(), ModalResult::cancel());
    }

    #[tokio::test]
    async fn test_awaiting_caller_resumes_after_close() {
        let host = ModalHost::new();
        let pending = host.show::<YesNo>(ModalOptions::new()).unwrap();
        let caller = tokio::spawn(pending);
        tokio::task::yield_now().await;
        assert!(!caller.is_finished());

        handle(&host)
            .close(ModalResult::ok(Some(json!(42))))
            .unwrap();

        let result = caller.await.unwrap();
        assert_eq!(result.data, Some(json!(42)));
        assert!(!host.is_open());
    }

    #[tokio::test]
    async fn test_sequential_cycles_resolve_independently() {
        let host = ModalHost::new();

        let first = host.show::<YesNo>(ModalOptions::new()).unwrap();
        host.close(ModalResult::exit(None)).unwrap();
        assert!(!host.is_open());

        let second = host.show::<Other>(ModalOptions::new()).unwrap();
        assert_ne!(first.id(), second.id());
        host.close(ModalResult::ok(Some(json!(2)))).unwrap();
        assert!(!host.is_open());

        assert_eq!(first.await.result_type, ModalResultType::Exit);
        assert_eq!(second.await, ModalResult::ok(Some(json!(2))));
    }
}
