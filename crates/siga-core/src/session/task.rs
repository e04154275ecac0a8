//! Lifecycle guard for the single outstanding gateway call.
//!
//! Each submit mints a fresh [`TaskId`]; a completion is applied only if its
//! id is still the active one (`finish_if_active`). Cancelling clears the
//! active id first, so a call that races its own cancellation resolves into
//! a stale id and is discarded.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// State of the in-flight authentication call (mutated only by the reducer).
#[derive(Debug, Default)]
pub struct AuthTask {
    next: u64,
    active: Option<TaskId>,
    cancel: Option<CancellationToken>,
}

impl AuthTask {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Mints a new task id and cancellation token for a fresh gateway call.
    ///
    /// Any previously active call is cancelled first; one call outstanding at
    /// a time.
    pub(crate) fn start(&mut self) -> (TaskId, CancellationToken) {
        self.cancel_and_clear();
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        let token = CancellationToken::new();
        self.active = Some(id);
        self.cancel = Some(token.clone());
        (id, token)
    }

    /// Marks the task finished if `id` is still the active one.
    ///
    /// Returns false for stale completions, which the caller must discard.
    pub(crate) fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    /// Cancels the in-flight call, if any, and forgets it.
    pub(crate) fn cancel_and_clear(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_mints_distinct_ids() {
        let mut task = AuthTask::default();
        let (first, _) = task.start();
        let (second, _) = task.start();
        assert_ne!(first, second);
        assert!(task.is_running());
    }

    #[test]
    fn test_finish_if_active_rejects_stale_id() {
        let mut task = AuthTask::default();
        let (stale, _) = task.start();
        let (current, _) = task.start();

        assert!(!task.finish_if_active(stale));
        assert!(task.is_running());
        assert!(task.finish_if_active(current));
        assert!(!task.is_running());
    }

    #[test]
    fn test_cancel_and_clear_cancels_token() {
        let mut task = AuthTask::default();
        let (_, token) = task.start();
        task.cancel_and_clear();
        assert!(token.is_cancelled());
        assert!(!task.is_running());
    }
}
