use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A one-shot action scheduled to run after a fixed delay.
///
/// The original UI leaned on bare timeouts for its "reload in a second" and
/// "restore the button in three seconds" behaviors; modelling them as an
/// owned handle lets callers cancel the action and lets tests distinguish
/// scheduled from fired without waiting on the wall clock.
#[derive(Debug)]
pub struct Deferred {
    handle: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

impl Deferred {
    /// Schedules `action` to run once after `delay` on the current runtime.
    pub fn spawn<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        // Anchor the deadline now, not at the task's first poll, so the
        // delay counts from the moment the action was scheduled.
        let sleep = tokio::time::sleep(delay);
        let handle = tokio::spawn(async move {
            sleep.await;
            flag.store(true, Ordering::SeqCst);
            action();
        });
        Self { handle, fired }
    }

    /// Cancels the action if it has not fired yet; firing after a cancel is
    /// impossible, cancelling after the fire is a no-op.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// True while the action is still scheduled. Dropping the handle does
    /// not cancel the action; like any detached task it fires on schedule.
    pub fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }
}
