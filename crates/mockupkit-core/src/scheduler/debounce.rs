//! Debounced notifications.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

type Action = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Pending {
    /// Sequence number of the armed trigger, if any.
    armed: Option<u64>,
    next_seq: u64,
    task: Option<JoinHandle<()>>,
}

/// Runs an action once a burst of triggers has been quiet for `delay`.
///
/// Each `trigger` restarts the window. Dropping the debouncer cancels a
/// pending run, so the action never fires against a disposed owner.
/// Without a tokio runtime the action runs immediately on trigger.
pub struct Debouncer {
    delay: Duration,
    action: Action,
    pending: Arc<Mutex<Pending>>,
}

impl Debouncer {
    /// Create a debouncer for `action`
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            delay,
            action: Arc::new(action),
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    /// Quiet window
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the action
    pub fn trigger(&self) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                tracing::trace!("No runtime; firing debounced action immediately");
                self.cancel();
                (self.action)();
                return;
            }
        };

        let mut pending = self.pending.lock();
        if let Some(task) = pending.task.take() {
            task.abort();
        }
        pending.next_seq += 1;
        let seq = pending.next_seq;
        pending.armed = Some(seq);

        let shared = Arc::clone(&self.pending);
        let action = Arc::clone(&self.action);
        let delay = self.delay;
        pending.task = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let fire = {
                let mut pending = shared.lock();
                if pending.armed == Some(seq) {
                    pending.armed = None;
                    pending.task = None;
                    true
                } else {
                    false
                }
            };
            if fire {
                action();
            }
        }));
    }

    /// Run a pending action now
    ///
    /// Returns true if an action was pending.
    pub fn flush(&self) -> bool {
        if self.disarm() {
            (self.action)();
            true
        } else {
            false
        }
    }

    /// Drop a pending action without running it
    ///
    /// Returns true if an action was pending.
    pub fn cancel(&self) -> bool {
        let cancelled = self.disarm();
        if cancelled {
            tracing::debug!("Debounced action cancelled");
        }
        cancelled
    }

    /// Check if an action is waiting for its window to close
    pub fn is_pending(&self) -> bool {
        self.pending.lock().armed.is_some()
    }

    fn disarm(&self) -> bool {
        let mut pending = self.pending.lock();
        if let Some(task) = pending.task.take() {
            task.abort();
        }
        pending.armed.take().is_some()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
