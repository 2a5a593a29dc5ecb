//! Trailing-edge debounce with a single pending slot.
//!
//! Every [`Debouncer::trigger`] aborts the pending timer, if any, and
//! schedules a fresh one. Only the last trigger of a burst fires, one
//! full delay after it arrived.

use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delay used when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` after the delay, replacing any pending one.
    ///
    /// The action runs synchronously once the sleep completes. Abort only
    /// takes effect at an await point, so an action that has started always
    /// runs to completion even if another trigger arrives meanwhile.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });

        let previous = self.slot().replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drop the pending timer without running it.
    pub fn cancel(&self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }

    /// Whether a timer is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.slot()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        // A poisoned slot only ever holds a join handle; reuse it.
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let make = move || {
            let c = Arc::clone(&c);
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (count, make)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_one_run() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let (count, make) = counter();

        for _ in 0..10 {
            debouncer.trigger(make());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // 100ms already elapsed since the last trigger
        tokio::time::sleep(Duration::from_millis(399)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_run_separately() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let (count, make) = counter();

        debouncer.trigger(make());
        tokio::time::sleep(Duration::from_millis(60)).await;
        debouncer.trigger(make());
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let (count, make) = counter();

        debouncer.trigger(make());
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
