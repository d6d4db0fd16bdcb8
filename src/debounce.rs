//! Debounced value emission over a channel.
//!
//! # Contract
//!
//! [`Debouncer::schedule`] arms a timer for the given value; if another
//! `schedule` arrives before the idle window elapses, the previous timer is
//! aborted and only the newer value can ever be emitted. Once the window
//! passes quietly, the value is sent into the channel. [`Debouncer::cancel`]
//! aborts the pending timer so nothing fires after teardown.
//!
//! Only the last value of a burst is emitted; intermediate values never
//! are. The list controller routes raw search keystrokes through this and
//! treats each emission as a committed filter (always loading page 1).
//!
//! Timers run on the Tokio clock, so tests drive them deterministically
//! with `start_paused` and `tokio::time::advance`.

use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Idle window after the last keystroke before a search is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct Debouncer<V: Send + 'static> {
    window: Duration,
    sender: mpsc::Sender<V>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<V: Send + 'static> Debouncer<V> {
    pub fn new(window: Duration, sender: mpsc::Sender<V>) -> Self {
        Self {
            window,
            sender,
            pending: Mutex::new(None),
        }
    }

    /// Arms the timer for `value`, superseding any pending emission.
    pub fn schedule(&self, value: V) {
        let sender = self.sender.clone();
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Receiver gone means the controller shut down; drop quietly.
            let _ = sender.send(value).await;
        });

        let mut pending = self.pending.lock().unwrap();
        if let Some(old) = pending.replace(handle) {
            debug!("Superseding pending emission");
            old.abort();
        }
    }

    /// Aborts the pending timer, if any. Nothing is emitted afterwards
    /// until the next `schedule`.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().unwrap().take() {
            debug!("Cancelling pending emission");
            handle.abort();
        }
    }
}

impl<V: Send + 'static> Drop for Debouncer<V> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    fn debouncer(window_ms: u64) -> (Debouncer<String>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(8);
        (Debouncer::new(Duration::from_millis(window_ms), tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_emits_only_the_last_value() {
        let (debouncer, mut rx) = debouncer(300);

        for term in ["a", "ap", "app"] {
            debouncer.schedule(term.to_string());
            advance(Duration::from_millis(100)).await;
        }
        advance(Duration::from_millis(300)).await;

        assert_eq!(rx.recv().await.as_deref(), Some("app"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_window_emits_the_scheduled_value() {
        let (debouncer, mut rx) = debouncer(300);

        debouncer.schedule("deck".to_string());
        advance(Duration::from_millis(301)).await;

        assert_eq!(rx.recv().await.as_deref(), Some("deck"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_the_pending_emission() {
        let (debouncer, mut rx) = debouncer(300);

        debouncer.schedule("never".to_string());
        advance(Duration::from_millis(150)).await;
        debouncer.cancel();
        advance(Duration::from_millis(600)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn scheduling_after_cancel_works_again() {
        let (debouncer, mut rx) = debouncer(300);

        debouncer.schedule("first".to_string());
        debouncer.cancel();
        debouncer.schedule("second".to_string());
        advance(Duration::from_millis(301)).await;

        assert_eq!(rx.recv().await.as_deref(), Some("second"));
        assert!(rx.try_recv().is_err());
    }
}
