//! User-visible notifications.
//!
//! Controllers report recoverable failures (and mutation successes) here;
//! the view binder drains the receiver and renders them however it likes.
//! Discarded stale responses never show up - they are an expected
//! concurrency outcome, not an error.

use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A non-blocking, user-facing notice: a short headline plus detail text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: &'static str,
    pub description: String,
}

impl Notification {
    pub fn success(message: &'static str, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message,
            description: description.into(),
        }
    }

    pub fn error(message: &'static str, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message,
            description: description.into(),
        }
    }
}

/// Cloneable sender half handed to every controller.
///
/// Sending never blocks and never fails loudly: if the view side is gone,
/// notifications drop harmlessly.
#[derive(Clone)]
pub struct NotificationSink {
    sender: mpsc::UnboundedSender<Notification>,
}

impl NotificationSink {
    pub fn push(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            debug!("Notification receiver gone; dropping");
        }
    }
}

/// Creates the sink/receiver pair wiring controllers to the view binder.
pub fn channel() -> (NotificationSink, mpsc::UnboundedReceiver<Notification>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (NotificationSink { sender }, receiver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notifications_arrive_in_order() {
        let (sink, mut rx) = channel();
        sink.push(Notification::error("Load failed", "Could not fetch products"));
        sink.push(Notification::success("Saved", "Product created"));

        assert_eq!(rx.recv().await.unwrap().kind, NotificationKind::Error);
        assert_eq!(rx.recv().await.unwrap().kind, NotificationKind::Success);
    }

    #[test]
    fn dropped_receiver_is_tolerated() {
        let (sink, rx) = channel();
        drop(rx);
        sink.push(Notification::success("Saved", "nobody listening"));
    }
}
