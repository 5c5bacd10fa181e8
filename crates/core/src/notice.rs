//! Transient user notifications

use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Broadcast channel for notices; sending never fails when nobody listens
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn send(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(Notice::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(Notice::error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_notices() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.success("Task created successfully!");
        notifier.error("Error deleting task!");

        assert_eq!(rx.recv().await.unwrap(), Notice::success("Task created successfully!"));
        assert!(rx.recv().await.unwrap().is_error());
    }

    #[test]
    fn test_send_without_subscribers() {
        Notifier::new().error("nobody listening");
    }
}
