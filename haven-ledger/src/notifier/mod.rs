//! Notification seam between the ledger and the external dispatcher.
//!
//! The ledger decides *when* an event is emitted; formatting and delivery are
//! someone else's job. A failed notification never fails the interaction.
use async_trait::async_trait;
use haven_shared::types::Notification;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification channel closed")]
    ChannelClosed,
}

/// Receives notification events emitted by the ledger.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Logs every event; used when no dispatcher is attached.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notify for TracingNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        tracing::info!(
            kind = notification.kind.as_str(),
            recipient = %notification.recipient_id,
            source = %notification.source_id,
            object = %notification.object_id,
            "notification emitted"
        );
        Ok(())
    }
}

/// Forwards events into a bounded channel drained by an external dispatcher.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiving half of its channel.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Channel capacity; `notify` waits while it is full.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (sender, receiver) = mpsc::channel(buffer);
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notify for ChannelNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sender
            .send(notification)
            .await
            .map_err(|_| NotifyError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use haven_shared::types::NotificationKind;
    use uuid::Uuid;

    use super::*;

    fn notification() -> Notification {
        Notification {
            kind: NotificationKind::ResourceLiked,
            recipient_id: Uuid::new_v4(),
            source_id: Uuid::new_v4(),
            object_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_channel_notifier_forwards() {
        let (notifier, mut receiver) = ChannelNotifier::new(4);
        let sent = notification();
        notifier.notify(sent.clone()).await.unwrap();
        assert_eq!(receiver.recv().await, Some(sent));
    }

    #[tokio::test]
    async fn test_channel_notifier_reports_closed_channel() {
        let (notifier, receiver) = ChannelNotifier::new(1);
        drop(receiver);
        let err = notifier.notify(notification()).await.unwrap_err();
        assert!(matches!(err, NotifyError::ChannelClosed));
    }
}
