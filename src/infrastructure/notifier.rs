use crate::domain::ports::{Notification, Notifier};
use crate::error::Result;
use async_trait::async_trait;

/// Notifier used when no mail transport is configured: the message is
/// logged and reported as delivered.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "Mail transport not configured, skipping delivery"
        );
        Ok(())
    }
}
