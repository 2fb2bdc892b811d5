//! # Notification Senders
//!
//! A [`NotificationSender`] delivers a composed message. Delivery is
//! fire-and-forget from the scanner's point of view: [`dispatch`] logs a
//! failure and reports it to the caller, but nothing about the scan or its
//! marker depends on the outcome.

use parking_lot::Mutex;

use crate::error::SendError;
use crate::message::AlertMessage;

/// Delivers alert messages.
pub trait NotificationSender: Send + Sync {
    /// Deliver `message` to `recipient`.
    fn send(&self, recipient: &str, message: &AlertMessage) -> Result<(), SendError>;
}

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSender;

impl NotificationSender for LogSender {
    fn send(&self, recipient: &str, message: &AlertMessage) -> Result<(), SendError> {
        tracing::info!(
            recipient,
            subject = %message.subject,
            mailto = %message.mailto(recipient),
            "alert notification"
        );
        Ok(())
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Mutex<Vec<(String, AlertMessage)>>,
}

impl Outbox {
    /// An empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, with their recipients.
    pub fn sent(&self) -> Vec<(String, AlertMessage)> {
        self.sent.lock().clone()
    }
}

impl NotificationSender for Outbox {
    fn send(&self, recipient: &str, message: &AlertMessage) -> Result<(), SendError> {
        self.sent.lock().push((recipient.to_string(), message.clone()));
        Ok(())
    }
}

/// Send through `sender`, logging and counting the outcome.
///
/// Returns whether the message was delivered.
pub fn dispatch(sender: &dyn NotificationSender, recipient: &str, message: &AlertMessage) -> bool {
    match sender.send(recipient, message) {
        Ok(()) => {
            metrics::counter!(crate::METRIC_NOTIFICATIONS_SENT).increment(1);
            tracing::info!(recipient, "alert notification sent");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "alert notification failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl NotificationSender for Failing {
        fn send(&self, recipient: &str, _message: &AlertMessage) -> Result<(), SendError> {
            Err(SendError {
                recipient: recipient.to_string(),
                reason: "smtp unavailable".to_string(),
            })
        }
    }

    #[test]
    fn outbox_records_messages() {
        let outbox = Outbox::new();
        let msg = AlertMessage::compose(&[]);
        assert!(dispatch(&outbox, "ops@example.com", &msg));
        let sent = outbox.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ops@example.com");
    }

    #[test]
    fn failure_is_reported_not_propagated() {
        let msg = AlertMessage::compose(&[]);
        assert!(!dispatch(&Failing, "ops@example.com", &msg));
        assert!(LogSender.send("ops@example.com", &msg).is_ok());
    }
}
