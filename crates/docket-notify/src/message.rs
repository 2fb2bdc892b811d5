//! # Alert Messages
//!
//! Composes the outbound message listing every alerting record, and the
//! equivalent `mailto:` link.

use serde::Serialize;

use crate::scanner::Alert;

/// Subject line of the alert message.
pub const ALERT_SUBJECT: &str = "Alert: licenses and contracts about to expire";

/// A composed notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl AlertMessage {
    /// Compose the message for `alerts`, one line per record.
    pub fn compose(alerts: &[Alert]) -> Self {
        let lines: Vec<String> = alerts.iter().map(alert_line).collect();
        let body = format!(
            "Greetings,\n\n\
             The following licenses and contracts will expire soon:\n\n\
             {}\n\n\
             Please take the necessary steps to renew them.\n\n\
             Regards,\n\
             License and Contract Management System\n",
            lines.join("\n")
        );
        Self {
            subject: ALERT_SUBJECT.to_string(),
            body,
        }
    }

    /// A `mailto:` link addressed to `recipient` carrying this message.
    ///
    /// Subject and body are percent-encoded; spaces become `%20` rather
    /// than `+`, which mail clients do not decode in `mailto:` links.
    pub fn mailto(&self, recipient: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            encode(&self.subject),
            encode(&self.body)
        )
    }
}

/// `- <name> (No. <number>) - expiry date: <YYYY-MM-DD>`
pub fn alert_line(alert: &Alert) -> String {
    format!(
        "- {} (No. {}) - expiry date: {}",
        alert.name, alert.number, alert.expiry_date
    )
}

fn encode(text: &str) -> String {
    // `+` in the input is already escaped as %2B, so every remaining `+`
    // stands for a space.
    url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
