//! Notification types for the fire-and-forget notification sink.

use serde::{Deserialize, Serialize};

/// Delivery channel for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Email,
    Sms,
    Push,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Email => write!(f, "email"),
            NotificationKind::Sms => write!(f, "sms"),
            NotificationKind::Push => write!(f, "push"),
        }
    }
}

/// A structured event sent to the notification actor. No reply is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: String,
    pub kind: NotificationKind,
    pub body: String,
}

impl Notification {
    pub fn new(
        recipient: impl Into<String>,
        kind: NotificationKind,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            kind,
            body: body.into(),
        }
    }
}
