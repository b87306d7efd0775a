use serde::{Deserialize, Serialize};

use crate::constants::TRANSFER_NOTIFICATION_TITLE;

/// Rendered part of a push message, shared by the producer and both client
/// listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    /// Read by the listeners but never populated by the fan-out trigger,
    /// so it stays off the wire entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One token-addressed message handed to the push provider:
/// `{ token, notification: { title, body } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    pub token: String,
    pub notification: NotificationContent,
}

impl PushMessage {
    /// Builds the new-transfer notification for one admin token.
    pub fn transfer_created(token: impl Into<String>, plate: &str) -> Self {
        Self {
            token: token.into(),
            notification: NotificationContent {
                title: TRANSFER_NOTIFICATION_TITLE.to_string(),
                body: format!("Placa: {}", plate),
                icon: None,
            },
        }
    }
}

/// Outcome of one token's dispatch attempt. The fan-out returns these so a
/// caller could act on failures; the built-in trigger only logs them.
#[derive(Debug)]
pub enum DispatchOutcome {
    Delivered { token: String },
    Failed { token: String, reason: String },
}

impl DispatchOutcome {
    pub fn token(&self) -> &str {
        match self {
            DispatchOutcome::Delivered { token } => token,
            DispatchOutcome::Failed { token, .. } => token,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered { .. })
    }
}
