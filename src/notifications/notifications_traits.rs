use async_trait::async_trait;

use super::notifications_errors::Result;
use super::notifications_model::{NotificationContent, PushMessage};

/// Trait defining the dispatch contract against the hosted push provider.
#[async_trait]
pub trait PushClientTrait: Send + Sync {
    /// Dispatches one message to one device endpoint. Outcomes are
    /// independent per token; implementations must not retry.
    async fn send(&self, message: &PushMessage) -> Result<()>;
}

/// Trait for obtaining a device token from the push provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Requests a token using the fixed client application key.
    async fn request_token(&self, client_key: &str) -> Result<String>;
}

/// OS notification surface the client listeners render through.
pub trait NotificationSink: Send + Sync {
    fn show(&self, content: &NotificationContent);
}

/// Current state of the platform notification permission, as seen by the
/// foreground listener.
pub trait PermissionProbe: Send + Sync {
    fn granted(&self) -> bool;
}
