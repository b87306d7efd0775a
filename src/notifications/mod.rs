// Module declarations
pub(crate) mod fanout_service;
pub(crate) mod listener;
pub(crate) mod notifications_errors;
pub(crate) mod notifications_model;
pub(crate) mod notifications_traits;
pub(crate) mod push_client;
pub(crate) mod registration_service;

// Re-export the public interface
pub use fanout_service::{spawn_transfer_trigger, FanoutService};
pub use listener::{BackgroundListener, ForegroundListener};
pub use notifications_model::{DispatchOutcome, NotificationContent, PushMessage};
pub use push_client::PushClient;
pub use registration_service::TokenRegistrationService;

// Re-export error types for convenience
pub use notifications_errors::NotificationError;
pub use notifications_traits::{NotificationSink, PermissionProbe, PushClientTrait, TokenProvider};
