// Module declarations
pub(crate) mod auth_model;
pub(crate) mod auth_service;
pub(crate) mod auth_traits;

// Re-export the public interface
pub use auth_model::{AuthIdentity, Credentials, Session};
pub use auth_service::AuthService;
pub use auth_traits::CredentialVerifier;
