use async_trait::async_trait;

use super::auth_model::AuthIdentity;
use crate::errors::Result;

/// Opaque hosted-auth seam: verifies a credential pair and resolves the
/// account identity. Session persistence stays on the provider's side.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> Result<AuthIdentity>;
}
