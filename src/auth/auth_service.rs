use log::debug;
use std::sync::Arc;

use super::auth_model::{Credentials, Session};
use super::auth_traits::CredentialVerifier;
use crate::errors::{AuthError, Error, Result};
use crate::notifications::TokenRegistrationService;
use crate::users::{Role, UserRepositoryTrait};

/// Service running the login flow: credential verification, user record
/// lookup, and push token registration.
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    users: Arc<dyn UserRepositoryTrait>,
    registration: Arc<TokenRegistrationService>,
}

impl AuthService {
    /// Creates a new AuthService instance
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        users: Arc<dyn UserRepositoryTrait>,
        registration: Arc<TokenRegistrationService>,
    ) -> Self {
        Self {
            verifier,
            users,
            registration,
        }
    }

    /// Signs a user in. Token registration runs after verification and can
    /// only degrade the session to "no notifications", never fail it.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let identity = self
            .verifier
            .verify(&credentials.email, &credentials.password)
            .await?;

        let user = self.users.get_by_id(&identity.user_id).map_err(|_| {
            Error::Auth(AuthError::UnknownIdentity(identity.user_id.clone()))
        })?;

        self.registration.register(&user.id).await;

        match user.role {
            Role::Admin => debug!("Administrator {} signed in", user.id),
            Role::Manager => debug!("Manager {} signed in", user.id),
        }

        Ok(user.into())
    }
}
