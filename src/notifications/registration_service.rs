//! Login-time push token registration.
//!
//! Runs after credential verification succeeds. A missing token or a failed
//! write degrades the login to "no notifications", never to a failure.

use log::{debug, warn};
use std::sync::Arc;

use super::notifications_traits::TokenProvider;
use crate::constants::PUSH_CLIENT_KEY;
use crate::users::{Role, UserRepositoryTrait};

/// Service keeping each administrator's push token current
pub struct TokenRegistrationService {
    users: Arc<dyn UserRepositoryTrait>,
    tokens: Arc<dyn TokenProvider>,
}

impl TokenRegistrationService {
    /// Creates a new TokenRegistrationService instance
    pub fn new(users: Arc<dyn UserRepositoryTrait>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { users, tokens }
    }

    /// Refreshes the signed-in user's push token. Only administrator
    /// accounts ever persist a token; manager logins never touch the field,
    /// which keeps them structurally outside the fan-out.
    pub async fn register(&self, user_id: &str) {
        let token = match self.tokens.request_token(PUSH_CLIENT_KEY).await {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not obtain a push token: {}", e);
                return;
            }
        };

        let user = match self.users.get_by_id(user_id) {
            Ok(user) => user,
            Err(e) => {
                warn!("Could not load user {} for token registration: {}", user_id, e);
                return;
            }
        };

        match user.role {
            Role::Admin => {
                if let Err(e) = self.users.update_push_token(&user.id, &token) {
                    warn!("Failed to persist push token for {}: {}", user.id, e);
                } else {
                    debug!("Push token refreshed for administrator {}", user.id);
                }
            }
            Role::Manager => {
                debug!("Manager {} logged in; no push token persisted", user.id);
            }
        }
    }
}
