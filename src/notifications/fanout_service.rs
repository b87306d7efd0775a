//! New-transfer notification fan-out.
//!
//! Invoked once per created transfer record. Fire-and-forget: every failure
//! is logged and swallowed, nothing is retried, and the submitting manager
//! never learns whether anyone was notified.

use futures::future::join_all;
use log::{error, info, warn};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::notifications_model::{DispatchOutcome, PushMessage};
use super::notifications_traits::PushClientTrait;
use crate::errors::Result;
use crate::subscriptions::ChangeEvent;
use crate::transfers::Transfer;
use crate::users::{Role, UserRepositoryTrait};

/// Service notifying all current administrators of a new transfer record
pub struct FanoutService {
    users: Arc<dyn UserRepositoryTrait>,
    push: Arc<dyn PushClientTrait>,
}

impl FanoutService {
    /// Creates a new FanoutService instance
    pub fn new(users: Arc<dyn UserRepositoryTrait>, push: Arc<dyn PushClientTrait>) -> Self {
        Self { users, push }
    }

    /// Trigger body. Never propagates an error: the triggering write has
    /// already committed, so failures here are logged and swallowed.
    pub async fn notify_transfer_created(&self, plate: &str) -> Vec<DispatchOutcome> {
        match self.dispatch_to_admins(plate).await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                error!("Transfer fan-out aborted: {}", e);
                Vec::new()
            }
        }
    }

    async fn dispatch_to_admins(&self, plate: &str) -> Result<Vec<DispatchOutcome>> {
        let admins = self.users.list_by_role(Role::Admin)?;

        if admins.is_empty() {
            warn!("No administrator accounts found; skipping fan-out");
            return Ok(Vec::new());
        }

        let tokens: Vec<String> = admins
            .into_iter()
            .filter_map(|admin| admin.push_token)
            .filter(|token| !token.is_empty())
            .collect();

        if tokens.is_empty() {
            warn!("No administrator has a registered push token; skipping fan-out");
            return Ok(Vec::new());
        }

        let messages: Vec<PushMessage> = tokens
            .iter()
            .map(|token| PushMessage::transfer_created(token.clone(), plate))
            .collect();

        // Full fan-out: every dispatch is issued before any is awaited, and
        // each resolves independently of its siblings.
        let sends = messages.iter().map(|message| self.push.send(message));
        let results = join_all(sends).await;

        let outcomes: Vec<DispatchOutcome> = tokens
            .into_iter()
            .zip(results)
            .enumerate()
            .map(|(i, (token, result))| match result {
                Ok(()) => {
                    info!("Notification dispatched to admin {}", i + 1);
                    DispatchOutcome::Delivered { token }
                }
                Err(e) => {
                    error!("Failed to dispatch to admin {}: {}", i + 1, e);
                    DispatchOutcome::Failed {
                        token,
                        reason: e.to_string(),
                    }
                }
            })
            .collect();

        Ok(outcomes)
    }
}

/// Wires the fan-out to the transfer change feed: exactly one invocation per
/// `Created` event. The returned handle owns the trigger task; abort it to
/// detach.
pub fn spawn_transfer_trigger(
    mut events: broadcast::Receiver<ChangeEvent<Transfer>>,
    fanout: Arc<FanoutService>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ChangeEvent::Created(transfer)) => {
                    fanout.notify_transfer_created(&transfer.plate).await;
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("Transfer trigger lagged behind; {} events dropped", missed);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
