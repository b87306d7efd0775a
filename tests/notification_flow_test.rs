mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use common::{seed_user, session_for, setup_db};
use traslados_core::auth::{AuthIdentity, AuthService, CredentialVerifier, Credentials};
use traslados_core::centers::{CenterRepository, CenterRepositoryTrait, NewCenter};
use traslados_core::errors::{AuthError, Error};
use traslados_core::notifications::{
    spawn_transfer_trigger, FanoutService, PushClientTrait, PushMessage, TokenProvider,
    TokenRegistrationService,
};
use traslados_core::storage::LocalBlobStore;
use traslados_core::transfers::{TransferRepository, TransferService, TransferSubmission};
use traslados_core::users::{Role, UserRepository, UserRepositoryTrait};

#[derive(Default)]
struct RecordingPushClient {
    sent: Mutex<Vec<PushMessage>>,
}

impl RecordingPushClient {
    fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushClientTrait for RecordingPushClient {
    async fn send(
        &self,
        message: &PushMessage,
    ) -> std::result::Result<(), traslados_core::notifications::NotificationError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

struct StaticTokenProvider(String);

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn request_token(
        &self,
        _client_key: &str,
    ) -> std::result::Result<String, traslados_core::notifications::NotificationError> {
        Ok(self.0.clone())
    }
}

struct SingleUserVerifier {
    email: String,
    user_id: String,
}

#[async_trait]
impl CredentialVerifier for SingleUserVerifier {
    async fn verify(
        &self,
        email: &str,
        _password: &str,
    ) -> traslados_core::Result<AuthIdentity> {
        if email == self.email {
            Ok(AuthIdentity {
                user_id: self.user_id.clone(),
            })
        } else {
            Err(Error::Auth(AuthError::InvalidCredentials(
                "unknown account".to_string(),
            )))
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn created_transfer_fans_out_to_registered_admins() {
    let (dir, pool) = setup_db();

    let manager = seed_user(&pool, "m1", "Luis", Role::Manager);
    seed_user(&pool, "a1", "Ana", Role::Admin);
    seed_user(&pool, "a2", "Berta", Role::Admin);
    seed_user(&pool, "a3", "Carmen", Role::Admin); // never registers a token

    let users: Arc<dyn UserRepositoryTrait> = Arc::new(UserRepository::new(pool.clone()));
    users.update_push_token("a1", "T1").unwrap();
    users.update_push_token("a2", "T2").unwrap();

    let center = CenterRepository::new(pool.clone())
        .create(NewCenter {
            name: "Centro Norte".to_string(),
            responsible_manager_id: manager.id.clone(),
        })
        .unwrap();

    let transfers = TransferService::new(
        Arc::new(TransferRepository::new(pool.clone())),
        Arc::new(CenterRepository::new(pool.clone())),
        Arc::new(LocalBlobStore::new(dir.path().join("uploads")).unwrap()),
    );

    let push = Arc::new(RecordingPushClient::default());
    let fanout = Arc::new(FanoutService::new(users, push.clone()));
    let trigger = spawn_transfer_trigger(transfers.changes().subscribe(), fanout);

    transfers
        .submit_transfer(
            &session_for(&manager),
            TransferSubmission {
                plate: "ABC-123".to_string(),
                destination_center_id: center.id,
                has_appointment: false,
                is_atypical: false,
                image_url: None,
            },
        )
        .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;

    let sent = push.sent();
    assert_eq!(sent.len(), 2, "one dispatch per token-holding admin");
    for message in &sent {
        assert_eq!(message.notification.title, "Nuevo traslado registrado");
        assert_eq!(message.notification.body, "Placa: ABC-123");
        assert!(message.notification.icon.is_none());
    }
    let mut tokens: Vec<_> = sent.iter().map(|m| m.token.clone()).collect();
    tokens.sort();
    assert_eq!(tokens, vec!["T1".to_string(), "T2".to_string()]);

    trigger.abort();
}

#[tokio::test]
async fn login_registers_tokens_for_admins_only() {
    let (_dir, pool) = setup_db();

    seed_user(&pool, "a1", "Ana", Role::Admin);
    seed_user(&pool, "m1", "Luis", Role::Manager);

    let users: Arc<dyn UserRepositoryTrait> = Arc::new(UserRepository::new(pool.clone()));
    let provider = Arc::new(StaticTokenProvider("T-fresh".to_string()));
    let registration = Arc::new(TokenRegistrationService::new(users.clone(), provider));

    let admin_auth = AuthService::new(
        Arc::new(SingleUserVerifier {
            email: "a1@empresa.com".to_string(),
            user_id: "a1".to_string(),
        }),
        users.clone(),
        registration.clone(),
    );
    let session = admin_auth
        .sign_in(&Credentials {
            email: "a1@empresa.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.role, Role::Admin);
    assert_eq!(
        users.get_by_id("a1").unwrap().push_token.as_deref(),
        Some("T-fresh")
    );

    let manager_auth = AuthService::new(
        Arc::new(SingleUserVerifier {
            email: "m1@empresa.com".to_string(),
            user_id: "m1".to_string(),
        }),
        users.clone(),
        registration,
    );
    let session = manager_auth
        .sign_in(&Credentials {
            email: "m1@empresa.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.role, Role::Manager);
    assert_eq!(users.get_by_id("m1").unwrap().push_token, None);

    // Bad credentials surface as an auth error.
    assert!(manager_auth
        .sign_in(&Credentials {
            email: "nadie@empresa.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .is_err());
}
