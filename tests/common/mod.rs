use std::sync::Arc;

use tempfile::TempDir;

use traslados_core::auth::Session;
use traslados_core::db::{self, DbPool};
use traslados_core::users::{NewUser, Role, User, UserRepository, UserRepositoryTrait};

/// Creates a scratch database in a temp directory. Keep the TempDir alive
/// for the duration of the test.
pub fn setup_db() -> (TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    (dir, pool)
}

pub fn seed_user(pool: &Arc<DbPool>, id: &str, name: &str, role: Role) -> User {
    let repo = UserRepository::new(pool.clone());
    repo.create(NewUser {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@empresa.com", id),
        role,
    })
    .expect("Failed to seed user")
}

pub fn session_for(user: &User) -> Session {
    Session {
        user_id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        center_id: user.center_id.clone(),
    }
}
