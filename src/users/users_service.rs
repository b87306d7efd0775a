use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, Role, User, UserUpdate};
use super::users_traits::UserRepositoryTrait;
use crate::auth::Session;
use crate::errors::{AuthError, Error, Result};

/// Service for administrator-side user management
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    /// Creates a new UserService instance
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Provisions a new user account record for an already-created auth
    /// identity.
    pub fn create_user(&self, session: &Session, new_user: NewUser) -> Result<User> {
        require_admin(session, "provision users")?;
        debug!(
            "Provisioning user {} with role {}",
            new_user.id,
            new_user.role.as_str()
        );
        self.repository.create(new_user)
    }

    /// Updates an existing user's profile (name, email, role)
    pub fn update_user(&self, session: &Session, update: UserUpdate) -> Result<User> {
        require_admin(session, "update users")?;
        self.repository.update(update)
    }

    /// Retrieves a user by id
    pub fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    /// Lists all users
    pub fn list_users(&self, session: &Session) -> Result<Vec<User>> {
        require_admin(session, "list users")?;
        self.repository.list()
    }

    /// Lists manager accounts, for center-responsible pickers
    pub fn list_managers(&self) -> Result<Vec<User>> {
        self.repository.list_by_role(Role::Manager)
    }

    /// Lists administrator accounts
    pub fn list_admins(&self) -> Result<Vec<User>> {
        self.repository.list_by_role(Role::Admin)
    }

    /// Deletes a user record
    pub fn delete_user(&self, session: &Session, user_id: &str) -> Result<usize> {
        require_admin(session, "delete users")?;
        self.repository.delete(user_id)
    }
}

/// Role gate for administrator-only operations. Matches exhaustively so a
/// future role cannot slip through unhandled.
pub(crate) fn require_admin(session: &Session, action: &str) -> Result<()> {
    match session.role {
        Role::Admin => Ok(()),
        Role::Manager => Err(Error::Auth(AuthError::Forbidden(format!(
            "manager accounts may not {}",
            action
        )))),
    }
}
