use super::users_model::{NewUser, Role, User, UserUpdate};
use crate::errors::Result;

/// Trait defining the contract for user repository operations.
pub trait UserRepositoryTrait: Send + Sync {
    fn create(&self, new_user: NewUser) -> Result<User>;

    fn update(&self, update: UserUpdate) -> Result<User>;

    fn get_by_id(&self, user_id: &str) -> Result<User>;

    fn list(&self) -> Result<Vec<User>>;

    fn list_by_role(&self, role: Role) -> Result<Vec<User>>;

    /// Merge-style write: overwrites only the `push_token` column, leaving
    /// every other column of the row untouched.
    fn update_push_token(&self, user_id: &str, token: &str) -> Result<()>;

    fn delete(&self, user_id: &str) -> Result<usize>;
}
