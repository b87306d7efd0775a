use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{DatabaseError, Error, Result};
use crate::schema::users;
use crate::schema::users::dsl::*;

use super::users_model::{NewUser, Role, User, UserDB, UserUpdate};
use super::users_traits::UserRepositoryTrait;

/// Repository for managing user records in the database
pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn create(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        let user_db: UserDB = new_user.into();
        let mut conn = get_connection(&self.pool)?;

        diesel::insert_into(users::table)
            .values(&user_db)
            .execute(&mut conn)?;

        user_db.try_into()
    }

    fn update(&self, update: UserUpdate) -> Result<User> {
        update.validate()?;

        let mut conn = get_connection(&self.pool)?;

        let existing = users
            .find(&update.id)
            .first::<UserDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => Error::Database(DatabaseError::NotFound(
                    format!("User with id {} not found", update.id),
                )),
                _ => e.into(),
            })?;

        let mut user_db = existing;
        user_db.name = update.name;
        user_db.email = update.email;
        user_db.role = update.role.as_str().to_string();
        user_db.updated_at = chrono::Utc::now().naive_utc();

        diesel::update(users.find(&user_db.id))
            .set(&user_db)
            .execute(&mut conn)?;

        user_db.try_into()
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user = users
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => Error::Database(DatabaseError::NotFound(
                    format!("User with id {} not found", user_id),
                )),
                _ => e.into(),
            })?;

        user.try_into()
    }

    fn list(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;

        users
            .order(name.asc())
            .load::<UserDB>(&mut conn)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    fn list_by_role(&self, role_filter: Role) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;

        users
            .filter(role.eq(role_filter.as_str()))
            .order(name.asc())
            .load::<UserDB>(&mut conn)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    fn update_push_token(&self, user_id: &str, token: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        // Deliberately touches only the token column (merge semantics): the
        // rest of the row, timestamps included, stays byte-identical.
        let affected = diesel::update(users.find(user_id))
            .set(push_token.eq(token))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "User with id {} not found",
                user_id
            ))));
        }

        Ok(())
    }

    fn delete(&self, user_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::delete(users.find(user_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "User with id {} not found",
                user_id
            ))));
        }

        Ok(affected)
    }
}
