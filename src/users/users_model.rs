use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";

/// Application role. The set is closed: every authorization-sensitive branch
/// matches exhaustively on this enum instead of comparing role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Manager => ROLE_MANAGER,
        }
    }

    /// Parses a stored role string. Unknown values are rejected rather than
    /// defaulted: a row with a role outside the closed set must not silently
    /// gain or lose privileges.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_MANAGER => Ok(Role::Manager),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown role '{}'",
                other
            )))),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Domain model representing a user record. The id is the hosted auth
/// identity of the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub center_id: Option<String>,
    pub push_token: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for provisioning a new user account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Auth identity assigned by the hosted auth service.
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl NewUser {
    /// Validates the new user data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "User name cannot be empty".to_string(),
            )));
        }
        if self.email.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Email cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserUpdate {
    /// Validates the user update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "User name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Database model for user records
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub center_id: Option<String>,
    pub push_token: Option<String>,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations. Role strings come from the closed set written
// by this crate; an unknown value surfaces as a validation error rather than
// a silently coerced role.
impl TryFrom<UserDB> for User {
    type Error = Error;

    fn try_from(db: UserDB) -> Result<User> {
        Ok(User {
            role: Role::parse(&db.role)?,
            id: db.id,
            name: db.name,
            email: db.email,
            center_id: db.center_id,
            push_token: db.push_token,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id,
            name: domain.name,
            email: domain.email,
            role: domain.role.as_str().to_string(),
            center_id: None,
            push_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}
