use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a destination center
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Center {
    pub id: String,
    pub name: String,
    pub responsible_manager_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new center
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCenter {
    pub name: String,
    pub responsible_manager_id: String,
}

impl NewCenter {
    /// Validates the new center data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Center name cannot be empty".to_string(),
            )));
        }
        if self.responsible_manager_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "responsibleManagerId".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing center
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterUpdate {
    pub id: String,
    pub name: String,
    pub responsible_manager_id: String,
}

impl CenterUpdate {
    /// Validates the center update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Center name cannot be empty".to_string(),
            )));
        }
        if self.responsible_manager_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "responsibleManagerId".to_string(),
            )));
        }
        Ok(())
    }
}

/// Database model for centers
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
#[diesel(table_name = crate::schema::centers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CenterDB {
    pub id: String,
    pub name: String,
    pub responsible_manager_id: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<CenterDB> for Center {
    fn from(db: CenterDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            responsible_manager_id: db.responsible_manager_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewCenter> for CenterDB {
    fn from(domain: NewCenter) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(), // assigned by the repository
            name: domain.name,
            responsible_manager_id: domain.responsible_manager_id,
            created_at: now,
            updated_at: now,
        }
    }
}
