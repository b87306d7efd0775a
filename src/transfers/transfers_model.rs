use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing one vehicle-plate transfer event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub plate: String,
    pub manager_name: String,
    pub destination_center_id: String,
    pub has_appointment: bool,
    pub is_atypical: bool,
    pub image_url: Option<String>,
    pub observations: String,
    pub read: bool,
    pub created_at: NaiveDateTime,
}

/// Form fields a manager submits when registering a transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSubmission {
    pub plate: String,
    pub destination_center_id: String,
    pub has_appointment: bool,
    pub is_atypical: bool,
    pub image_url: Option<String>,
}

/// Input model for inserting a new transfer record. The manager name comes
/// from the authenticated session, never from the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub plate: String,
    pub manager_name: String,
    pub destination_center_id: String,
    pub has_appointment: bool,
    pub is_atypical: bool,
    pub image_url: Option<String>,
}

impl NewTransfer {
    /// Validates the new transfer data
    pub fn validate(&self) -> Result<()> {
        if self.plate.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Plate cannot be empty".to_string(),
            )));
        }
        if self.manager_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "managerName".to_string(),
            )));
        }
        if self.destination_center_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "destinationCenterId".to_string(),
            )));
        }
        Ok(())
    }
}

/// Optional criteria for the admin filtered listing. All absent means
/// "everything", newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferFilter {
    pub start_date: Option<NaiveDate>,
    /// Inclusive: records up to 23:59:59.999 of this day match.
    pub end_date: Option<NaiveDate>,
    pub manager_name: Option<String>,
    pub destination_center_id: Option<String>,
    pub has_appointment: Option<bool>,
    pub is_atypical: Option<bool>,
}

/// One flattened row of the admin export. Spreadsheet serialization itself
/// happens outside this crate; these are the cell values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub date: String,
    pub plate: String,
    pub manager_name: String,
    pub destination_center: String,
    pub has_appointment: String,
    pub is_atypical: String,
    pub observations: String,
}

/// Database model for transfer records
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
#[diesel(table_name = crate::schema::traslados)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransferDB {
    pub id: String,
    pub plate: String,
    pub manager_name: String,
    pub destination_center_id: String,
    pub has_appointment: bool,
    pub is_atypical: bool,
    pub image_url: Option<String>,
    pub observations: String,
    pub read: bool,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<TransferDB> for Transfer {
    fn from(db: TransferDB) -> Self {
        Self {
            id: db.id,
            plate: db.plate,
            manager_name: db.manager_name,
            destination_center_id: db.destination_center_id,
            has_appointment: db.has_appointment,
            is_atypical: db.is_atypical,
            image_url: db.image_url,
            observations: db.observations,
            read: db.read,
            created_at: db.created_at,
        }
    }
}

impl From<NewTransfer> for TransferDB {
    fn from(domain: NewTransfer) -> Self {
        Self {
            id: String::new(), // assigned by the repository
            plate: domain.plate,
            manager_name: domain.manager_name,
            destination_center_id: domain.destination_center_id,
            has_appointment: domain.has_appointment,
            is_atypical: domain.is_atypical,
            image_url: domain.image_url,
            observations: String::new(),
            read: false,
            created_at: chrono::Utc::now().naive_utc(), // overwritten by the server-assigned value
        }
    }
}
