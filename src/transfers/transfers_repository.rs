use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use diesel::Connection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{DatabaseError, Error, Result};
use crate::schema::traslados;
use crate::schema::traslados::dsl::*;

use super::transfers_model::{NewTransfer, Transfer, TransferDB, TransferFilter};
use super::transfers_traits::TransferRepositoryTrait;

/// Repository for managing transfer records in the database
pub struct TransferRepository {
    pool: Arc<DbPool>,
}

impl TransferRepository {
    /// Creates a new TransferRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999, the inclusive upper bound used throughout the filters
    date.and_hms_milli_opt(23, 59, 59, 999).unwrap()
}

impl TransferRepositoryTrait for TransferRepository {
    fn create(&self, new_transfer: NewTransfer) -> Result<Transfer> {
        new_transfer.validate()?;

        let mut transfer_db: TransferDB = new_transfer.into();
        transfer_db.id = uuid::Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)?;

        // RETURNING picks up the server-assigned creation timestamp.
        let inserted = diesel::insert_into(traslados::table)
            .values(&transfer_db)
            .get_result::<TransferDB>(&mut conn)?;

        Ok(inserted.into())
    }

    fn get_by_id(&self, transfer_id: &str) -> Result<Transfer> {
        let mut conn = get_connection(&self.pool)?;

        let transfer = traslados
            .find(transfer_id)
            .first::<TransferDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => Error::Database(DatabaseError::NotFound(
                    format!("Transfer with id {} not found", transfer_id),
                )),
                _ => e.into(),
            })?;

        Ok(transfer.into())
    }

    fn list_for_manager(&self, manager: &str) -> Result<Vec<Transfer>> {
        let mut conn = get_connection(&self.pool)?;

        let results = traslados
            .filter(manager_name.eq(manager))
            .order(created_at.desc())
            .load::<TransferDB>(&mut conn)?;

        Ok(results.into_iter().map(Transfer::from).collect())
    }

    fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<Transfer>> {
        let mut conn = get_connection(&self.pool)?;

        let results = traslados
            .order(created_at.desc())
            .limit(limit)
            .offset(offset)
            .load::<TransferDB>(&mut conn)?;

        Ok(results.into_iter().map(Transfer::from).collect())
    }

    fn filter(&self, criteria: &TransferFilter) -> Result<Vec<Transfer>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = traslados::table.into_boxed();

        if let Some(start) = criteria.start_date {
            query = query.filter(created_at.ge(start_of_day(start)));
        }
        if let Some(end) = criteria.end_date {
            query = query.filter(created_at.le(end_of_day(end)));
        }
        if let Some(ref manager) = criteria.manager_name {
            query = query.filter(manager_name.eq(manager.clone()));
        }
        if let Some(ref center) = criteria.destination_center_id {
            query = query.filter(destination_center_id.eq(center.clone()));
        }
        if let Some(appointment) = criteria.has_appointment {
            query = query.filter(has_appointment.eq(appointment));
        }
        if let Some(atypical) = criteria.is_atypical {
            query = query.filter(is_atypical.eq(atypical));
        }

        let results = query
            .order(created_at.desc())
            .load::<TransferDB>(&mut conn)?;

        Ok(results.into_iter().map(Transfer::from).collect())
    }

    fn mark_read(&self, transfer_id: &str) -> Result<Transfer> {
        let mut conn = get_connection(&self.pool)?;

        let updated = diesel::update(traslados.find(transfer_id))
            .set(read.eq(true))
            .get_result::<TransferDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => Error::Database(DatabaseError::NotFound(
                    format!("Transfer with id {} not found", transfer_id),
                )),
                _ => e.into(),
            })?;

        Ok(updated.into())
    }

    fn update_observations(&self, transfer_id: &str, new_observations: &str) -> Result<Transfer> {
        let mut conn = get_connection(&self.pool)?;

        let updated = diesel::update(traslados.find(transfer_id))
            .set(observations.eq(new_observations))
            .get_result::<TransferDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => Error::Database(DatabaseError::NotFound(
                    format!("Transfer with id {} not found", transfer_id),
                )),
                _ => e.into(),
            })?;

        Ok(updated.into())
    }

    fn delete(&self, transfer_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::delete(traslados.find(transfer_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Transfer with id {} not found",
                transfer_id
            ))));
        }

        Ok(affected)
    }

    fn delete_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transfer>> {
        let mut conn = get_connection(&self.pool)?;

        let lower = start_of_day(start);
        let upper = end_of_day(end);

        let deleted = conn.transaction::<Vec<TransferDB>, Error, _>(|tx_conn| {
            let doomed = traslados
                .filter(created_at.ge(lower))
                .filter(created_at.le(upper))
                .load::<TransferDB>(tx_conn)?;

            diesel::delete(
                traslados
                    .filter(created_at.ge(lower))
                    .filter(created_at.le(upper)),
            )
            .execute(tx_conn)?;

            Ok(doomed)
        })?;

        Ok(deleted.into_iter().map(Transfer::from).collect())
    }
}
