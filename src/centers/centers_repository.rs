use diesel::prelude::*;
use diesel::Connection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{DatabaseError, Error, Result};
use crate::schema::{centers, users};

use super::centers_model::{Center, CenterDB, CenterUpdate, NewCenter};
use super::centers_traits::CenterRepositoryTrait;

/// Repository for managing center records in the database
pub struct CenterRepository {
    pool: Arc<DbPool>,
}

impl CenterRepository {
    /// Creates a new CenterRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl CenterRepositoryTrait for CenterRepository {
    fn create(&self, new_center: NewCenter) -> Result<Center> {
        new_center.validate()?;

        let mut center_db: CenterDB = new_center.into();
        center_db.id = uuid::Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)?;

        // Center row and the manager's back-reference land atomically.
        conn.transaction::<_, Error, _>(|tx_conn| {
            diesel::insert_into(centers::table)
                .values(&center_db)
                .execute(tx_conn)?;

            diesel::update(
                users::table.filter(users::id.eq(&center_db.responsible_manager_id)),
            )
            .set(users::center_id.eq(&center_db.id))
            .execute(tx_conn)?;

            Ok(())
        })?;

        Ok(center_db.into())
    }

    fn update(&self, update: CenterUpdate) -> Result<Center> {
        update.validate()?;

        let mut conn = get_connection(&self.pool)?;

        let updated = conn.transaction::<CenterDB, Error, _>(|tx_conn| {
            let existing = centers::table
                .find(&update.id)
                .first::<CenterDB>(tx_conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => Error::Database(DatabaseError::NotFound(
                        format!("Center with id {} not found", update.id),
                    )),
                    _ => e.into(),
                })?;

            // A reassignment releases the previous responsible manager.
            if existing.responsible_manager_id != update.responsible_manager_id {
                diesel::update(
                    users::table.filter(users::id.eq(&existing.responsible_manager_id)),
                )
                .set(users::center_id.eq(None::<String>))
                .execute(tx_conn)?;
            }

            let mut center_db = existing;
            center_db.name = update.name;
            center_db.responsible_manager_id = update.responsible_manager_id;
            center_db.updated_at = chrono::Utc::now().naive_utc();

            diesel::update(centers::table.find(&center_db.id))
                .set(&center_db)
                .execute(tx_conn)?;

            diesel::update(
                users::table.filter(users::id.eq(&center_db.responsible_manager_id)),
            )
            .set(users::center_id.eq(&center_db.id))
            .execute(tx_conn)?;

            Ok(center_db)
        })?;

        Ok(updated.into())
    }

    fn get_by_id(&self, center_id: &str) -> Result<Center> {
        let mut conn = get_connection(&self.pool)?;

        let center = centers::table
            .find(center_id)
            .first::<CenterDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => Error::Database(DatabaseError::NotFound(
                    format!("Center with id {} not found", center_id),
                )),
                _ => e.into(),
            })?;

        Ok(center.into())
    }

    fn get_name(&self, center_id: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;

        let found = centers::table
            .find(center_id)
            .select(centers::name)
            .first::<String>(&mut conn)
            .optional()?;

        Ok(found)
    }

    fn list(&self) -> Result<Vec<Center>> {
        let mut conn = get_connection(&self.pool)?;

        let results = centers::table
            .order(centers::name.asc())
            .load::<CenterDB>(&mut conn)?;

        Ok(results.into_iter().map(Center::from).collect())
    }

    fn delete(&self, center_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction::<usize, Error, _>(|tx_conn| {
            diesel::update(users::table.filter(users::center_id.eq(center_id)))
                .set(users::center_id.eq(None::<String>))
                .execute(tx_conn)?;

            let affected = diesel::delete(centers::table.find(center_id)).execute(tx_conn)?;

            if affected == 0 {
                return Err(Error::Database(DatabaseError::NotFound(format!(
                    "Center with id {} not found",
                    center_id
                ))));
            }

            Ok(affected)
        })
    }
}
