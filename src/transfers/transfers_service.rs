use chrono::NaiveDate;
use log::{debug, error};
use std::sync::Arc;

use super::transfers_model::{
    ExportRow, NewTransfer, Transfer, TransferFilter, TransferSubmission,
};
use super::transfers_traits::TransferRepositoryTrait;
use crate::auth::Session;
use crate::centers::CenterRepositoryTrait;
use crate::constants::HISTORY_PAGE_SIZE;
use crate::errors::{AuthError, Error, Result};
use crate::storage::BlobStore;
use crate::subscriptions::{ChangeEvent, ChangeStream};
use crate::users::users_service::require_admin;
use crate::users::Role;

/// Service for registering and moderating transfer records.
///
/// Every write is published on the transfer change stream after it commits;
/// the notification trigger and any live views subscribe there.
pub struct TransferService {
    repository: Arc<dyn TransferRepositoryTrait>,
    centers: Arc<dyn CenterRepositoryTrait>,
    blob_store: Arc<dyn BlobStore>,
    changes: ChangeStream<ChangeEvent<Transfer>>,
}

impl TransferService {
    /// Creates a new TransferService instance
    pub fn new(
        repository: Arc<dyn TransferRepositoryTrait>,
        centers: Arc<dyn CenterRepositoryTrait>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            repository,
            centers,
            blob_store,
            changes: ChangeStream::new(),
        }
    }

    /// The change feed of this collection. The fan-out trigger and live
    /// views subscribe here.
    pub fn changes(&self) -> &ChangeStream<ChangeEvent<Transfer>> {
        &self.changes
    }

    /// Registers a new transfer on behalf of the signed-in manager. The
    /// manager name is taken from the session, never from the form.
    pub fn submit_transfer(
        &self,
        session: &Session,
        submission: TransferSubmission,
    ) -> Result<Transfer> {
        require_manager(session, "submit transfers")?;

        let new_transfer = NewTransfer {
            plate: submission.plate,
            manager_name: session.name.clone(),
            destination_center_id: submission.destination_center_id,
            has_appointment: submission.has_appointment,
            is_atypical: submission.is_atypical,
            image_url: submission.image_url,
        };

        let transfer = self.repository.create(new_transfer)?;
        debug!(
            "Transfer {} registered for plate {}",
            transfer.id, transfer.plate
        );

        self.changes
            .publish(ChangeEvent::Created(transfer.clone()));

        Ok(transfer)
    }

    /// Lists the signed-in manager's own transfers, newest first
    pub fn my_transfers(&self, session: &Session) -> Result<Vec<Transfer>> {
        self.repository.list_for_manager(&session.name)
    }

    /// Updates observations on a transfer owned by the signed-in manager
    pub fn update_observations(
        &self,
        session: &Session,
        transfer_id: &str,
        observations: &str,
    ) -> Result<Transfer> {
        let existing = self.repository.get_by_id(transfer_id)?;
        if existing.manager_name != session.name {
            return Err(Error::Auth(AuthError::Forbidden(format!(
                "transfer {} belongs to another manager",
                transfer_id
            ))));
        }

        let updated = self
            .repository
            .update_observations(transfer_id, observations)?;
        self.changes.publish(ChangeEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// One page of the full history for administrators, newest first
    pub fn history_page(&self, session: &Session, page: i64) -> Result<Vec<Transfer>> {
        require_admin(session, "browse the transfer history")?;
        self.repository
            .list_page(HISTORY_PAGE_SIZE, page * HISTORY_PAGE_SIZE)
    }

    /// Filtered admin listing
    pub fn search(&self, session: &Session, filter: &TransferFilter) -> Result<Vec<Transfer>> {
        require_admin(session, "filter transfers")?;
        self.repository.filter(filter)
    }

    /// Marks a transfer as reviewed
    pub fn mark_read(&self, session: &Session, transfer_id: &str) -> Result<Transfer> {
        require_admin(session, "mark transfers as read")?;
        let updated = self.repository.mark_read(transfer_id)?;
        self.changes.publish(ChangeEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// Deletes a single transfer record
    pub fn delete_transfer(&self, session: &Session, transfer_id: &str) -> Result<usize> {
        require_admin(session, "delete transfers")?;
        let affected = self.repository.delete(transfer_id)?;
        self.changes
            .publish(ChangeEvent::Removed(transfer_id.to_string()));
        Ok(affected)
    }

    /// Bulk-deletes every transfer created in the date range (end day
    /// inclusive). Stored images are deleted best-effort: a blob failure is
    /// logged and does not undo or abort the record deletion.
    pub async fn delete_by_date_range(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<usize> {
        require_admin(session, "bulk-delete transfers")?;

        let deleted = self.repository.delete_date_range(start, end)?;

        for transfer in &deleted {
            if let Some(ref url) = transfer.image_url {
                if let Err(e) = self.blob_store.delete(url).await {
                    error!(
                        "Failed to delete image for transfer {}: {}",
                        transfer.id, e
                    );
                }
            }
            self.changes
                .publish(ChangeEvent::Removed(transfer.id.clone()));
        }

        Ok(deleted.len())
    }

    /// Flattens a filtered listing into export rows. Center references are
    /// resolved to names; dangling ones render as a placeholder dash.
    pub fn export_rows(
        &self,
        session: &Session,
        filter: &TransferFilter,
    ) -> Result<Vec<ExportRow>> {
        require_admin(session, "export transfers")?;

        let transfers = self.repository.filter(filter)?;
        let mut rows = Vec::with_capacity(transfers.len());

        for transfer in transfers {
            let destination = self
                .centers
                .get_name(&transfer.destination_center_id)?
                .unwrap_or_else(|| "—".to_string());

            rows.push(ExportRow {
                date: transfer.created_at.format("%d/%m/%Y %H:%M").to_string(),
                plate: transfer.plate,
                manager_name: transfer.manager_name,
                destination_center: destination,
                has_appointment: spanish_bool(transfer.has_appointment),
                is_atypical: spanish_bool(transfer.is_atypical),
                observations: transfer.observations,
            });
        }

        Ok(rows)
    }
}

fn spanish_bool(value: bool) -> String {
    if value { "Sí" } else { "No" }.to_string()
}

/// Role gate for manager-only operations. Exhaustive so a future role cannot
/// slip through unhandled.
fn require_manager(session: &Session, action: &str) -> Result<()> {
    match session.role {
        Role::Manager => Ok(()),
        Role::Admin => Err(Error::Auth(AuthError::Forbidden(format!(
            "administrator accounts may not {}",
            action
        )))),
    }
}
