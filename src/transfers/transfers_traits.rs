use chrono::NaiveDate;

use super::transfers_model::{NewTransfer, Transfer, TransferFilter};
use crate::errors::Result;

/// Trait defining the contract for transfer repository operations.
pub trait TransferRepositoryTrait: Send + Sync {
    fn create(&self, new_transfer: NewTransfer) -> Result<Transfer>;

    fn get_by_id(&self, transfer_id: &str) -> Result<Transfer>;

    /// All transfers submitted by one manager, newest first.
    fn list_for_manager(&self, manager: &str) -> Result<Vec<Transfer>>;

    /// One page of the full history, newest first.
    fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<Transfer>>;

    /// Filtered listing, newest first. The end date bound is inclusive of
    /// the whole day.
    fn filter(&self, filter: &TransferFilter) -> Result<Vec<Transfer>>;

    /// Flips the read flag to true. Never flips it back.
    fn mark_read(&self, transfer_id: &str) -> Result<Transfer>;

    fn update_observations(&self, transfer_id: &str, observations: &str) -> Result<Transfer>;

    fn delete(&self, transfer_id: &str) -> Result<usize>;

    /// Deletes every record created within the date range (end inclusive of
    /// the whole day) and returns the deleted rows so callers can clean up
    /// associated blobs.
    fn delete_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transfer>>;
}
