// Module declarations
pub(crate) mod transfers_model;
pub(crate) mod transfers_repository;
pub(crate) mod transfers_service;
pub(crate) mod transfers_traits;

// Re-export the public interface
pub use transfers_model::{
    ExportRow, NewTransfer, Transfer, TransferDB, TransferFilter, TransferSubmission,
};
pub use transfers_repository::TransferRepository;
pub use transfers_service::TransferService;
pub use transfers_traits::TransferRepositoryTrait;
