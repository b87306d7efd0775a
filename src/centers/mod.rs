// Module declarations
pub(crate) mod centers_model;
pub(crate) mod centers_repository;
pub(crate) mod centers_service;
pub(crate) mod centers_traits;

// Re-export the public interface
pub use centers_model::{Center, CenterDB, CenterUpdate, NewCenter};
pub use centers_repository::CenterRepository;
pub use centers_service::CenterService;
pub use centers_traits::CenterRepositoryTrait;
