// Module declarations
pub(crate) mod users_model;
pub(crate) mod users_repository;
pub(crate) mod users_service;
pub(crate) mod users_traits;

// Re-export the public interface
pub use users_model::{NewUser, Role, User, UserDB, UserUpdate, ROLE_ADMIN, ROLE_MANAGER};
pub use users_repository::UserRepository;
pub use users_service::UserService;
pub use users_traits::UserRepositoryTrait;
