use log::debug;
use std::sync::Arc;

use super::centers_model::{Center, CenterUpdate, NewCenter};
use super::centers_traits::CenterRepositoryTrait;
use crate::auth::Session;
use crate::errors::Result;
use crate::users::users_service::require_admin;

/// Service for managing destination centers
pub struct CenterService {
    repository: Arc<dyn CenterRepositoryTrait>,
}

impl CenterService {
    /// Creates a new CenterService instance
    pub fn new(repository: Arc<dyn CenterRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Creates a center and records its responsible manager
    pub fn create_center(&self, session: &Session, new_center: NewCenter) -> Result<Center> {
        require_admin(session, "create centers")?;
        debug!(
            "Creating center '{}' with responsible manager {}",
            new_center.name, new_center.responsible_manager_id
        );
        self.repository.create(new_center)
    }

    /// Renames a center and/or reassigns its responsible manager
    pub fn update_center(&self, session: &Session, update: CenterUpdate) -> Result<Center> {
        require_admin(session, "update centers")?;
        self.repository.update(update)
    }

    /// Retrieves a center by id
    pub fn get_center(&self, center_id: &str) -> Result<Center> {
        self.repository.get_by_id(center_id)
    }

    /// Lists all centers
    pub fn list_centers(&self) -> Result<Vec<Center>> {
        self.repository.list()
    }

    /// Deletes a center, releasing its responsible manager
    pub fn delete_center(&self, session: &Session, center_id: &str) -> Result<usize> {
        require_admin(session, "delete centers")?;
        self.repository.delete(center_id)
    }
}
