use super::centers_model::{Center, CenterUpdate, NewCenter};
use crate::errors::Result;

/// Trait defining the contract for center repository operations.
///
/// Center writes carry a cross-reference: the responsible manager's own
/// `center_id` column must track the center that names them. Implementations
/// perform the paired writes in one transaction so a crash cannot strand a
/// stale reference on either side.
pub trait CenterRepositoryTrait: Send + Sync {
    fn create(&self, new_center: NewCenter) -> Result<Center>;

    fn update(&self, update: CenterUpdate) -> Result<Center>;

    fn get_by_id(&self, center_id: &str) -> Result<Center>;

    /// Resolves a center name for display; dangling references resolve to
    /// `None` rather than an error.
    fn get_name(&self, center_id: &str) -> Result<Option<String>>;

    fn list(&self) -> Result<Vec<Center>>;

    fn delete(&self, center_id: &str) -> Result<usize>;
}
