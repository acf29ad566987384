//! Driving port for material mutations.

use async_trait::async_trait;

use crate::domain::{Error, Material, MaterialDraft, MaterialId};

/// Driving port for material write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialCommand: Send + Sync {
    /// Validate and persist a new material under an existing course.
    async fn create_material(&self, draft: MaterialDraft) -> Result<Material, Error>;

    /// Replace every mutable field of an existing material.
    async fn update_material(&self, id: MaterialId, draft: MaterialDraft)
    -> Result<Material, Error>;

    /// Delete an existing material.
    async fn delete_material(&self, id: MaterialId) -> Result<(), Error>;
}
