//! Driving port for course module mutations.

use async_trait::async_trait;

use crate::domain::{CourseModule, CourseModuleDraft, CourseModuleId, Error};

/// Driving port for module write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseModuleCommand: Send + Sync {
    /// Validate and persist a new module under an existing course.
    async fn create_module(&self, draft: CourseModuleDraft) -> Result<CourseModule, Error>;

    /// Replace every mutable field of an existing module.
    async fn update_module(
        &self,
        id: CourseModuleId,
        draft: CourseModuleDraft,
    ) -> Result<CourseModule, Error>;

    /// Delete an existing module.
    async fn delete_module(&self, id: CourseModuleId) -> Result<(), Error>;
}
