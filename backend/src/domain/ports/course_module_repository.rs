//! Port for course module persistence.

use async_trait::async_trait;

use crate::domain::{CourseId, CourseModule, CourseModuleDraft, CourseModuleId};

use super::CatalogueRepositoryError;

/// Port for storing and querying course modules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseModuleRepository: Send + Sync {
    /// Insert a module when `id` is `None`, otherwise replace the stored
    /// fields of `id`.
    ///
    /// An unknown owning course fails with
    /// [`CatalogueRepositoryError::MissingParent`].
    async fn save(
        &self,
        id: Option<CourseModuleId>,
        draft: &CourseModuleDraft,
    ) -> Result<CourseModule, CatalogueRepositoryError>;

    /// Find a module by id.
    async fn find_by_id(
        &self,
        id: CourseModuleId,
    ) -> Result<Option<CourseModule>, CatalogueRepositoryError>;

    /// List every module, ordered by id.
    async fn find_all(&self) -> Result<Vec<CourseModule>, CatalogueRepositoryError>;

    /// Report whether a module exists.
    async fn exists_by_id(&self, id: CourseModuleId) -> Result<bool, CatalogueRepositoryError>;

    /// Delete a module. Deleting an absent id succeeds.
    async fn delete_by_id(&self, id: CourseModuleId) -> Result<(), CatalogueRepositoryError>;

    /// Modules owned by a course, ordered by id.
    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError>;

    /// Modules owned by a course in sequence order.
    async fn find_by_course_id_ordered_by_position(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError>;

    /// Modules owned by a course, longest first; modules without a duration
    /// come last.
    async fn find_by_course_id_ordered_by_duration_desc(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError>;

    /// Modules whose title or content contains either keyword, ignoring case.
    /// A blank keyword matches nothing.
    async fn search_by_keywords(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError>;
}
