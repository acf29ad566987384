//! Port for material persistence.

use async_trait::async_trait;

use crate::domain::{CourseId, Material, MaterialDraft, MaterialId, MaterialType, SubjectId};

use super::CatalogueRepositoryError;

/// Port for storing and querying course materials.
///
/// List results are ordered by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// Insert a material when `id` is `None`, otherwise replace the stored
    /// fields of `id`.
    ///
    /// An unknown owning course fails with
    /// [`CatalogueRepositoryError::MissingParent`].
    async fn save(
        &self,
        id: Option<MaterialId>,
        draft: &MaterialDraft,
    ) -> Result<Material, CatalogueRepositoryError>;

    /// Find a material by id.
    async fn find_by_id(&self, id: MaterialId)
    -> Result<Option<Material>, CatalogueRepositoryError>;

    /// List every material.
    async fn find_all(&self) -> Result<Vec<Material>, CatalogueRepositoryError>;

    /// Report whether a material exists.
    async fn exists_by_id(&self, id: MaterialId) -> Result<bool, CatalogueRepositoryError>;

    /// Delete a material. Deleting an absent id succeeds.
    async fn delete_by_id(&self, id: MaterialId) -> Result<(), CatalogueRepositoryError>;

    /// Materials of every course filed under `subject_id`.
    async fn find_by_subject_id(
        &self,
        subject_id: SubjectId,
    ) -> Result<Vec<Material>, CatalogueRepositoryError>;

    /// Materials whose title equals `title` exactly.
    async fn find_by_title(&self, title: &str) -> Result<Vec<Material>, CatalogueRepositoryError>;

    /// Materials owned by a course.
    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Material>, CatalogueRepositoryError>;

    /// Materials of one format.
    async fn find_by_type(
        &self,
        material_type: MaterialType,
    ) -> Result<Vec<Material>, CatalogueRepositoryError>;
}
