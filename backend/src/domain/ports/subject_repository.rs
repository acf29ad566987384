//! Port for subject persistence.

use async_trait::async_trait;

use crate::domain::{Subject, SubjectDraft, SubjectId};

use super::CatalogueRepositoryError;

/// Port for storing and querying subjects.
///
/// List results are ordered by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Insert a subject when `id` is `None`, otherwise replace the stored
    /// fields of `id`.
    async fn save(
        &self,
        id: Option<SubjectId>,
        draft: &SubjectDraft,
    ) -> Result<Subject, CatalogueRepositoryError>;

    /// Find a subject by id.
    async fn find_by_id(&self, id: SubjectId) -> Result<Option<Subject>, CatalogueRepositoryError>;

    /// List every subject.
    async fn find_all(&self) -> Result<Vec<Subject>, CatalogueRepositoryError>;

    /// Report whether a subject exists.
    async fn exists_by_id(&self, id: SubjectId) -> Result<bool, CatalogueRepositoryError>;

    /// Delete a subject together with its courses and their content.
    ///
    /// Deleting an absent id succeeds.
    async fn delete_by_id(&self, id: SubjectId) -> Result<(), CatalogueRepositoryError>;

    /// Subjects whose name or description contains either keyword, ignoring
    /// case. A blank keyword matches nothing.
    async fn search_by_keywords(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Vec<Subject>, CatalogueRepositoryError>;

    /// Subjects whose category equals `category` exactly.
    async fn find_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Subject>, CatalogueRepositoryError>;

    /// Subjects with any tag containing `tag`, ignoring case.
    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Subject>, CatalogueRepositoryError>;
}
