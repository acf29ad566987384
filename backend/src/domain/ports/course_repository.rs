//! Port for course persistence and the course derived queries.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Course, CourseDraft, CourseId, SubjectCourseCount};

use super::CatalogueRepositoryError;

/// Port for storing and querying courses.
///
/// Unless stated otherwise, list results are ordered by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a course when `id` is `None`, otherwise replace the stored
    /// fields of `id`.
    ///
    /// Replacing an unknown id fails with `MissingRow`. A `subject_id` that
    /// does not exist fails with [`CatalogueRepositoryError::MissingParent`].
    async fn save(
        &self,
        id: Option<CourseId>,
        draft: &CourseDraft,
    ) -> Result<Course, CatalogueRepositoryError>;

    /// Find a course by id.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CatalogueRepositoryError>;

    /// List every course.
    async fn find_all(&self) -> Result<Vec<Course>, CatalogueRepositoryError>;

    /// Report whether a course exists.
    async fn exists_by_id(&self, id: CourseId) -> Result<bool, CatalogueRepositoryError>;

    /// Delete a course and, through ownership, its modules and materials.
    ///
    /// Deleting an absent id succeeds.
    async fn delete_by_id(&self, id: CourseId) -> Result<(), CatalogueRepositoryError>;

    /// Courses whose title or description contains either keyword, ignoring
    /// case. A blank keyword matches nothing.
    async fn search_by_keywords(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Vec<Course>, CatalogueRepositoryError>;

    /// Courses whose level equals `level` exactly.
    async fn find_by_level(&self, level: &str) -> Result<Vec<Course>, CatalogueRepositoryError>;

    /// Courses starting within `from..=to`.
    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Course>, CatalogueRepositoryError>;

    /// Courses with any tag containing `tag`, ignoring case.
    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Course>, CatalogueRepositoryError>;

    /// Every course by start date ascending, undated courses last.
    async fn find_all_ordered_by_start_date(&self) -> Result<Vec<Course>, CatalogueRepositoryError>;

    /// Every course by duration descending, courses without a duration last.
    async fn find_all_ordered_by_duration_desc(
        &self,
    ) -> Result<Vec<Course>, CatalogueRepositoryError>;

    /// Course totals per subject, for subjects with at least one course.
    async fn count_by_subject(&self) -> Result<Vec<SubjectCourseCount>, CatalogueRepositoryError>;
}
