//! Driving port for course mutations.

use async_trait::async_trait;

use crate::domain::{CourseDetail, CourseDraft, CourseId, Error};

/// Driving port for course write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Validate and persist a new course, returning it with its assigned id.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use course_catalogue::domain::{CourseDraft, CourseService};
    /// # use course_catalogue::domain::ports::{CourseCommand, NoOpCourseCache};
    /// # use course_catalogue::outbound::memory::InMemoryCatalogue;
    /// # async fn example() -> Result<(), course_catalogue::domain::Error> {
    /// let store = Arc::new(InMemoryCatalogue::new());
    /// let service = CourseService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(NoOpCourseCache),
    /// );
    /// let created = service.create_course(CourseDraft::new("Java Basics")).await?;
    /// assert_eq!(created.course.title, "Java Basics");
    /// # Ok(())
    /// # }
    /// ```
    async fn create_course(&self, draft: CourseDraft) -> Result<CourseDetail, Error>;

    /// Replace every mutable field of an existing course.
    ///
    /// Fails with a not-found error when `id` does not exist.
    async fn update_course(&self, id: CourseId, draft: CourseDraft) -> Result<CourseDetail, Error>;

    /// Delete a course with its modules and materials.
    ///
    /// Fails with a not-found error when `id` does not exist.
    async fn delete_course(&self, id: CourseId) -> Result<(), Error>;
}
