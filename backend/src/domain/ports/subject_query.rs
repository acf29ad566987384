//! Driving port for subject reads.

use async_trait::async_trait;

use crate::domain::{Error, Subject, SubjectCourseCount, SubjectId};

/// Derived subject queries exposed to inbound adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFilter {
    /// Either keyword in name or description.
    Keywords { first: String, second: String },
    /// Exact category match.
    Category(String),
    /// Tag containment, ignoring case.
    Tag(String),
}

/// Driving port for subject read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectQuery: Send + Sync {
    /// Fetch one subject.
    async fn get_subject(&self, id: SubjectId) -> Result<Subject, Error>;

    /// Fetch every subject.
    async fn list_subjects(&self) -> Result<Vec<Subject>, Error>;

    /// Run a derived query.
    async fn find_subjects(&self, filter: SubjectFilter) -> Result<Vec<Subject>, Error>;

    /// Number of courses filed under each subject that has any.
    async fn course_counts(&self) -> Result<Vec<SubjectCourseCount>, Error>;
}
