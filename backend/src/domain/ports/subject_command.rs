//! Driving port for subject mutations.

use async_trait::async_trait;

use crate::domain::{Error, Subject, SubjectDraft, SubjectId};

/// Driving port for subject write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectCommand: Send + Sync {
    /// Validate and persist a new subject.
    async fn create_subject(&self, draft: SubjectDraft) -> Result<Subject, Error>;

    /// Replace every mutable field of an existing subject.
    async fn update_subject(&self, id: SubjectId, draft: SubjectDraft) -> Result<Subject, Error>;

    /// Delete an existing subject along with all of its courses.
    async fn delete_subject(&self, id: SubjectId) -> Result<(), Error>;
}
