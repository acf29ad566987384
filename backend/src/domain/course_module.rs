//! Course modules: ordered units of content within a course.

use serde::{Deserialize, Serialize};

use super::ids::{CourseId, CourseModuleId};
use super::validation::{CatalogueValidationError, check_duration, require_text};

/// Mutable field set of a module, used for creation and full replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModuleDraft {
    pub course_id: CourseId,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    /// Sequence of the module within its course.
    pub position: i32,
    pub duration_minutes: Option<u32>,
}

impl CourseModuleDraft {
    /// Start a draft with the owning course and title set.
    pub fn new(course_id: CourseId, title: impl Into<String>) -> Self {
        Self {
            course_id,
            title: title.into(),
            content: None,
            video_url: None,
            position: 0,
            duration_minutes: None,
        }
    }

    /// Check the required title and the duration bound.
    ///
    /// # Errors
    /// Returns [`CatalogueValidationError::MissingField`] for a blank title and
    /// [`CatalogueValidationError::DurationTooLong`] for an oversized duration.
    pub fn validate(&self) -> Result<(), CatalogueValidationError> {
        require_text("title", &self.title)?;
        check_duration("duration", self.duration_minutes)
    }
}

/// A persisted module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: CourseModuleId,
    pub course_id: CourseId,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub position: i32,
    pub duration_minutes: Option<u32>,
}

impl CourseModule {
    /// Attach a store-assigned id to a draft.
    #[must_use]
    pub fn new(id: CourseModuleId, draft: CourseModuleDraft) -> Self {
        let CourseModuleDraft {
            course_id,
            title,
            content,
            video_url,
            position,
            duration_minutes,
        } = draft;
        Self {
            id,
            course_id,
            title,
            content,
            video_url,
            position,
            duration_minutes,
        }
    }

    /// Copy the mutable fields back into a draft.
    #[must_use]
    pub fn to_draft(&self) -> CourseModuleDraft {
        CourseModuleDraft {
            course_id: self.course_id,
            title: self.title.clone(),
            content: self.content.clone(),
            video_url: self.video_url.clone(),
            position: self.position,
            duration_minutes: self.duration_minutes,
        }
    }
}
