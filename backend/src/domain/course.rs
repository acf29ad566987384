//! Courses: the central catalogue entity.
//!
//! A course optionally belongs to a subject and owns its modules and
//! materials. Deleting a course removes both collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::course_module::CourseModule;
use super::ids::{CourseId, SubjectId};
use super::material::Material;
use super::validation::{
    CatalogueValidationError, DESCRIPTION_MAX_CHARS, check_duration, check_max_chars, require_text,
};

/// Mutable field set of a course, used for creation and full replacement.
///
/// # Examples
/// ```
/// use course_catalogue::domain::CourseDraft;
///
/// let mut draft = CourseDraft::new("Java Basics");
/// draft.description = Some("Learn the fundamentals of Java".to_owned());
/// assert!(draft.validate().is_ok());
///
/// assert!(CourseDraft::new("  ").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub subject_id: Option<SubjectId>,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub duration_minutes: Option<u32>,
    pub tags: Vec<String>,
}

impl CourseDraft {
    /// Start a draft with only the required title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Check the required title, the duration bound and the description budget.
    ///
    /// # Errors
    /// Returns [`CatalogueValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CatalogueValidationError> {
        require_text("title", &self.title)?;
        check_duration("duration", self.duration_minutes)?;
        check_max_chars("description", self.description.as_deref(), DESCRIPTION_MAX_CHARS)
    }
}

/// A persisted course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub subject_id: Option<SubjectId>,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub duration_minutes: Option<u32>,
    pub tags: Vec<String>,
}

impl Course {
    /// Attach a store-assigned id to a draft.
    #[must_use]
    pub fn new(id: CourseId, draft: CourseDraft) -> Self {
        let CourseDraft {
            subject_id,
            title,
            description,
            level,
            start_date,
            duration_minutes,
            tags,
        } = draft;
        Self {
            id,
            subject_id,
            title,
            description,
            level,
            start_date,
            duration_minutes,
            tags,
        }
    }

    /// Copy the mutable fields back into a draft.
    #[must_use]
    pub fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            subject_id: self.subject_id,
            title: self.title.clone(),
            description: self.description.clone(),
            level: self.level.clone(),
            start_date: self.start_date,
            duration_minutes: self.duration_minutes,
            tags: self.tags.clone(),
        }
    }
}

/// A course together with its materials and modules, as returned to clients.
///
/// Modules are listed in position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub course: Course,
    pub materials: Vec<Material>,
    pub modules: Vec<CourseModule>,
}
