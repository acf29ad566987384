//! Subjects group courses by discipline and own them.

use serde::{Deserialize, Serialize};

use super::ids::SubjectId;
use super::validation::{CatalogueValidationError, DESCRIPTION_MAX_CHARS, check_max_chars, require_text};

/// Mutable field set of a subject, used for creation and full replacement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDraft {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl SubjectDraft {
    /// Start a draft with only the required name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check the required name and the description budget.
    ///
    /// # Errors
    /// Returns [`CatalogueValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CatalogueValidationError> {
        require_text("name", &self.name)?;
        check_max_chars("description", self.description.as_deref(), DESCRIPTION_MAX_CHARS)
    }
}

/// A persisted subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl Subject {
    /// Attach a store-assigned id to a draft.
    #[must_use]
    pub fn new(id: SubjectId, draft: SubjectDraft) -> Self {
        let SubjectDraft {
            name,
            description,
            category,
            tags,
        } = draft;
        Self {
            id,
            name,
            description,
            category,
            tags,
        }
    }

    /// Copy the mutable fields back into a draft.
    #[must_use]
    pub fn to_draft(&self) -> SubjectDraft {
        SubjectDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Number of courses filed under one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCourseCount {
    pub subject_id: SubjectId,
    pub course_count: u64,
}
