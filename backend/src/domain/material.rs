//! Learning materials attached to a course.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::{CourseId, MaterialId};
use super::validation::{CatalogueValidationError, DESCRIPTION_MAX_CHARS, check_max_chars, require_text};

/// Format of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    Video,
    Pdf,
    Quiz,
}

impl MaterialType {
    /// Canonical upper-case name, as stored and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "VIDEO",
            Self::Pdf => "PDF",
            Self::Quiz => "QUIZ",
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a known [`MaterialType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material type: {0}")]
pub struct UnknownMaterialType(pub String);

impl FromStr for MaterialType {
    type Err = UnknownMaterialType;

    /// Parse a material type, ignoring ASCII case.
    ///
    /// # Examples
    /// ```
    /// use course_catalogue::domain::MaterialType;
    ///
    /// assert_eq!("pdf".parse::<MaterialType>(), Ok(MaterialType::Pdf));
    /// assert!("slides".parse::<MaterialType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Video, Self::Pdf, Self::Quiz]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMaterialType(s.to_owned()))
    }
}

/// Mutable field set of a material, used for creation and full replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDraft {
    pub course_id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub material_type: MaterialType,
    pub url: Option<String>,
}

impl MaterialDraft {
    /// Start a draft with the required fields set.
    pub fn new(course_id: CourseId, title: impl Into<String>, material_type: MaterialType) -> Self {
        Self {
            course_id,
            title: title.into(),
            description: None,
            material_type,
            url: None,
        }
    }

    /// Check the required title and the description budget.
    ///
    /// # Errors
    /// Returns [`CatalogueValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CatalogueValidationError> {
        require_text("title", &self.title)?;
        check_max_chars("description", self.description.as_deref(), DESCRIPTION_MAX_CHARS)
    }
}

/// A persisted material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub course_id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub material_type: MaterialType,
    pub url: Option<String>,
}

impl Material {
    /// Attach a store-assigned id to a draft.
    #[must_use]
    pub fn new(id: MaterialId, draft: MaterialDraft) -> Self {
        let MaterialDraft {
            course_id,
            title,
            description,
            material_type,
            url,
        } = draft;
        Self {
            id,
            course_id,
            title,
            description,
            material_type,
            url,
        }
    }

    /// Copy the mutable fields back into a draft.
    #[must_use]
    pub fn to_draft(&self) -> MaterialDraft {
        MaterialDraft {
            course_id: self.course_id,
            title: self.title.clone(),
            description: self.description.clone(),
            material_type: self.material_type,
            url: self.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("VIDEO", MaterialType::Video)]
    #[case("pdf", MaterialType::Pdf)]
    #[case(" Quiz ", MaterialType::Quiz)]
    fn parses_known_types(#[case] raw: &str, #[case] expected: MaterialType) {
        assert_eq!(raw.parse::<MaterialType>(), Ok(expected));
    }

    #[rstest]
    fn serialises_upper_case() {
        let value = serde_json::to_value(MaterialType::Video).expect("serialise type");
        assert_eq!(value, serde_json::json!("VIDEO"));
    }

    #[rstest]
    fn blank_title_is_rejected() {
        let draft = MaterialDraft::new(CourseId::new(1), "", MaterialType::Pdf);
        let err = draft.validate().expect_err("blank title rejected");
        assert_eq!(err, CatalogueValidationError::MissingField { field: "title" });
    }
}
