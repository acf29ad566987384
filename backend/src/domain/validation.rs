//! Field constraints shared by the catalogue drafts.

/// Maximum number of characters allowed in course and material descriptions.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Longest duration, in minutes, that fits the stores' `INTEGER` columns.
pub const DURATION_MAX_MINUTES: u32 = i32::MAX.unsigned_abs();

/// Validation failures raised before a draft reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueValidationError {
    /// A required text field was missing or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// A text field exceeded its character budget.
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// A duration exceeded what the store can hold.
    #[error("{field} must be at most {max} minutes (got {actual})")]
    DurationTooLong {
        field: &'static str,
        max: u32,
        actual: u32,
    },
}

impl CatalogueValidationError {
    /// Name of the offending field as exposed on the wire.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::TooLong { field, .. }
            | Self::DurationTooLong { field, .. } => field,
        }
    }

    /// Stable machine-readable constraint code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::TooLong { .. } => "too_long",
            Self::DurationTooLong { .. } => "invalid_duration",
        }
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), CatalogueValidationError> {
    if value.trim().is_empty() {
        return Err(CatalogueValidationError::MissingField { field });
    }
    Ok(())
}

pub(crate) fn check_max_chars(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), CatalogueValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    let actual = value.chars().count();
    if actual > max {
        return Err(CatalogueValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

pub(crate) fn check_duration(
    field: &'static str,
    minutes: Option<u32>,
) -> Result<(), CatalogueValidationError> {
    match minutes {
        Some(actual) if actual > DURATION_MAX_MINUTES => {
            Err(CatalogueValidationError::DurationTooLong {
                field,
                max: DURATION_MAX_MINUTES,
                actual,
            })
        }
        _ => Ok(()),
    }
}
