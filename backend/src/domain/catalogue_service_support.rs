//! Error mapping shared by the catalogue services.

use std::fmt::Display;

use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::{CatalogueRepositoryError, CourseCache};
use crate::domain::{CatalogueValidationError, CourseId, Error};

pub(crate) fn map_repository_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::MissingParent { parent, id } => {
            Error::not_found(format!("{parent} not found with ID: {id}"))
        }
        CatalogueRepositoryError::MissingRow => Error::not_found("Record not found"),
        CatalogueRepositoryError::Connection { message } => {
            error!(%message, "catalogue repository unavailable");
            Error::internal(format!("catalogue repository unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            error!(%message, "catalogue repository query failed");
            Error::internal(format!("catalogue repository error: {message}"))
        }
    }
}

pub(crate) fn map_validation_error(error: CatalogueValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

pub(crate) fn not_found(entity: &str, id: impl Display) -> Error {
    Error::not_found(format!("{entity} not found with ID: {id}"))
}

/// Map a failed replace of `id`, reporting a row deleted since the existence
/// check as that entity's not-found error.
pub(crate) fn map_replace_error<I: Display>(
    entity: &'static str,
    id: I,
) -> impl FnOnce(CatalogueRepositoryError) -> Error {
    move |error| match error {
        CatalogueRepositoryError::MissingRow => not_found(entity, id),
        other => map_repository_error(other),
    }
}

/// Drop a cached course detail, logging rather than failing on cache errors.
pub(crate) async fn evict_cached_course(cache: &dyn CourseCache, id: CourseId) {
    if let Err(err) = cache.evict(id).await {
        warn!(course_id = %id, error = %err, "course cache eviction failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn missing_parent_becomes_not_found() {
        let error = map_repository_error(CatalogueRepositoryError::missing_parent("Course", 3_i64));
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Course not found with ID: 3");
    }

    #[rstest]
    #[case(CatalogueRepositoryError::connection("refused"))]
    #[case(CatalogueRepositoryError::query("syntax"))]
    fn store_failures_become_internal(#[case] error: CatalogueRepositoryError) {
        assert_eq!(map_repository_error(error).code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn vanished_row_on_replace_names_the_entity() {
        let error = map_replace_error("Course", 8_i64)(CatalogueRepositoryError::missing_row());
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Course not found with ID: 8");
    }

    #[rstest]
    fn replace_keeps_missing_parent_message() {
        let error = map_replace_error("Course", 8_i64)(CatalogueRepositoryError::missing_parent(
            "Subject", 2_i64,
        ));
        assert_eq!(error.message(), "Subject not found with ID: 2");
    }

    #[rstest]
    fn validation_errors_name_the_field() {
        let error = map_validation_error(CatalogueValidationError::MissingField { field: "title" });
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({"field": "title", "code": "missing_field"}))
        );
    }
}
