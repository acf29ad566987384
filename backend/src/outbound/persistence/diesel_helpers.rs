//! Shared helpers for the catalogue's Diesel repositories.
//!
//! This module provides:
//! - Error mapping from pool and Diesel errors to [`CatalogueRepositoryError`]
//! - Foreign key violation mapping to `MissingParent`
//! - Search predicates that the query builder cannot express directly

use diesel::BoxableExpression;
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::sql_types::{Bool, Text};
use tracing::warn;

use crate::domain::ports::CatalogueRepositoryError;
use crate::domain::like_contains_pattern;

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::PoolError;

/// Map pool errors to catalogue repository errors.
pub(crate) fn map_pool_error(error: PoolError) -> CatalogueRepositoryError {
    map_basic_pool_error(error, CatalogueRepositoryError::connection)
}

/// Map Diesel errors to catalogue repository errors.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    map_basic_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
    )
}

/// Parent row referenced by a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParentRef {
    entity: &'static str,
    constraint: &'static str,
    id: i64,
}

impl ParentRef {
    /// A course's optional subject.
    pub(crate) fn subject(id: i64) -> Self {
        Self {
            entity: "Subject",
            constraint: "subject_id_fkey",
            id,
        }
    }

    /// The owning course of a module or material.
    pub(crate) fn course(id: i64) -> Self {
        Self {
            entity: "Course",
            constraint: "course_id_fkey",
            id,
        }
    }
}

fn references_parent(parent: ParentRef, message: &str, constraint_name: Option<&str>) -> bool {
    constraint_name.is_some_and(|name| name.contains(parent.constraint))
        || message.contains(parent.constraint)
}

/// Map a write failure, turning foreign key violations on `parent` into
/// `MissingParent` and an update that matched no row into `MissingRow`.
///
/// Unrecognised foreign key violations are logged for monitoring and
/// reported as query errors.
pub(crate) fn map_write_error(
    error: diesel::result::Error,
    parent: Option<ParentRef>,
) -> CatalogueRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if matches!(error, DieselError::NotFound) {
        return CatalogueRepositoryError::missing_row();
    }
    if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = &error {
        let message = info.message();
        let constraint_name = info.constraint_name();
        if let Some(parent) =
            parent.filter(|parent| references_parent(*parent, message, constraint_name))
        {
            return CatalogueRepositoryError::missing_parent(parent.entity, parent.id);
        }
        warn!(
            message,
            constraint_name = ?constraint_name,
            "unrecognised foreign key violation"
        );
        return CatalogueRepositoryError::query("foreign key violation");
    }
    map_diesel_error(error)
}

/// `EXISTS` predicate matching rows where any element of `column` contains
/// `needle`, ignoring case.
///
/// `column` must be a trusted, qualified column name such as
/// `courses.tags`; `needle` is bound as a parameter with LIKE
/// metacharacters escaped.
pub(crate) fn tag_contains<QS: 'static>(
    column: &'static str,
    needle: &str,
) -> Box<dyn BoxableExpression<QS, Pg, SqlType = Bool>> {
    let prefix = format!("EXISTS (SELECT 1 FROM unnest({column}) AS tag WHERE tag ILIKE ");
    Box::new(
        sql::<Bool>(&prefix)
            .bind::<Text, _>(like_contains_pattern(needle.trim()))
            .sql(")"),
    )
}
