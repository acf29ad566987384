//! Domain primitives, services and ports for the course catalogue.
//!
//! Purpose: define the catalogue entities (subjects, courses, course
//! modules and materials), the ports adapters implement, and the services
//! that enforce validation, not-found semantics and cache invalidation.
//! Types here are transport agnostic; inbound adapters own the wire shapes.
//!
//! Public surface:
//! - Error / ErrorCode: error payload and stable error identifier.
//! - Entity types with their `*Draft` inputs and `*Id` newtypes.
//! - `CourseService`, `CourseModuleService`, `MaterialService` and
//!   `SubjectService`, the driving port implementations.

pub mod error;
pub mod ports;
pub mod trace_id;

mod catalogue_service_support;
mod course;
mod course_module;
mod course_module_service;
mod course_service;
mod ids;
mod material;
mod material_service;
mod search;
mod subject;
mod subject_service;
mod validation;

pub use self::course::{Course, CourseDetail, CourseDraft};
pub use self::course_module::{CourseModule, CourseModuleDraft};
pub use self::course_module_service::CourseModuleService;
pub use self::course_service::CourseService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CourseId, CourseModuleId, MaterialId, SubjectId};
pub use self::material::{Material, MaterialDraft, MaterialType, UnknownMaterialType};
pub use self::material_service::MaterialService;
pub use self::search::{
    KeywordPair, contains_ignore_case, escape_like, like_contains_pattern, tags_contain,
};
pub use self::subject::{Subject, SubjectCourseCount, SubjectDraft};
pub use self::subject_service::SubjectService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{
    CatalogueValidationError, DESCRIPTION_MAX_CHARS, DURATION_MAX_MINUTES,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use course_catalogue::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Course not found with ID: 1"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
