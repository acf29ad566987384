//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalogue endpoint, the request and response
//! bodies of the inbound layer, and the domain error wrappers
//! ([`ErrorSchema`], [`ErrorCodeSchema`]) that keep utoipa out of the
//! domain types.
//!
//! The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::courses::{CourseRequestBody, CourseResponseBody};
use crate::inbound::http::materials::{MaterialRequestBody, MaterialResponseBody};
use crate::inbound::http::modules::{ModuleRequestBody, ModuleResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::subjects::{
    SubjectCourseCountBody, SubjectRequestBody, SubjectResponseBody,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course catalogue API",
        description = "CRUD and derived queries over subjects, courses, modules and materials."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::search_courses,
        crate::inbound::http::courses::courses_by_level,
        crate::inbound::http::courses::courses_by_start_date,
        crate::inbound::http::courses::courses_by_tag,
        crate::inbound::http::courses::courses_sorted_by_start_date,
        crate::inbound::http::courses::courses_sorted_by_duration,
        crate::inbound::http::courses::course_materials,
        crate::inbound::http::courses::course_modules,
        crate::inbound::http::modules::create_module,
        crate::inbound::http::modules::list_modules,
        crate::inbound::http::modules::get_module,
        crate::inbound::http::modules::update_module,
        crate::inbound::http::modules::delete_module,
        crate::inbound::http::modules::modules_by_course,
        crate::inbound::http::modules::search_modules,
        crate::inbound::http::materials::create_material,
        crate::inbound::http::materials::list_materials,
        crate::inbound::http::materials::get_material,
        crate::inbound::http::materials::update_material,
        crate::inbound::http::materials::delete_material,
        crate::inbound::http::materials::materials_by_course,
        crate::inbound::http::materials::materials_by_subject,
        crate::inbound::http::materials::materials_by_title,
        crate::inbound::http::materials::materials_by_type,
        crate::inbound::http::subjects::create_subject,
        crate::inbound::http::subjects::list_subjects,
        crate::inbound::http::subjects::get_subject,
        crate::inbound::http::subjects::update_subject,
        crate::inbound::http::subjects::delete_subject,
        crate::inbound::http::subjects::search_subjects,
        crate::inbound::http::subjects::subjects_by_category,
        crate::inbound::http::subjects::subjects_by_tag,
        crate::inbound::http::subjects::subject_course_counts,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CourseRequestBody,
        CourseResponseBody,
        ModuleRequestBody,
        ModuleResponseBody,
        MaterialRequestBody,
        MaterialResponseBody,
        SubjectRequestBody,
        SubjectResponseBody,
        SubjectCourseCountBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "courses", description = "Courses with their embedded modules and materials"),
        (name = "modules", description = "Ordered units of course content"),
        (name = "materials", description = "Videos, documents and quizzes attached to courses"),
        (name = "subjects", description = "Disciplines that own courses"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's paths and schema fields.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn course_schema_embeds_children() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let course = schemas.get("CourseResponseBody").expect("course schema");

        for field in ["id", "title", "startDate", "duration", "materials", "modules"] {
            assert_object_schema_has_field(course, field);
        }
    }

    #[rstest]
    #[case("/api/v1/courses")]
    #[case("/api/v1/courses/{id}")]
    #[case("/api/v1/courses/search")]
    #[case("/api/v1/courses/start-date")]
    #[case("/api/v1/courses/{id}/materials")]
    #[case("/api/v1/modules/course/{courseId}")]
    #[case("/api/v1/materials/type/{type}")]
    #[case("/api/v1/subjects/course-counts")]
    #[case("/health/ready")]
    fn document_lists_endpoint(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
