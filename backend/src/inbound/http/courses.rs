//! Course HTTP handlers.
//!
//! ```text
//! POST   /api/v1/courses
//! GET    /api/v1/courses
//! GET    /api/v1/courses/{id}
//! PUT    /api/v1/courses/{id}
//! DELETE /api/v1/courses/{id}
//! GET    /api/v1/courses/search?keyword1=&keyword2=
//! GET    /api/v1/courses/level/{level}
//! GET    /api/v1/courses/start-date?from=&to=
//! GET    /api/v1/courses/tag/{tag}
//! GET    /api/v1/courses/sorted/start-date
//! GET    /api/v1/courses/sorted/duration
//! GET    /api/v1/courses/{id}/materials
//! GET    /api/v1/courses/{id}/modules
//! ```
//!
//! Course bodies embed the course's materials and modules in full.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CourseFilter;
use crate::domain::{CourseDetail, CourseDraft, CourseId, Error, SubjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::materials::{self, MaterialResponseBody};
use crate::inbound::http::modules::{self, ModuleResponseBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, KeywordQuery, check_description, parse_duration, parse_id, parse_optional_date,
    require_date, require_text,
};

/// Request payload for creating or replacing a course.
///
/// Fields left out are cleared on update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequestBody {
    pub subject_id: Option<i64>,
    /// Also accepted as `name`.
    #[serde(alias = "name")]
    #[schema(example = "Java Basics")]
    pub title: Option<String>,
    #[schema(max_length = 1000)]
    pub description: Option<String>,
    #[schema(example = "Beginner")]
    pub level: Option<String>,
    #[schema(format = "date", example = "2025-03-01")]
    pub start_date: Option<String>,
    /// Length in minutes.
    pub duration: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Course as returned to clients, with its materials and modules.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponseBody {
    pub id: i64,
    pub subject_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    #[schema(format = "date")]
    pub start_date: Option<String>,
    pub duration: Option<u32>,
    pub tags: Vec<String>,
    pub materials: Vec<MaterialResponseBody>,
    pub modules: Vec<ModuleResponseBody>,
}

impl From<CourseDetail> for CourseResponseBody {
    fn from(value: CourseDetail) -> Self {
        let CourseDetail {
            course,
            materials,
            modules,
        } = value;
        Self {
            id: course.id.get(),
            subject_id: course.subject_id.map(SubjectId::get),
            title: course.title,
            description: course.description,
            level: course.level,
            start_date: course.start_date.map(|date| date.format("%Y-%m-%d").to_string()),
            duration: course.duration_minutes,
            tags: course.tags,
            materials: materials::to_bodies(materials),
            modules: modules::to_bodies(modules),
        }
    }
}

fn to_bodies(courses: Vec<CourseDetail>) -> Vec<CourseResponseBody> {
    courses.into_iter().map(CourseResponseBody::from).collect()
}

fn parse_course_payload(payload: CourseRequestBody) -> Result<CourseDraft, Error> {
    Ok(CourseDraft {
        subject_id: payload.subject_id.map(SubjectId::new),
        title: require_text(payload.title, FieldName::new("title"))?,
        description: check_description(payload.description, FieldName::new("description"))?,
        level: payload.level,
        start_date: parse_optional_date(payload.start_date, FieldName::new("startDate"))?,
        duration_minutes: parse_duration(payload.duration, FieldName::new("duration"))?,
        tags: payload.tags,
    })
}

fn course_id(raw: &str) -> Result<CourseId, Error> {
    parse_id(raw, FieldName::new("id")).map(CourseId::new)
}

/// Path parameters addressing a single course.
#[derive(Debug, Deserialize)]
pub struct CoursePath {
    id: String,
}

async fn find(state: &HttpState, filter: CourseFilter) -> ApiResult<web::Json<Vec<CourseResponseBody>>> {
    let courses = state.courses_query.find_courses(filter).await?;
    Ok(web::Json(to_bodies(courses)))
}

/// Create a course.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use course_catalogue::inbound::http::ApiResult;
/// use course_catalogue::inbound::http::courses::{CourseRequestBody, create_course};
/// use course_catalogue::inbound::http::state::HttpState;
///
/// async fn call_handler(state: web::Data<HttpState>) -> ApiResult<actix_web::HttpResponse> {
///     let payload = web::Json(CourseRequestBody {
///         title: Some("Java Basics".to_owned()),
///         start_date: Some("2025-03-01".to_owned()),
///         tags: vec!["Java".to_owned()],
///         ..CourseRequestBody::default()
///     });
///     create_course(state, payload).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CourseRequestBody,
    responses(
        (status = 201, description = "Course created", body = CourseResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Subject not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_course_payload(payload.into_inner())?;
    let detail = state.courses.create_course(draft).await?;
    Ok(HttpResponse::Created().json(CourseResponseBody::from(detail)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "All courses", body = [CourseResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseResponseBody>>> {
    let courses = state.courses_query.list_courses().await?;
    Ok(web::Json(to_bodies(courses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseResponseBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Course not found", body = String, content_type = "text/plain")
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<CoursePath>,
) -> ApiResult<web::Json<CourseResponseBody>> {
    let id = course_id(&path.id)?;
    let detail = state.courses_query.get_course(id).await?;
    Ok(web::Json(CourseResponseBody::from(detail)))
}

/// Replace every mutable field of a course.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    request_body = CourseRequestBody,
    responses(
        (status = 200, description = "Course replaced", body = CourseResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course or subject not found", body = String, content_type = "text/plain")
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<CoursePath>,
    payload: web::Json<CourseRequestBody>,
) -> ApiResult<web::Json<CourseResponseBody>> {
    let id = course_id(&path.id)?;
    let draft = parse_course_payload(payload.into_inner())?;
    let detail = state.courses.update_course(id, draft).await?;
    Ok(web::Json(CourseResponseBody::from(detail)))
}

/// Delete a course together with its modules and materials.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = String, content_type = "text/plain")
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<CoursePath>,
) -> ApiResult<HttpResponse> {
    let id = course_id(&path.id)?;
    state.courses.delete_course(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Courses whose title or description mentions either keyword.
///
/// A blank or missing keyword yields an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/courses/search",
    params(
        ("keyword1" = String, Query, description = "First keyword"),
        ("keyword2" = String, Query, description = "Second keyword")
    ),
    responses(
        (status = 200, description = "Matching courses", body = [CourseResponseBody])
    ),
    tags = ["courses"],
    operation_id = "searchCourses"
)]
#[get("/courses/search")]
pub async fn search_courses(
    state: web::Data<HttpState>,
    query: web::Query<KeywordQuery>,
) -> ApiResult<web::Json<Vec<CourseResponseBody>>> {
    let (first, second) = query.into_inner().into_pair();
    find(&state, CourseFilter::Keywords { first, second }).await
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/level/{level}",
    params(("level" = String, Path, description = "Exact course level")),
    responses(
        (status = 200, description = "Courses at the level", body = [CourseResponseBody])
    ),
    tags = ["courses"],
    operation_id = "listCoursesByLevel"
)]
#[get("/courses/level/{level}")]
pub async fn courses_by_level(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CourseResponseBody>>> {
    find(&state, CourseFilter::Level(path.into_inner())).await
}

/// Date range for the start-date query.
#[derive(Debug, Default, Deserialize)]
pub struct StartDateQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Courses starting between `from` and `to`, both inclusive.
#[utoipa::path(
    get,
    path = "/api/v1/courses/start-date",
    params(
        ("from" = String, Query, description = "First start date, inclusive"),
        ("to" = String, Query, description = "Last start date, inclusive")
    ),
    responses(
        (status = 200, description = "Courses starting in the range", body = [CourseResponseBody]),
        (status = 400, description = "Missing or malformed date", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCoursesByStartDate"
)]
#[get("/courses/start-date")]
pub async fn courses_by_start_date(
    state: web::Data<HttpState>,
    query: web::Query<StartDateQuery>,
) -> ApiResult<web::Json<Vec<CourseResponseBody>>> {
    let StartDateQuery { from, to } = query.into_inner();
    let from = require_date(from, FieldName::new("from"))?;
    let to = require_date(to, FieldName::new("to"))?;
    find(&state, CourseFilter::StartDateBetween { from, to }).await
}

/// Courses carrying a tag, compared without regard to case.
#[utoipa::path(
    get,
    path = "/api/v1/courses/tag/{tag}",
    params(("tag" = String, Path, description = "Tag to look for")),
    responses(
        (status = 200, description = "Tagged courses", body = [CourseResponseBody])
    ),
    tags = ["courses"],
    operation_id = "listCoursesByTag"
)]
#[get("/courses/tag/{tag}")]
pub async fn courses_by_tag(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CourseResponseBody>>> {
    find(&state, CourseFilter::Tag(path.into_inner())).await
}

/// Courses by ascending start date; undated courses come last.
#[utoipa::path(
    get,
    path = "/api/v1/courses/sorted/start-date",
    responses(
        (status = 200, description = "Courses by start date", body = [CourseResponseBody])
    ),
    tags = ["courses"],
    operation_id = "listCoursesSortedByStartDate"
)]
#[get("/courses/sorted/start-date")]
pub async fn courses_sorted_by_start_date(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseResponseBody>>> {
    find(&state, CourseFilter::OrderedByStartDate).await
}

/// Courses by descending duration; courses without one come last.
#[utoipa::path(
    get,
    path = "/api/v1/courses/sorted/duration",
    responses(
        (status = 200, description = "Courses by duration", body = [CourseResponseBody])
    ),
    tags = ["courses"],
    operation_id = "listCoursesSortedByDuration"
)]
#[get("/courses/sorted/duration")]
pub async fn courses_sorted_by_duration(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseResponseBody>>> {
    find(&state, CourseFilter::OrderedByDurationDesc).await
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/materials",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Materials of the course", body = [MaterialResponseBody]),
        (status = 404, description = "Course not found", body = String, content_type = "text/plain")
    ),
    tags = ["courses"],
    operation_id = "listCourseMaterials"
)]
#[get("/courses/{id}/materials")]
pub async fn course_materials(
    state: web::Data<HttpState>,
    path: web::Path<CoursePath>,
) -> ApiResult<web::Json<Vec<MaterialResponseBody>>> {
    let id = course_id(&path.id)?;
    let found = state.courses_query.materials_for_course(id).await?;
    Ok(web::Json(materials::to_bodies(found)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/modules",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Modules of the course in position order", body = [ModuleResponseBody]),
        (status = 404, description = "Course not found", body = String, content_type = "text/plain")
    ),
    tags = ["courses"],
    operation_id = "listCourseModules"
)]
#[get("/courses/{id}/modules")]
pub async fn course_modules(
    state: web::Data<HttpState>,
    path: web::Path<CoursePath>,
) -> ApiResult<web::Json<Vec<ModuleResponseBody>>> {
    let id = course_id(&path.id)?;
    let found = state.courses_query.modules_for_course(id).await?;
    Ok(web::Json(modules::to_bodies(found)))
}

/// Register course routes, literal segments ahead of `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_course)
        .service(list_courses)
        .service(search_courses)
        .service(courses_by_start_date)
        .service(courses_by_level)
        .service(courses_by_tag)
        .service(courses_sorted_by_start_date)
        .service(courses_sorted_by_duration)
        .service(course_materials)
        .service(course_modules)
        .service(get_course)
        .service(update_course)
        .service(delete_course);
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
