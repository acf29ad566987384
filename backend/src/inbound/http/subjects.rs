//! Subject HTTP handlers.
//!
//! ```text
//! POST   /api/v1/subjects
//! GET    /api/v1/subjects
//! GET    /api/v1/subjects/{id}
//! PUT    /api/v1/subjects/{id}
//! DELETE /api/v1/subjects/{id}
//! GET    /api/v1/subjects/search?keyword1=&keyword2=
//! GET    /api/v1/subjects/category/{category}
//! GET    /api/v1/subjects/tag/{tag}
//! GET    /api/v1/subjects/course-counts
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SubjectFilter;
use crate::domain::{Error, Subject, SubjectCourseCount, SubjectDraft, SubjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, KeywordQuery, check_description, parse_id, require_text,
};

/// Request payload for creating or replacing a subject.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequestBody {
    #[schema(example = "Computer Science")]
    pub name: Option<String>,
    #[schema(max_length = 1000)]
    pub description: Option<String>,
    #[schema(example = "Engineering")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Subject as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponseBody {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl From<Subject> for SubjectResponseBody {
    fn from(value: Subject) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            description: value.description,
            category: value.category,
            tags: value.tags,
        }
    }
}

/// Number of courses filed under a subject.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCourseCountBody {
    pub subject_id: i64,
    pub course_count: u64,
}

impl From<SubjectCourseCount> for SubjectCourseCountBody {
    fn from(value: SubjectCourseCount) -> Self {
        Self {
            subject_id: value.subject_id.get(),
            course_count: value.course_count,
        }
    }
}

fn to_bodies(subjects: Vec<Subject>) -> Vec<SubjectResponseBody> {
    subjects.into_iter().map(SubjectResponseBody::from).collect()
}

fn parse_subject_payload(payload: SubjectRequestBody) -> Result<SubjectDraft, Error> {
    Ok(SubjectDraft {
        name: require_text(payload.name, FieldName::new("name"))?,
        description: check_description(payload.description, FieldName::new("description"))?,
        category: payload.category,
        tags: payload.tags,
    })
}

fn subject_id(raw: &str) -> Result<SubjectId, Error> {
    parse_id(raw, FieldName::new("id")).map(SubjectId::new)
}

/// Path parameters addressing a single subject.
#[derive(Debug, Deserialize)]
pub struct SubjectPath {
    id: String,
}

async fn find(
    state: &HttpState,
    filter: SubjectFilter,
) -> ApiResult<web::Json<Vec<SubjectResponseBody>>> {
    let subjects = state.subjects_query.find_subjects(filter).await?;
    Ok(web::Json(to_bodies(subjects)))
}

#[utoipa::path(
    post,
    path = "/api/v1/subjects",
    request_body = SubjectRequestBody,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "createSubject"
)]
#[post("/subjects")]
pub async fn create_subject(
    state: web::Data<HttpState>,
    payload: web::Json<SubjectRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_subject_payload(payload.into_inner())?;
    let subject = state.subjects.create_subject(draft).await?;
    Ok(HttpResponse::Created().json(SubjectResponseBody::from(subject)))
}

#[utoipa::path(
    get,
    path = "/api/v1/subjects",
    responses(
        (status = 200, description = "All subjects", body = [SubjectResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "listSubjects"
)]
#[get("/subjects")]
pub async fn list_subjects(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SubjectResponseBody>>> {
    let subjects = state.subjects_query.list_subjects().await?;
    Ok(web::Json(to_bodies(subjects)))
}

#[utoipa::path(
    get,
    path = "/api/v1/subjects/{id}",
    params(("id" = i64, Path, description = "Subject identifier")),
    responses(
        (status = 200, description = "Subject", body = SubjectResponseBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Subject not found", body = String, content_type = "text/plain")
    ),
    tags = ["subjects"],
    operation_id = "getSubject"
)]
#[get("/subjects/{id}")]
pub async fn get_subject(
    state: web::Data<HttpState>,
    path: web::Path<SubjectPath>,
) -> ApiResult<web::Json<SubjectResponseBody>> {
    let id = subject_id(&path.id)?;
    let subject = state.subjects_query.get_subject(id).await?;
    Ok(web::Json(SubjectResponseBody::from(subject)))
}

#[utoipa::path(
    put,
    path = "/api/v1/subjects/{id}",
    params(("id" = i64, Path, description = "Subject identifier")),
    request_body = SubjectRequestBody,
    responses(
        (status = 200, description = "Subject replaced", body = SubjectResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Subject not found", body = String, content_type = "text/plain")
    ),
    tags = ["subjects"],
    operation_id = "updateSubject"
)]
#[put("/subjects/{id}")]
pub async fn update_subject(
    state: web::Data<HttpState>,
    path: web::Path<SubjectPath>,
    payload: web::Json<SubjectRequestBody>,
) -> ApiResult<web::Json<SubjectResponseBody>> {
    let id = subject_id(&path.id)?;
    let draft = parse_subject_payload(payload.into_inner())?;
    let subject = state.subjects.update_subject(id, draft).await?;
    Ok(web::Json(SubjectResponseBody::from(subject)))
}

/// Delete a subject and every course filed under it.
#[utoipa::path(
    delete,
    path = "/api/v1/subjects/{id}",
    params(("id" = i64, Path, description = "Subject identifier")),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 404, description = "Subject not found", body = String, content_type = "text/plain")
    ),
    tags = ["subjects"],
    operation_id = "deleteSubject"
)]
#[delete("/subjects/{id}")]
pub async fn delete_subject(
    state: web::Data<HttpState>,
    path: web::Path<SubjectPath>,
) -> ApiResult<HttpResponse> {
    let id = subject_id(&path.id)?;
    state.subjects.delete_subject(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Subjects whose name or description mentions either keyword.
#[utoipa::path(
    get,
    path = "/api/v1/subjects/search",
    params(
        ("keyword1" = String, Query, description = "First keyword"),
        ("keyword2" = String, Query, description = "Second keyword")
    ),
    responses(
        (status = 200, description = "Matching subjects", body = [SubjectResponseBody])
    ),
    tags = ["subjects"],
    operation_id = "searchSubjects"
)]
#[get("/subjects/search")]
pub async fn search_subjects(
    state: web::Data<HttpState>,
    query: web::Query<KeywordQuery>,
) -> ApiResult<web::Json<Vec<SubjectResponseBody>>> {
    let (first, second) = query.into_inner().into_pair();
    find(&state, SubjectFilter::Keywords { first, second }).await
}

#[utoipa::path(
    get,
    path = "/api/v1/subjects/category/{category}",
    params(("category" = String, Path, description = "Exact category")),
    responses(
        (status = 200, description = "Subjects in the category", body = [SubjectResponseBody])
    ),
    tags = ["subjects"],
    operation_id = "listSubjectsByCategory"
)]
#[get("/subjects/category/{category}")]
pub async fn subjects_by_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SubjectResponseBody>>> {
    find(&state, SubjectFilter::Category(path.into_inner())).await
}

#[utoipa::path(
    get,
    path = "/api/v1/subjects/tag/{tag}",
    params(("tag" = String, Path, description = "Tag to look for, ignoring case")),
    responses(
        (status = 200, description = "Tagged subjects", body = [SubjectResponseBody])
    ),
    tags = ["subjects"],
    operation_id = "listSubjectsByTag"
)]
#[get("/subjects/tag/{tag}")]
pub async fn subjects_by_tag(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SubjectResponseBody>>> {
    find(&state, SubjectFilter::Tag(path.into_inner())).await
}

/// Course totals per subject, skipping subjects without courses.
#[utoipa::path(
    get,
    path = "/api/v1/subjects/course-counts",
    responses(
        (status = 200, description = "Course totals", body = [SubjectCourseCountBody])
    ),
    tags = ["subjects"],
    operation_id = "countCoursesBySubject"
)]
#[get("/subjects/course-counts")]
pub async fn subject_course_counts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SubjectCourseCountBody>>> {
    let counts = state.subjects_query.course_counts().await?;
    Ok(web::Json(
        counts.into_iter().map(SubjectCourseCountBody::from).collect(),
    ))
}

/// Register subject routes, literal segments ahead of `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_subject)
        .service(list_subjects)
        .service(search_subjects)
        .service(subject_course_counts)
        .service(subjects_by_category)
        .service(subjects_by_tag)
        .service(get_subject)
        .service(update_subject)
        .service(delete_subject);
}

#[cfg(test)]
#[path = "subjects_tests.rs"]
mod tests;
