//! Course module HTTP handlers.
//!
//! ```text
//! POST   /api/v1/modules
//! GET    /api/v1/modules
//! GET    /api/v1/modules/{id}
//! PUT    /api/v1/modules/{id}
//! DELETE /api/v1/modules/{id}
//! GET    /api/v1/modules/course/{courseId}?orderBy=position|duration
//! GET    /api/v1/modules/search?keyword1=&keyword2=
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CourseModuleFilter, ModuleOrder};
use crate::domain::{CourseId, CourseModule, CourseModuleDraft, CourseModuleId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, KeywordQuery, invalid_order_error, missing_field_error, parse_duration, parse_id,
    require_text,
};

/// Request payload for creating or replacing a module.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRequestBody {
    pub course_id: Option<i64>,
    #[schema(example = "Dependency injection")]
    pub title: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    /// Position within the course; defaults to 0.
    pub order: Option<i32>,
    /// Length in minutes.
    pub duration: Option<i64>,
}

/// Module as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResponseBody {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub order: i32,
    pub duration: Option<u32>,
}

impl From<CourseModule> for ModuleResponseBody {
    fn from(value: CourseModule) -> Self {
        Self {
            id: value.id.get(),
            course_id: value.course_id.get(),
            title: value.title,
            content: value.content,
            video_url: value.video_url,
            order: value.position,
            duration: value.duration_minutes,
        }
    }
}

pub(crate) fn to_bodies(modules: Vec<CourseModule>) -> Vec<ModuleResponseBody> {
    modules.into_iter().map(ModuleResponseBody::from).collect()
}

fn parse_module_payload(payload: ModuleRequestBody) -> Result<CourseModuleDraft, Error> {
    let course_id = payload
        .course_id
        .ok_or_else(|| missing_field_error(FieldName::new("courseId")))?;
    Ok(CourseModuleDraft {
        course_id: CourseId::new(course_id),
        title: require_text(payload.title, FieldName::new("title"))?,
        content: payload.content,
        video_url: payload.video_url,
        position: payload.order.unwrap_or_default(),
        duration_minutes: parse_duration(payload.duration, FieldName::new("duration"))?,
    })
}

fn module_id(raw: &str) -> Result<CourseModuleId, Error> {
    parse_id(raw, FieldName::new("id")).map(CourseModuleId::new)
}

/// Path parameters addressing a single module.
#[derive(Debug, Deserialize)]
pub struct ModulePath {
    id: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/modules",
    request_body = ModuleRequestBody,
    responses(
        (status = 201, description = "Module created", body = ModuleResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course not found", body = String, content_type = "text/plain")
    ),
    tags = ["modules"],
    operation_id = "createModule"
)]
#[post("/modules")]
pub async fn create_module(
    state: web::Data<HttpState>,
    payload: web::Json<ModuleRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_module_payload(payload.into_inner())?;
    let module = state.modules.create_module(draft).await?;
    Ok(HttpResponse::Created().json(ModuleResponseBody::from(module)))
}

#[utoipa::path(
    get,
    path = "/api/v1/modules",
    responses(
        (status = 200, description = "All modules", body = [ModuleResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["modules"],
    operation_id = "listModules"
)]
#[get("/modules")]
pub async fn list_modules(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ModuleResponseBody>>> {
    let modules = state.modules_query.list_modules().await?;
    Ok(web::Json(to_bodies(modules)))
}

#[utoipa::path(
    get,
    path = "/api/v1/modules/{id}",
    params(("id" = i64, Path, description = "Module identifier")),
    responses(
        (status = 200, description = "Module", body = ModuleResponseBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Module not found", body = String, content_type = "text/plain")
    ),
    tags = ["modules"],
    operation_id = "getModule"
)]
#[get("/modules/{id}")]
pub async fn get_module(
    state: web::Data<HttpState>,
    path: web::Path<ModulePath>,
) -> ApiResult<web::Json<ModuleResponseBody>> {
    let id = module_id(&path.id)?;
    let module = state.modules_query.get_module(id).await?;
    Ok(web::Json(ModuleResponseBody::from(module)))
}

/// Replace every mutable field of a module, possibly moving it to another
/// course.
#[utoipa::path(
    put,
    path = "/api/v1/modules/{id}",
    params(("id" = i64, Path, description = "Module identifier")),
    request_body = ModuleRequestBody,
    responses(
        (status = 200, description = "Module replaced", body = ModuleResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Module or course not found", body = String, content_type = "text/plain")
    ),
    tags = ["modules"],
    operation_id = "updateModule"
)]
#[put("/modules/{id}")]
pub async fn update_module(
    state: web::Data<HttpState>,
    path: web::Path<ModulePath>,
    payload: web::Json<ModuleRequestBody>,
) -> ApiResult<web::Json<ModuleResponseBody>> {
    let id = module_id(&path.id)?;
    let draft = parse_module_payload(payload.into_inner())?;
    let module = state.modules.update_module(id, draft).await?;
    Ok(web::Json(ModuleResponseBody::from(module)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/modules/{id}",
    params(("id" = i64, Path, description = "Module identifier")),
    responses(
        (status = 204, description = "Module deleted"),
        (status = 404, description = "Module not found", body = String, content_type = "text/plain")
    ),
    tags = ["modules"],
    operation_id = "deleteModule"
)]
#[delete("/modules/{id}")]
pub async fn delete_module(
    state: web::Data<HttpState>,
    path: web::Path<ModulePath>,
) -> ApiResult<HttpResponse> {
    let id = module_id(&path.id)?;
    state.modules.delete_module(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Path parameter naming a course.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePath {
    course_id: String,
}

/// Ordering of a course's modules.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOrderQuery {
    /// `position` or `duration`; identifier order when absent.
    pub order_by: Option<String>,
}

fn parse_order(raw: Option<&str>) -> Result<ModuleOrder, Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ModuleOrder::Id),
        Some(value) if value.eq_ignore_ascii_case("position") => Ok(ModuleOrder::Position),
        Some(value) if value.eq_ignore_ascii_case("duration") => Ok(ModuleOrder::DurationDesc),
        Some(value) => Err(invalid_order_error(
            FieldName::new("orderBy"),
            value,
            &["position", "duration"],
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/modules/course/{courseId}",
    params(
        ("courseId" = i64, Path, description = "Course identifier"),
        ("orderBy" = Option<String>, Query, description = "position or duration")
    ),
    responses(
        (status = 200, description = "Modules of the course", body = [ModuleResponseBody]),
        (status = 400, description = "Invalid identifier or ordering", body = ErrorSchema)
    ),
    tags = ["modules"],
    operation_id = "listModulesByCourse"
)]
#[get("/modules/course/{courseId}")]
pub async fn modules_by_course(
    state: web::Data<HttpState>,
    path: web::Path<CoursePath>,
    query: web::Query<ModuleOrderQuery>,
) -> ApiResult<web::Json<Vec<ModuleResponseBody>>> {
    let course_id = parse_id(&path.course_id, FieldName::new("courseId"))?;
    let order = parse_order(query.order_by.as_deref())?;
    let modules = state
        .modules_query
        .find_modules(CourseModuleFilter::Course {
            course_id: CourseId::new(course_id),
            order,
        })
        .await?;
    Ok(web::Json(to_bodies(modules)))
}

/// Modules whose title or content mentions either keyword.
#[utoipa::path(
    get,
    path = "/api/v1/modules/search",
    params(
        ("keyword1" = String, Query, description = "First keyword"),
        ("keyword2" = String, Query, description = "Second keyword")
    ),
    responses(
        (status = 200, description = "Matching modules", body = [ModuleResponseBody])
    ),
    tags = ["modules"],
    operation_id = "searchModules"
)]
#[get("/modules/search")]
pub async fn search_modules(
    state: web::Data<HttpState>,
    query: web::Query<KeywordQuery>,
) -> ApiResult<web::Json<Vec<ModuleResponseBody>>> {
    let (first, second) = query.into_inner().into_pair();
    let modules = state
        .modules_query
        .find_modules(CourseModuleFilter::Keywords { first, second })
        .await?;
    Ok(web::Json(to_bodies(modules)))
}

/// Register module routes, literal segments ahead of `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_module)
        .service(list_modules)
        .service(search_modules)
        .service(modules_by_course)
        .service(get_module)
        .service(update_module)
        .service(delete_module);
}

#[cfg(test)]
#[path = "modules_tests.rs"]
mod tests;
