//! Material HTTP handlers.
//!
//! ```text
//! POST   /api/v1/materials
//! GET    /api/v1/materials
//! GET    /api/v1/materials/{id}
//! PUT    /api/v1/materials/{id}
//! DELETE /api/v1/materials/{id}
//! GET    /api/v1/materials/course/{courseId}
//! GET    /api/v1/materials/subject/{subjectId}
//! GET    /api/v1/materials/title/{title}
//! GET    /api/v1/materials/type/{type}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::MaterialFilter;
use crate::domain::{CourseId, Error, Material, MaterialDraft, MaterialId, SubjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, check_description, missing_field_error, parse_id, parse_material_type,
    require_material_type, require_text,
};

/// Request payload for creating or replacing a material.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequestBody {
    pub course_id: Option<i64>,
    #[schema(example = "Spring Boot cheat sheet")]
    pub title: Option<String>,
    #[schema(max_length = 1000)]
    pub description: Option<String>,
    /// One of `VIDEO`, `PDF` or `QUIZ`, in any letter case.
    #[serde(rename = "type")]
    #[schema(example = "PDF")]
    pub material_type: Option<String>,
    pub url: Option<String>,
}

/// Material as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponseBody {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "VIDEO")]
    pub material_type: String,
    pub url: Option<String>,
}

impl From<Material> for MaterialResponseBody {
    fn from(value: Material) -> Self {
        Self {
            id: value.id.get(),
            course_id: value.course_id.get(),
            title: value.title,
            description: value.description,
            material_type: value.material_type.to_string(),
            url: value.url,
        }
    }
}

pub(crate) fn to_bodies(materials: Vec<Material>) -> Vec<MaterialResponseBody> {
    materials.into_iter().map(MaterialResponseBody::from).collect()
}

fn parse_material_payload(payload: MaterialRequestBody) -> Result<MaterialDraft, Error> {
    let course_id = payload
        .course_id
        .ok_or_else(|| missing_field_error(FieldName::new("courseId")))?;
    Ok(MaterialDraft {
        course_id: CourseId::new(course_id),
        title: require_text(payload.title, FieldName::new("title"))?,
        description: check_description(payload.description, FieldName::new("description"))?,
        material_type: require_material_type(payload.material_type, FieldName::new("type"))?,
        url: payload.url,
    })
}

fn material_id(raw: &str) -> Result<MaterialId, Error> {
    parse_id(raw, FieldName::new("id")).map(MaterialId::new)
}

/// Path parameters addressing a single material.
#[derive(Debug, Deserialize)]
pub struct MaterialPath {
    id: String,
}

/// Create a material attached to an existing course.
#[utoipa::path(
    post,
    path = "/api/v1/materials",
    request_body = MaterialRequestBody,
    responses(
        (status = 201, description = "Material created", body = MaterialResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course not found", body = String, content_type = "text/plain")
    ),
    tags = ["materials"],
    operation_id = "createMaterial"
)]
#[post("/materials")]
pub async fn create_material(
    state: web::Data<HttpState>,
    payload: web::Json<MaterialRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_material_payload(payload.into_inner())?;
    let material = state.materials.create_material(draft).await?;
    Ok(HttpResponse::Created().json(MaterialResponseBody::from(material)))
}

#[utoipa::path(
    get,
    path = "/api/v1/materials",
    responses(
        (status = 200, description = "All materials", body = [MaterialResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["materials"],
    operation_id = "listMaterials"
)]
#[get("/materials")]
pub async fn list_materials(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MaterialResponseBody>>> {
    let materials = state.materials_query.list_materials().await?;
    Ok(web::Json(to_bodies(materials)))
}

#[utoipa::path(
    get,
    path = "/api/v1/materials/{id}",
    params(("id" = i64, Path, description = "Material identifier")),
    responses(
        (status = 200, description = "Material", body = MaterialResponseBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Material not found", body = String, content_type = "text/plain")
    ),
    tags = ["materials"],
    operation_id = "getMaterial"
)]
#[get("/materials/{id}")]
pub async fn get_material(
    state: web::Data<HttpState>,
    path: web::Path<MaterialPath>,
) -> ApiResult<web::Json<MaterialResponseBody>> {
    let id = material_id(&path.id)?;
    let material = state.materials_query.get_material(id).await?;
    Ok(web::Json(MaterialResponseBody::from(material)))
}

/// Replace every mutable field of a material.
#[utoipa::path(
    put,
    path = "/api/v1/materials/{id}",
    params(("id" = i64, Path, description = "Material identifier")),
    request_body = MaterialRequestBody,
    responses(
        (status = 200, description = "Material replaced", body = MaterialResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Material or course not found", body = String, content_type = "text/plain")
    ),
    tags = ["materials"],
    operation_id = "updateMaterial"
)]
#[put("/materials/{id}")]
pub async fn update_material(
    state: web::Data<HttpState>,
    path: web::Path<MaterialPath>,
    payload: web::Json<MaterialRequestBody>,
) -> ApiResult<web::Json<MaterialResponseBody>> {
    let id = material_id(&path.id)?;
    let draft = parse_material_payload(payload.into_inner())?;
    let material = state.materials.update_material(id, draft).await?;
    Ok(web::Json(MaterialResponseBody::from(material)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/materials/{id}",
    params(("id" = i64, Path, description = "Material identifier")),
    responses(
        (status = 204, description = "Material deleted"),
        (status = 404, description = "Material not found", body = String, content_type = "text/plain")
    ),
    tags = ["materials"],
    operation_id = "deleteMaterial"
)]
#[delete("/materials/{id}")]
pub async fn delete_material(
    state: web::Data<HttpState>,
    path: web::Path<MaterialPath>,
) -> ApiResult<HttpResponse> {
    let id = material_id(&path.id)?;
    state.materials.delete_material(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Path parameter naming a course.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePath {
    course_id: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/materials/course/{courseId}",
    params(("courseId" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Materials of the course", body = [MaterialResponseBody]),
        (status = 400, description = "Invalid identifier", body = ErrorSchema)
    ),
    tags = ["materials"],
    operation_id = "listMaterialsByCourse"
)]
#[get("/materials/course/{courseId}")]
pub async fn materials_by_course(
    state: web::Data<HttpState>,
    path: web::Path<CoursePath>,
) -> ApiResult<web::Json<Vec<MaterialResponseBody>>> {
    let course_id = parse_id(&path.course_id, FieldName::new("courseId"))?;
    let materials = state
        .materials_query
        .find_materials(MaterialFilter::Course(CourseId::new(course_id)))
        .await?;
    Ok(web::Json(to_bodies(materials)))
}

/// Path parameter naming a subject.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPath {
    subject_id: String,
}

/// Materials of every course filed under a subject.
#[utoipa::path(
    get,
    path = "/api/v1/materials/subject/{subjectId}",
    params(("subjectId" = i64, Path, description = "Subject identifier")),
    responses(
        (status = 200, description = "Materials reachable through the subject's courses", body = [MaterialResponseBody]),
        (status = 400, description = "Invalid identifier", body = ErrorSchema)
    ),
    tags = ["materials"],
    operation_id = "listMaterialsBySubject"
)]
#[get("/materials/subject/{subjectId}")]
pub async fn materials_by_subject(
    state: web::Data<HttpState>,
    path: web::Path<SubjectPath>,
) -> ApiResult<web::Json<Vec<MaterialResponseBody>>> {
    let subject_id = parse_id(&path.subject_id, FieldName::new("subjectId"))?;
    let materials = state
        .materials_query
        .find_materials(MaterialFilter::Subject(SubjectId::new(subject_id)))
        .await?;
    Ok(web::Json(to_bodies(materials)))
}

/// Materials whose title contains the fragment, ignoring case.
#[utoipa::path(
    get,
    path = "/api/v1/materials/title/{title}",
    params(("title" = String, Path, description = "Title fragment")),
    responses(
        (status = 200, description = "Matching materials", body = [MaterialResponseBody])
    ),
    tags = ["materials"],
    operation_id = "listMaterialsByTitle"
)]
#[get("/materials/title/{title}")]
pub async fn materials_by_title(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MaterialResponseBody>>> {
    let materials = state
        .materials_query
        .find_materials(MaterialFilter::Title(path.into_inner()))
        .await?;
    Ok(web::Json(to_bodies(materials)))
}

#[utoipa::path(
    get,
    path = "/api/v1/materials/type/{type}",
    params(("type" = String, Path, description = "VIDEO, PDF or QUIZ")),
    responses(
        (status = 200, description = "Materials of the type", body = [MaterialResponseBody]),
        (status = 400, description = "Unknown material type", body = ErrorSchema)
    ),
    tags = ["materials"],
    operation_id = "listMaterialsByType"
)]
#[get("/materials/type/{type}")]
pub async fn materials_by_type(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MaterialResponseBody>>> {
    let material_type = parse_material_type(&path, FieldName::new("type"))?;
    let materials = state
        .materials_query
        .find_materials(MaterialFilter::Type(material_type))
        .await?;
    Ok(web::Json(to_bodies(materials)))
}

/// Register material routes, literal segments ahead of `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_material)
        .service(list_materials)
        .service(materials_by_course)
        .service(materials_by_subject)
        .service(materials_by_title)
        .service(materials_by_type)
        .service(get_material)
        .service(update_material)
        .service(delete_material);
}

#[cfg(test)]
#[path = "materials_tests.rs"]
mod tests;
