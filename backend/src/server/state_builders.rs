//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use course_catalogue::domain::ports::{
    CourseCache, CourseModuleRepository, CourseRepository, MaterialRepository, SubjectRepository,
};
use course_catalogue::domain::{
    CourseModuleService, CourseService, MaterialService, SubjectService,
};
use course_catalogue::inbound::http::state::{HttpState, HttpStatePorts};
use course_catalogue::outbound::memory::InMemoryCatalogue;
use course_catalogue::outbound::persistence::{
    DbPool, DieselCourseModuleRepository, DieselCourseRepository, DieselMaterialRepository,
    DieselSubjectRepository,
};

use super::ServerConfig;

/// Repository handles backing one catalogue.
struct Repositories<C, M, T, S> {
    courses: Arc<C>,
    modules: Arc<M>,
    materials: Arc<T>,
    subjects: Arc<S>,
}

impl
    Repositories<
        DieselCourseRepository,
        DieselCourseModuleRepository,
        DieselMaterialRepository,
        DieselSubjectRepository,
    >
{
    fn diesel(pool: &DbPool) -> Self {
        Self {
            courses: Arc::new(DieselCourseRepository::new(pool.clone())),
            modules: Arc::new(DieselCourseModuleRepository::new(pool.clone())),
            materials: Arc::new(DieselMaterialRepository::new(pool.clone())),
            subjects: Arc::new(DieselSubjectRepository::new(pool.clone())),
        }
    }
}

impl
    Repositories<InMemoryCatalogue, InMemoryCatalogue, InMemoryCatalogue, InMemoryCatalogue>
{
    /// One store behind every port so cascades see all four entity kinds.
    fn memory() -> Self {
        let store = Arc::new(InMemoryCatalogue::new());
        Self {
            courses: store.clone(),
            modules: store.clone(),
            materials: store.clone(),
            subjects: store,
        }
    }
}

impl<C, M, T, S> Repositories<C, M, T, S>
where
    C: CourseRepository + 'static,
    M: CourseModuleRepository + 'static,
    T: MaterialRepository + 'static,
    S: SubjectRepository + 'static,
{
    /// Wrap the repositories in services sharing `cache`, one service per
    /// entity backing both its command and query port.
    fn into_ports(self, cache: Arc<dyn CourseCache>) -> HttpStatePorts {
        let Self {
            courses,
            modules,
            materials,
            subjects,
        } = self;

        let course_service = Arc::new(CourseService::new(
            courses.clone(),
            modules.clone(),
            materials.clone(),
            cache.clone(),
        ));
        let module_service = Arc::new(CourseModuleService::new(modules, cache.clone()));
        let material_service = Arc::new(MaterialService::new(materials, cache.clone()));
        let subject_service = Arc::new(SubjectService::new(subjects, courses, cache));

        HttpStatePorts {
            courses: course_service.clone(),
            courses_query: course_service,
            modules: module_service.clone(),
            modules_query: module_service,
            materials: material_service.clone(),
            materials_query: material_service,
            subjects: subject_service.clone(),
            subjects_query: subject_service,
        }
    }
}

/// Build HTTP state from the configured pool and cache.
///
/// Uses the Diesel repositories when a pool is available, otherwise a
/// single in-memory store shared by every port.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let cache = config.cache.clone();
    let ports = match &config.db_pool {
        Some(pool) => Repositories::diesel(pool).into_ports(cache),
        None => Repositories::memory().into_ports(cache),
    };
    web::Data::new(HttpState::new(ports))
}
