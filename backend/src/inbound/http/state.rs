//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseCommand, CourseModuleCommand, CourseModuleQuery, CourseQuery, MaterialCommand,
    MaterialQuery, SubjectCommand, SubjectQuery,
};

/// Parameter object bundling the command and query ports of each entity.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub modules: Arc<dyn CourseModuleCommand>,
    pub modules_query: Arc<dyn CourseModuleQuery>,
    pub materials: Arc<dyn MaterialCommand>,
    pub materials_query: Arc<dyn MaterialQuery>,
    pub subjects: Arc<dyn SubjectCommand>,
    pub subjects_query: Arc<dyn SubjectQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub modules: Arc<dyn CourseModuleCommand>,
    pub modules_query: Arc<dyn CourseModuleQuery>,
    pub materials: Arc<dyn MaterialCommand>,
    pub materials_query: Arc<dyn MaterialQuery>,
    pub subjects: Arc<dyn SubjectCommand>,
    pub subjects_query: Arc<dyn SubjectQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// A single service usually backs both halves of an entity's ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use course_catalogue::domain::ports::NoOpCourseCache;
    /// use course_catalogue::domain::{
    ///     CourseModuleService, CourseService, MaterialService, SubjectService,
    /// };
    /// use course_catalogue::inbound::http::state::{HttpState, HttpStatePorts};
    /// use course_catalogue::outbound::memory::InMemoryCatalogue;
    ///
    /// let store = Arc::new(InMemoryCatalogue::new());
    /// let cache = Arc::new(NoOpCourseCache);
    /// let courses = Arc::new(CourseService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     cache.clone(),
    /// ));
    /// let modules = Arc::new(CourseModuleService::new(store.clone(), cache.clone()));
    /// let materials = Arc::new(MaterialService::new(store.clone(), cache.clone()));
    /// let subjects = Arc::new(SubjectService::new(store.clone(), store, cache));
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     courses: courses.clone(),
    ///     courses_query: courses,
    ///     modules: modules.clone(),
    ///     modules_query: modules,
    ///     materials: materials.clone(),
    ///     materials_query: materials,
    ///     subjects: subjects.clone(),
    ///     subjects_query: subjects,
    /// });
    /// let _courses = state.courses_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            courses,
            courses_query,
            modules,
            modules_query,
            materials,
            materials_query,
            subjects,
            subjects_query,
        } = ports;
        Self {
            courses,
            courses_query,
            modules,
            modules_query,
            materials,
            materials_query,
            subjects,
            subjects_query,
        }
    }
}
