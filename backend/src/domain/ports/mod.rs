//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CourseCache`]) are implemented by outbound
//! adapters. Driving ports (`*Command`, `*Query`) are implemented by the
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_cache;
mod course_command;
mod course_module_command;
mod course_module_query;
mod course_module_repository;
mod course_query;
mod course_repository;
mod material_command;
mod material_query;
mod material_repository;
mod repository_error;
mod subject_command;
mod subject_query;
mod subject_repository;

#[cfg(test)]
pub use course_cache::MockCourseCache;
pub use course_cache::{CacheGeneration, CourseCache, CourseCacheError, NoOpCourseCache};
#[cfg(test)]
pub use course_command::MockCourseCommand;
pub use course_command::CourseCommand;
#[cfg(test)]
pub use course_module_command::MockCourseModuleCommand;
pub use course_module_command::CourseModuleCommand;
#[cfg(test)]
pub use course_module_query::MockCourseModuleQuery;
pub use course_module_query::{CourseModuleFilter, CourseModuleQuery, ModuleOrder};
#[cfg(test)]
pub use course_module_repository::MockCourseModuleRepository;
pub use course_module_repository::CourseModuleRepository;
#[cfg(test)]
pub use course_query::MockCourseQuery;
pub use course_query::{CourseFilter, CourseQuery};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::CourseRepository;
#[cfg(test)]
pub use material_command::MockMaterialCommand;
pub use material_command::MaterialCommand;
#[cfg(test)]
pub use material_query::MockMaterialQuery;
pub use material_query::{MaterialFilter, MaterialQuery};
#[cfg(test)]
pub use material_repository::MockMaterialRepository;
pub use material_repository::MaterialRepository;
pub use repository_error::CatalogueRepositoryError;
#[cfg(test)]
pub use subject_command::MockSubjectCommand;
pub use subject_command::SubjectCommand;
#[cfg(test)]
pub use subject_query::MockSubjectQuery;
pub use subject_query::{SubjectFilter, SubjectQuery};
#[cfg(test)]
pub use subject_repository::MockSubjectRepository;
pub use subject_repository::SubjectRepository;
