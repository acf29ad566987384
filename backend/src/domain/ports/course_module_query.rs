//! Driving port for course module reads.

use async_trait::async_trait;

use crate::domain::{CourseId, CourseModule, CourseModuleId, Error};

/// Ordering applied when listing the modules of one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleOrder {
    /// Insertion order.
    #[default]
    Id,
    /// Sequence within the course, ascending.
    Position,
    /// Longest first, modules without a duration last.
    DurationDesc,
}

/// Derived module queries exposed to inbound adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseModuleFilter {
    /// Modules owned by one course.
    Course { course_id: CourseId, order: ModuleOrder },
    /// Either keyword in title or content.
    Keywords { first: String, second: String },
}

/// Driving port for module read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseModuleQuery: Send + Sync {
    /// Fetch one module.
    async fn get_module(&self, id: CourseModuleId) -> Result<CourseModule, Error>;

    /// Fetch every module.
    async fn list_modules(&self) -> Result<Vec<CourseModule>, Error>;

    /// Run a derived query.
    async fn find_modules(&self, filter: CourseModuleFilter) -> Result<Vec<CourseModule>, Error>;
}
