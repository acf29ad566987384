//! Driving port for course reads.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{CourseDetail, CourseId, CourseModule, Error, Material};

/// Derived course queries exposed to inbound adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseFilter {
    /// Either keyword in title or description.
    Keywords { first: String, second: String },
    /// Exact level match.
    Level(String),
    /// Start date within an inclusive range.
    StartDateBetween { from: NaiveDate, to: NaiveDate },
    /// Tag containment, ignoring case.
    Tag(String),
    /// Every course, earliest start first.
    OrderedByStartDate,
    /// Every course, longest first.
    OrderedByDurationDesc,
}

/// Driving port for course read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Fetch one course with its materials and modules.
    async fn get_course(&self, id: CourseId) -> Result<CourseDetail, Error>;

    /// Fetch every course with its materials and modules.
    async fn list_courses(&self) -> Result<Vec<CourseDetail>, Error>;

    /// Run a derived query.
    async fn find_courses(&self, filter: CourseFilter) -> Result<Vec<CourseDetail>, Error>;

    /// Materials of an existing course.
    async fn materials_for_course(&self, id: CourseId) -> Result<Vec<Material>, Error>;

    /// Modules of an existing course in sequence order.
    async fn modules_for_course(&self, id: CourseId) -> Result<Vec<CourseModule>, Error>;
}
