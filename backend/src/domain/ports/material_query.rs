//! Driving port for material reads.

use async_trait::async_trait;

use crate::domain::{CourseId, Error, Material, MaterialId, MaterialType, SubjectId};

/// Derived material queries exposed to inbound adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialFilter {
    /// Materials of every course under a subject.
    Subject(SubjectId),
    /// Exact title match.
    Title(String),
    /// Materials owned by one course.
    Course(CourseId),
    /// Materials of one format.
    Type(MaterialType),
}

/// Driving port for material read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialQuery: Send + Sync {
    /// Fetch one material.
    async fn get_material(&self, id: MaterialId) -> Result<Material, Error>;

    /// Fetch every material.
    async fn list_materials(&self) -> Result<Vec<Material>, Error>;

    /// Run a derived query.
    async fn find_materials(&self, filter: MaterialFilter) -> Result<Vec<Material>, Error>;
}
