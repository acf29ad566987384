//! In-process catalogue store.
//!
//! `InMemoryCatalogue` implements every catalogue repository port over a
//! single `RwLock`-guarded state, so cascades happen atomically under one
//! write lock. The server falls back to it when no database URL is
//! configured, and tests use it as a fast stand-in for PostgreSQL. Query
//! semantics match the Diesel adapters, including id ordering, inclusive
//! date ranges and the blank-keyword rule.

mod course_modules;
mod courses;
mod materials;
mod subjects;

use std::collections::{BTreeMap, BTreeSet};

use tokio::sync::RwLock;

use crate::domain::ports::CatalogueRepositoryError;
use crate::domain::{
    Course, CourseId, CourseModule, CourseModuleId, Material, MaterialId, Subject, SubjectId,
};

#[derive(Debug, Default)]
struct Sequences {
    subject: i64,
    course: i64,
    module: i64,
    material: i64,
}

fn advance(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Default)]
struct CatalogueState {
    sequences: Sequences,
    subjects: BTreeMap<SubjectId, Subject>,
    courses: BTreeMap<CourseId, Course>,
    modules: BTreeMap<CourseModuleId, CourseModule>,
    materials: BTreeMap<MaterialId, Material>,
}

impl CatalogueState {
    fn require_subject(&self, id: SubjectId) -> Result<(), CatalogueRepositoryError> {
        if self.subjects.contains_key(&id) {
            Ok(())
        } else {
            Err(CatalogueRepositoryError::missing_parent("Subject", id.get()))
        }
    }

    fn require_course(&self, id: CourseId) -> Result<(), CatalogueRepositoryError> {
        if self.courses.contains_key(&id) {
            Ok(())
        } else {
            Err(CatalogueRepositoryError::missing_parent("Course", id.get()))
        }
    }

    fn remove_course_cascade(&mut self, id: CourseId) {
        self.courses.remove(&id);
        self.modules.retain(|_, module| module.course_id != id);
        self.materials.retain(|_, material| material.course_id != id);
    }

    fn remove_subject_cascade(&mut self, id: SubjectId) {
        self.subjects.remove(&id);
        let owned: BTreeSet<CourseId> = self
            .courses
            .values()
            .filter(|course| course.subject_id == Some(id))
            .map(|course| course.id)
            .collect();
        for course_id in owned {
            self.remove_course_cascade(course_id);
        }
    }
}

fn missing_row() -> CatalogueRepositoryError {
    CatalogueRepositoryError::missing_row()
}

/// Catalogue store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalogue {
    state: RwLock<CatalogueState>,
}

impl InMemoryCatalogue {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
