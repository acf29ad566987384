//! Course domain service.
//!
//! Implements the course driving ports on top of the course, module and
//! material repositories. Every course leaving the service is assembled into
//! a [`CourseDetail`] carrying its materials and modules. Single-course reads
//! go through the [`CourseCache`]; writes evict the affected entry once the
//! store has committed. A read captures the cache generation before touching
//! the store, so a detail loaded before a concurrent write is never cached.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;
use tracing::{info, warn};

use crate::domain::catalogue_service_support::{
    evict_cached_course, map_replace_error, map_repository_error, map_validation_error, not_found,
};
use crate::domain::ports::{
    CacheGeneration, CourseCache, CourseCommand, CourseFilter, CourseModuleRepository,
    CourseQuery, CourseRepository, MaterialRepository,
};
use crate::domain::{Course, CourseDetail, CourseDraft, CourseId, CourseModule, Error, Material};

const ENTITY: &str = "Course";

/// Course service implementing [`CourseCommand`] and [`CourseQuery`].
#[derive(Clone)]
pub struct CourseService<C, M, T> {
    courses: Arc<C>,
    modules: Arc<M>,
    materials: Arc<T>,
    cache: Arc<dyn CourseCache>,
}

impl<C, M, T> CourseService<C, M, T> {
    /// Create a course service over its repositories and cache.
    pub fn new(
        courses: Arc<C>,
        modules: Arc<M>,
        materials: Arc<T>,
        cache: Arc<dyn CourseCache>,
    ) -> Self {
        Self {
            courses,
            modules,
            materials,
            cache,
        }
    }
}

impl<C, M, T> CourseService<C, M, T>
where
    C: CourseRepository,
    M: CourseModuleRepository,
    T: MaterialRepository,
{
    async fn assemble(&self, course: Course) -> Result<CourseDetail, Error> {
        let (materials, modules) = try_join(
            self.materials.find_by_course_id(course.id),
            self.modules.find_by_course_id_ordered_by_position(course.id),
        )
        .await
        .map_err(map_repository_error)?;

        Ok(CourseDetail {
            course,
            materials,
            modules,
        })
    }

    async fn assemble_all(&self, courses: Vec<Course>) -> Result<Vec<CourseDetail>, Error> {
        let mut details = Vec::with_capacity(courses.len());
        for course in courses {
            details.push(self.assemble(course).await?);
        }
        Ok(details)
    }

    async fn ensure_exists(&self, id: CourseId) -> Result<(), Error> {
        let exists = self
            .courses
            .exists_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if exists {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }

    async fn cached(&self, id: CourseId) -> Option<CourseDetail> {
        match self.cache.get(id).await {
            Ok(hit) => hit,
            Err(err) => {
                warn!(course_id = %id, error = %err, "course cache read failed");
                None
            }
        }
    }

    async fn generation(&self, id: CourseId) -> Option<CacheGeneration> {
        match self.cache.generation(id).await {
            Ok(seen) => Some(seen),
            Err(err) => {
                warn!(course_id = %id, error = %err, "course cache generation read failed");
                None
            }
        }
    }

    async fn remember(&self, detail: &CourseDetail, seen: CacheGeneration) {
        if let Err(err) = self.cache.put(detail, seen).await {
            warn!(course_id = %detail.course.id, error = %err, "course cache write failed");
        }
    }

    async fn run_filter(&self, filter: CourseFilter) -> Result<Vec<Course>, Error> {
        let result = match filter {
            CourseFilter::Keywords { first, second } => {
                self.courses.search_by_keywords(&first, &second).await
            }
            CourseFilter::Level(level) => self.courses.find_by_level(&level).await,
            CourseFilter::StartDateBetween { from, to } => {
                self.courses.find_by_start_date_between(from, to).await
            }
            CourseFilter::Tag(tag) => self.courses.find_by_tag(&tag).await,
            CourseFilter::OrderedByStartDate => self.courses.find_all_ordered_by_start_date().await,
            CourseFilter::OrderedByDurationDesc => {
                self.courses.find_all_ordered_by_duration_desc().await
            }
        };
        result.map_err(map_repository_error)
    }
}

#[async_trait]
impl<C, M, T> CourseCommand for CourseService<C, M, T>
where
    C: CourseRepository,
    M: CourseModuleRepository,
    T: MaterialRepository,
{
    async fn create_course(&self, draft: CourseDraft) -> Result<CourseDetail, Error> {
        draft.validate().map_err(map_validation_error)?;

        let course = self
            .courses
            .save(None, &draft)
            .await
            .map_err(map_repository_error)?;
        info!(course_id = %course.id, "course created");

        self.assemble(course).await
    }

    async fn update_course(&self, id: CourseId, draft: CourseDraft) -> Result<CourseDetail, Error> {
        draft.validate().map_err(map_validation_error)?;
        self.ensure_exists(id).await?;

        let course = self
            .courses
            .save(Some(id), &draft)
            .await
            .map_err(map_replace_error(ENTITY, id))?;
        evict_cached_course(self.cache.as_ref(), id).await;
        info!(course_id = %id, "course updated");

        self.assemble(course).await
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), Error> {
        self.ensure_exists(id).await?;

        self.courses
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        evict_cached_course(self.cache.as_ref(), id).await;
        info!(course_id = %id, "course deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, M, T> CourseQuery for CourseService<C, M, T>
where
    C: CourseRepository,
    M: CourseModuleRepository,
    T: MaterialRepository,
{
    async fn get_course(&self, id: CourseId) -> Result<CourseDetail, Error> {
        if let Some(detail) = self.cached(id).await {
            return Ok(detail);
        }

        let seen = self.generation(id).await;
        let course = self
            .courses
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(ENTITY, id))?;
        let detail = self.assemble(course).await?;
        if let Some(seen) = seen {
            self.remember(&detail, seen).await;
        }
        Ok(detail)
    }

    async fn list_courses(&self) -> Result<Vec<CourseDetail>, Error> {
        let courses = self
            .courses
            .find_all()
            .await
            .map_err(map_repository_error)?;
        self.assemble_all(courses).await
    }

    async fn find_courses(&self, filter: CourseFilter) -> Result<Vec<CourseDetail>, Error> {
        let courses = self.run_filter(filter).await?;
        self.assemble_all(courses).await
    }

    async fn materials_for_course(&self, id: CourseId) -> Result<Vec<Material>, Error> {
        self.ensure_exists(id).await?;
        self.materials
            .find_by_course_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn modules_for_course(&self, id: CourseId) -> Result<Vec<CourseModule>, Error> {
        self.ensure_exists(id).await?;
        self.modules
            .find_by_course_id_ordered_by_position(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
