//! Course module domain service.
//!
//! Module writes change the detail of the owning course, so every mutation
//! evicts that course from the [`CourseCache`]. Moving a module between
//! courses evicts both.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::catalogue_service_support::{
    evict_cached_course, map_replace_error, map_repository_error, map_validation_error, not_found,
};
use crate::domain::ports::{
    CourseCache, CourseModuleCommand, CourseModuleFilter, CourseModuleQuery,
    CourseModuleRepository, ModuleOrder,
};
use crate::domain::{CourseModule, CourseModuleDraft, CourseModuleId, Error};

const ENTITY: &str = "Module";

/// Module service implementing [`CourseModuleCommand`] and
/// [`CourseModuleQuery`].
#[derive(Clone)]
pub struct CourseModuleService<M> {
    modules: Arc<M>,
    cache: Arc<dyn CourseCache>,
}

impl<M> CourseModuleService<M> {
    /// Create a module service.
    pub fn new(modules: Arc<M>, cache: Arc<dyn CourseCache>) -> Self {
        Self { modules, cache }
    }
}

impl<M: CourseModuleRepository> CourseModuleService<M> {
    async fn load(&self, id: CourseModuleId) -> Result<CourseModule, Error> {
        self.modules
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }
}

#[async_trait]
impl<M: CourseModuleRepository> CourseModuleCommand for CourseModuleService<M> {
    async fn create_module(&self, draft: CourseModuleDraft) -> Result<CourseModule, Error> {
        draft.validate().map_err(map_validation_error)?;

        let module = self
            .modules
            .save(None, &draft)
            .await
            .map_err(map_repository_error)?;
        evict_cached_course(self.cache.as_ref(), module.course_id).await;
        info!(module_id = %module.id, course_id = %module.course_id, "module created");
        Ok(module)
    }

    async fn update_module(
        &self,
        id: CourseModuleId,
        draft: CourseModuleDraft,
    ) -> Result<CourseModule, Error> {
        draft.validate().map_err(map_validation_error)?;
        let previous = self.load(id).await?;

        let module = self
            .modules
            .save(Some(id), &draft)
            .await
            .map_err(map_replace_error(ENTITY, id))?;
        evict_cached_course(self.cache.as_ref(), previous.course_id).await;
        if previous.course_id != module.course_id {
            evict_cached_course(self.cache.as_ref(), module.course_id).await;
        }
        info!(module_id = %id, "module updated");
        Ok(module)
    }

    async fn delete_module(&self, id: CourseModuleId) -> Result<(), Error> {
        let module = self.load(id).await?;

        self.modules
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        evict_cached_course(self.cache.as_ref(), module.course_id).await;
        info!(module_id = %id, "module deleted");
        Ok(())
    }
}

#[async_trait]
impl<M: CourseModuleRepository> CourseModuleQuery for CourseModuleService<M> {
    async fn get_module(&self, id: CourseModuleId) -> Result<CourseModule, Error> {
        self.load(id).await
    }

    async fn list_modules(&self) -> Result<Vec<CourseModule>, Error> {
        self.modules.find_all().await.map_err(map_repository_error)
    }

    async fn find_modules(&self, filter: CourseModuleFilter) -> Result<Vec<CourseModule>, Error> {
        let result = match filter {
            CourseModuleFilter::Course {
                course_id,
                order: ModuleOrder::Id,
            } => self.modules.find_by_course_id(course_id).await,
            CourseModuleFilter::Course {
                course_id,
                order: ModuleOrder::Position,
            } => {
                self.modules
                    .find_by_course_id_ordered_by_position(course_id)
                    .await
            }
            CourseModuleFilter::Course {
                course_id,
                order: ModuleOrder::DurationDesc,
            } => {
                self.modules
                    .find_by_course_id_ordered_by_duration_desc(course_id)
                    .await
            }
            CourseModuleFilter::Keywords { first, second } => {
                self.modules.search_by_keywords(&first, &second).await
            }
        };
        result.map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CourseId;
    use crate::domain::ports::{
        CatalogueRepositoryError, MockCourseCache, MockCourseModuleRepository, NoOpCourseCache,
    };
    use crate::domain::ErrorCode;

    fn stored(id: i64, course: i64) -> CourseModule {
        CourseModule::new(
            CourseModuleId::new(id),
            CourseModuleDraft::new(CourseId::new(course), "Ownership"),
        )
    }

    #[tokio::test]
    async fn create_module_for_missing_course_is_not_found() {
        let mut modules = MockCourseModuleRepository::new();
        modules
            .expect_save()
            .return_once(|_, _| Err(CatalogueRepositoryError::missing_parent("Course", 12_i64)));
        let service = CourseModuleService::new(Arc::new(modules), Arc::new(NoOpCourseCache));

        let error = service
            .create_module(CourseModuleDraft::new(CourseId::new(12), "Borrowing"))
            .await
            .expect_err("missing course");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "Course not found with ID: 12");
    }

    #[tokio::test]
    async fn create_module_evicts_owning_course() {
        let mut modules = MockCourseModuleRepository::new();
        modules
            .expect_save()
            .return_once(|_, draft| Ok(CourseModule::new(CourseModuleId::new(1), draft.clone())));
        let mut cache = MockCourseCache::new();
        cache
            .expect_evict()
            .withf(|id| *id == CourseId::new(3))
            .times(1)
            .return_once(|_| Ok(()));
        let service = CourseModuleService::new(Arc::new(modules), Arc::new(cache));

        service
            .create_module(CourseModuleDraft::new(CourseId::new(3), "Traits"))
            .await
            .expect("module created");
    }

    #[tokio::test]
    async fn moving_a_module_evicts_both_courses() {
        let mut modules = MockCourseModuleRepository::new();
        modules
            .expect_find_by_id()
            .return_once(|id| Ok(Some(stored(id.get(), 1))));
        modules
            .expect_save()
            .return_once(|id, draft| {
                Ok(CourseModule::new(
                    id.unwrap_or(CourseModuleId::new(0)),
                    draft.clone(),
                ))
            });
        let mut cache = MockCourseCache::new();
        cache.expect_evict().times(2).returning(|_| Ok(()));
        let service = CourseModuleService::new(Arc::new(modules), Arc::new(cache));

        let module = service
            .update_module(
                CourseModuleId::new(5),
                CourseModuleDraft::new(CourseId::new(2), "Traits"),
            )
            .await
            .expect("module moved");

        assert_eq!(module.course_id, CourseId::new(2));
    }

    #[tokio::test]
    async fn delete_missing_module_is_not_found() {
        let mut modules = MockCourseModuleRepository::new();
        modules.expect_find_by_id().return_once(|_| Ok(None));
        modules.expect_delete_by_id().times(0);
        let service = CourseModuleService::new(Arc::new(modules), Arc::new(NoOpCourseCache));

        let error = service
            .delete_module(CourseModuleId::new(4))
            .await
            .expect_err("missing module");

        assert_eq!(error.message(), "Module not found with ID: 4");
    }

    #[tokio::test]
    async fn duration_order_uses_the_descending_query() {
        let mut modules = MockCourseModuleRepository::new();
        modules
            .expect_find_by_course_id_ordered_by_duration_desc()
            .times(1)
            .return_once(|_| Ok(vec![stored(1, 1)]));
        let service = CourseModuleService::new(Arc::new(modules), Arc::new(NoOpCourseCache));

        let found = service
            .find_modules(CourseModuleFilter::Course {
                course_id: CourseId::new(1),
                order: ModuleOrder::DurationDesc,
            })
            .await
            .expect("modules listed");

        assert_eq!(found.len(), 1);
    }
}
