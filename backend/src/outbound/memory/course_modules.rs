//! Course module repository over the in-memory catalogue.

use std::cmp::Reverse;

use async_trait::async_trait;

use crate::domain::ports::{CatalogueRepositoryError, CourseModuleRepository};
use crate::domain::{CourseId, CourseModule, CourseModuleDraft, CourseModuleId, KeywordPair};

use super::{InMemoryCatalogue, advance, missing_row};

impl InMemoryCatalogue {
    async fn modules_where(&self, predicate: impl Fn(&CourseModule) -> bool) -> Vec<CourseModule> {
        let state = self.state.read().await;
        state
            .modules
            .values()
            .filter(|module| predicate(module))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CourseModuleRepository for InMemoryCatalogue {
    async fn save(
        &self,
        id: Option<CourseModuleId>,
        draft: &CourseModuleDraft,
    ) -> Result<CourseModule, CatalogueRepositoryError> {
        let mut state = self.state.write().await;
        state.require_course(draft.course_id)?;
        let id = match id {
            Some(id) if state.modules.contains_key(&id) => id,
            Some(_) => return Err(missing_row()),
            None => CourseModuleId::new(advance(&mut state.sequences.module)),
        };
        let module = CourseModule::new(id, draft.clone());
        state.modules.insert(id, module.clone());
        Ok(module)
    }

    async fn find_by_id(
        &self,
        id: CourseModuleId,
    ) -> Result<Option<CourseModule>, CatalogueRepositoryError> {
        Ok(self.state.read().await.modules.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        Ok(self.modules_where(|_| true).await)
    }

    async fn exists_by_id(&self, id: CourseModuleId) -> Result<bool, CatalogueRepositoryError> {
        Ok(self.state.read().await.modules.contains_key(&id))
    }

    async fn delete_by_id(&self, id: CourseModuleId) -> Result<(), CatalogueRepositoryError> {
        self.state.write().await.modules.remove(&id);
        Ok(())
    }

    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        Ok(self
            .modules_where(|module| module.course_id == course_id)
            .await)
    }

    async fn find_by_course_id_ordered_by_position(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        let mut modules = self
            .modules_where(|module| module.course_id == course_id)
            .await;
        modules.sort_by_key(|module| (module.position, module.id));
        Ok(modules)
    }

    async fn find_by_course_id_ordered_by_duration_desc(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        let mut modules = self
            .modules_where(|module| module.course_id == course_id)
            .await;
        modules.sort_by_key(|module| {
            (
                module.duration_minutes.is_none(),
                Reverse(module.duration_minutes),
                module.id,
            )
        });
        Ok(modules)
    }

    async fn search_by_keywords(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        let Some(keywords) = KeywordPair::parse(first, second) else {
            return Ok(Vec::new());
        };
        Ok(self
            .modules_where(|module| {
                keywords.matches_any(&[Some(module.title.as_str()), module.content.as_deref()])
            })
            .await)
    }
}
