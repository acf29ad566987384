//! Material repository over the in-memory catalogue.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::ports::{CatalogueRepositoryError, MaterialRepository};
use crate::domain::{CourseId, Material, MaterialDraft, MaterialId, MaterialType, SubjectId};

use super::{InMemoryCatalogue, advance, missing_row};

impl InMemoryCatalogue {
    async fn materials_where(&self, predicate: impl Fn(&Material) -> bool) -> Vec<Material> {
        let state = self.state.read().await;
        state
            .materials
            .values()
            .filter(|material| predicate(material))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MaterialRepository for InMemoryCatalogue {
    async fn save(
        &self,
        id: Option<MaterialId>,
        draft: &MaterialDraft,
    ) -> Result<Material, CatalogueRepositoryError> {
        let mut state = self.state.write().await;
        state.require_course(draft.course_id)?;
        let id = match id {
            Some(id) if state.materials.contains_key(&id) => id,
            Some(_) => return Err(missing_row()),
            None => MaterialId::new(advance(&mut state.sequences.material)),
        };
        let material = Material::new(id, draft.clone());
        state.materials.insert(id, material.clone());
        Ok(material)
    }

    async fn find_by_id(
        &self,
        id: MaterialId,
    ) -> Result<Option<Material>, CatalogueRepositoryError> {
        Ok(self.state.read().await.materials.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Material>, CatalogueRepositoryError> {
        Ok(self.materials_where(|_| true).await)
    }

    async fn exists_by_id(&self, id: MaterialId) -> Result<bool, CatalogueRepositoryError> {
        Ok(self.state.read().await.materials.contains_key(&id))
    }

    async fn delete_by_id(&self, id: MaterialId) -> Result<(), CatalogueRepositoryError> {
        self.state.write().await.materials.remove(&id);
        Ok(())
    }

    async fn find_by_subject_id(
        &self,
        subject_id: SubjectId,
    ) -> Result<Vec<Material>, CatalogueRepositoryError> {
        let state = self.state.read().await;
        let courses: BTreeSet<CourseId> = state
            .courses
            .values()
            .filter(|course| course.subject_id == Some(subject_id))
            .map(|course| course.id)
            .collect();
        Ok(state
            .materials
            .values()
            .filter(|material| courses.contains(&material.course_id))
            .cloned()
            .collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Material>, CatalogueRepositoryError> {
        Ok(self
            .materials_where(|material| material.title == title)
            .await)
    }

    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Material>, CatalogueRepositoryError> {
        Ok(self
            .materials_where(|material| material.course_id == course_id)
            .await)
    }

    async fn find_by_type(
        &self,
        material_type: MaterialType,
    ) -> Result<Vec<Material>, CatalogueRepositoryError> {
        Ok(self
            .materials_where(|material| material.material_type == material_type)
            .await)
    }
}
