//! Material domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::catalogue_service_support::{
    evict_cached_course, map_replace_error, map_repository_error, map_validation_error, not_found,
};
use crate::domain::ports::{
    CourseCache, MaterialCommand, MaterialFilter, MaterialQuery, MaterialRepository,
};
use crate::domain::{Error, Material, MaterialDraft, MaterialId};

const ENTITY: &str = "Material";

/// Material service implementing [`MaterialCommand`] and [`MaterialQuery`].
///
/// Writes evict the owning course from the [`CourseCache`] because course
/// details embed their materials.
#[derive(Clone)]
pub struct MaterialService<T> {
    materials: Arc<T>,
    cache: Arc<dyn CourseCache>,
}

impl<T> MaterialService<T> {
    /// Create a material service.
    pub fn new(materials: Arc<T>, cache: Arc<dyn CourseCache>) -> Self {
        Self { materials, cache }
    }
}

impl<T: MaterialRepository> MaterialService<T> {
    async fn load(&self, id: MaterialId) -> Result<Material, Error> {
        self.materials
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }
}

#[async_trait]
impl<T: MaterialRepository> MaterialCommand for MaterialService<T> {
    async fn create_material(&self, draft: MaterialDraft) -> Result<Material, Error> {
        draft.validate().map_err(map_validation_error)?;

        let material = self
            .materials
            .save(None, &draft)
            .await
            .map_err(map_repository_error)?;
        evict_cached_course(self.cache.as_ref(), material.course_id).await;
        info!(material_id = %material.id, course_id = %material.course_id, "material created");
        Ok(material)
    }

    async fn update_material(
        &self,
        id: MaterialId,
        draft: MaterialDraft,
    ) -> Result<Material, Error> {
        draft.validate().map_err(map_validation_error)?;
        let previous = self.load(id).await?;

        let material = self
            .materials
            .save(Some(id), &draft)
            .await
            .map_err(map_replace_error(ENTITY, id))?;
        evict_cached_course(self.cache.as_ref(), previous.course_id).await;
        if previous.course_id != material.course_id {
            evict_cached_course(self.cache.as_ref(), material.course_id).await;
        }
        info!(material_id = %id, "material updated");
        Ok(material)
    }

    async fn delete_material(&self, id: MaterialId) -> Result<(), Error> {
        let material = self.load(id).await?;

        self.materials
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        evict_cached_course(self.cache.as_ref(), material.course_id).await;
        info!(material_id = %id, "material deleted");
        Ok(())
    }
}

#[async_trait]
impl<T: MaterialRepository> MaterialQuery for MaterialService<T> {
    async fn get_material(&self, id: MaterialId) -> Result<Material, Error> {
        self.load(id).await
    }

    async fn list_materials(&self) -> Result<Vec<Material>, Error> {
        self.materials.find_all().await.map_err(map_repository_error)
    }

    async fn find_materials(&self, filter: MaterialFilter) -> Result<Vec<Material>, Error> {
        let result = match filter {
            MaterialFilter::Subject(subject_id) => {
                self.materials.find_by_subject_id(subject_id).await
            }
            MaterialFilter::Title(title) => self.materials.find_by_title(&title).await,
            MaterialFilter::Course(course_id) => self.materials.find_by_course_id(course_id).await,
            MaterialFilter::Type(material_type) => self.materials.find_by_type(material_type).await,
        };
        result.map_err(map_repository_error)
    }
}
