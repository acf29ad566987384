//! PostgreSQL-backed `MaterialRepository` implementation using Diesel ORM.
//!
//! Subject lookups join through `courses`, since materials only reference
//! their owning course.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepositoryError, MaterialRepository};
use crate::domain::{CourseId, Material, MaterialDraft, MaterialId, MaterialType, SubjectId};

use super::diesel_helpers::{ParentRef, map_diesel_error, map_pool_error, map_write_error};
use super::models::{MaterialRow, MaterialValues, convert_rows};
use super::pool::DbPool;
use super::schema::{courses, materials};

/// Diesel-backed implementation of the material repository port.
#[derive(Clone)]
pub struct DieselMaterialRepository {
    pool: DbPool,
}

impl DieselMaterialRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        query: materials::BoxedQuery<'_, Pg>,
    ) -> Result<Vec<Material>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MaterialRow> = query
            .select(MaterialRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }
}

#[async_trait]
impl MaterialRepository for DieselMaterialRepository {
    async fn save(
        &self,
        id: Option<MaterialId>,
        draft: &MaterialDraft,
    ) -> Result<Material, CatalogueRepositoryError> {
        let values = MaterialValues::from(draft);
        let parent = Some(ParentRef::course(draft.course_id.get()));
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = match id {
            None => {
                diesel::insert_into(materials::table)
                    .values(&values)
                    .returning(MaterialRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            Some(id) => {
                diesel::update(materials::table.find(id.get()))
                    .set(&values)
                    .returning(MaterialRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(|err| map_write_error(err, parent))?;

        Material::try_from(row)
    }

    async fn find_by_id(
        &self,
        id: MaterialId,
    ) -> Result<Option<Material>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = materials::table
            .find(id.get())
            .select(MaterialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Material::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Material>, CatalogueRepositoryError> {
        self.load(materials::table.order_by(materials::id).into_boxed())
            .await
    }

    async fn exists_by_id(&self, id: MaterialId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(materials::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: MaterialId) -> Result<(), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(materials::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_subject_id(
        &self,
        subject_id: SubjectId,
    ) -> Result<Vec<Material>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MaterialRow> = materials::table
            .inner_join(courses::table)
            .filter(courses::subject_id.eq(subject_id.get()))
            .order_by(materials::id)
            .select(MaterialRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Material>, CatalogueRepositoryError> {
        self.load(
            materials::table
                .filter(materials::title.eq(title.to_owned()))
                .order_by(materials::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Material>, CatalogueRepositoryError> {
        self.load(
            materials::table
                .filter(materials::course_id.eq(course_id.get()))
                .order_by(materials::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_by_type(
        &self,
        material_type: MaterialType,
    ) -> Result<Vec<Material>, CatalogueRepositoryError> {
        self.load(
            materials::table
                .filter(materials::material_type.eq(material_type.as_str()))
                .order_by(materials::id)
                .into_boxed(),
        )
        .await
    }
}
