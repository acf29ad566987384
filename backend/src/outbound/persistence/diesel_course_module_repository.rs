//! PostgreSQL-backed `CourseModuleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepositoryError, CourseModuleRepository};
use crate::domain::{
    CourseId, CourseModule, CourseModuleDraft, CourseModuleId, KeywordPair, like_contains_pattern,
};

use super::diesel_helpers::{ParentRef, map_diesel_error, map_pool_error, map_write_error};
use super::models::{CourseModuleRow, CourseModuleValues, convert_rows};
use super::pool::DbPool;
use super::schema::course_modules;

/// Diesel-backed implementation of the course module repository port.
#[derive(Clone)]
pub struct DieselCourseModuleRepository {
    pool: DbPool,
}

impl DieselCourseModuleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        query: course_modules::BoxedQuery<'_, Pg>,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseModuleRow> = query
            .select(CourseModuleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }
}

#[async_trait]
impl CourseModuleRepository for DieselCourseModuleRepository {
    async fn save(
        &self,
        id: Option<CourseModuleId>,
        draft: &CourseModuleDraft,
    ) -> Result<CourseModule, CatalogueRepositoryError> {
        let values = CourseModuleValues::from_draft(draft)?;
        let parent = Some(ParentRef::course(draft.course_id.get()));
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = match id {
            None => {
                diesel::insert_into(course_modules::table)
                    .values(&values)
                    .returning(CourseModuleRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            Some(id) => {
                diesel::update(course_modules::table.find(id.get()))
                    .set(&values)
                    .returning(CourseModuleRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(|err| map_write_error(err, parent))?;

        CourseModule::try_from(row)
    }

    async fn find_by_id(
        &self,
        id: CourseModuleId,
    ) -> Result<Option<CourseModule>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = course_modules::table
            .find(id.get())
            .select(CourseModuleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(CourseModule::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        self.load(course_modules::table.order_by(course_modules::id).into_boxed())
            .await
    }

    async fn exists_by_id(&self, id: CourseModuleId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(course_modules::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: CourseModuleId) -> Result<(), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(course_modules::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_course_id(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        self.load(
            course_modules::table
                .filter(course_modules::course_id.eq(course_id.get()))
                .order_by(course_modules::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_by_course_id_ordered_by_position(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        self.load(
            course_modules::table
                .filter(course_modules::course_id.eq(course_id.get()))
                .order_by((course_modules::position, course_modules::id))
                .into_boxed(),
        )
        .await
    }

    async fn find_by_course_id_ordered_by_duration_desc(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        self.load(
            course_modules::table
                .filter(course_modules::course_id.eq(course_id.get()))
                .order_by((
                    course_modules::duration_minutes.desc().nulls_last(),
                    course_modules::id,
                ))
                .into_boxed(),
        )
        .await
    }

    async fn search_by_keywords(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Vec<CourseModule>, CatalogueRepositoryError> {
        let Some(keywords) = KeywordPair::parse(first, second) else {
            return Ok(Vec::new());
        };
        let first = like_contains_pattern(keywords.first_keyword());
        let second = like_contains_pattern(keywords.second_keyword());

        self.load(
            course_modules::table
                .filter(
                    course_modules::title
                        .ilike(first.clone())
                        .nullable()
                        .or(course_modules::title.ilike(second.clone()).nullable())
                        .or(course_modules::content.ilike(first))
                        .or(course_modules::content.ilike(second)),
                )
                .order_by(course_modules::id)
                .into_boxed(),
        )
        .await
    }
}
