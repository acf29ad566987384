//! PostgreSQL-backed `SubjectRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepositoryError, SubjectRepository};
use crate::domain::{KeywordPair, Subject, SubjectDraft, SubjectId, like_contains_pattern};

use super::diesel_helpers::{map_diesel_error, map_pool_error, map_write_error, tag_contains};
use super::models::{SubjectRow, SubjectValues};
use super::pool::DbPool;
use super::schema::subjects;

/// Diesel-backed implementation of the subject repository port.
#[derive(Clone)]
pub struct DieselSubjectRepository {
    pool: DbPool,
}

impl DieselSubjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        query: subjects::BoxedQuery<'_, Pg>,
    ) -> Result<Vec<Subject>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SubjectRow> = query
            .select(SubjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Subject::from).collect())
    }
}

#[async_trait]
impl SubjectRepository for DieselSubjectRepository {
    async fn save(
        &self,
        id: Option<SubjectId>,
        draft: &SubjectDraft,
    ) -> Result<Subject, CatalogueRepositoryError> {
        let values = SubjectValues::from(draft);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = match id {
            None => {
                diesel::insert_into(subjects::table)
                    .values(&values)
                    .returning(SubjectRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            Some(id) => {
                diesel::update(subjects::table.find(id.get()))
                    .set(&values)
                    .returning(SubjectRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(|err| map_write_error(err, None))?;

        Ok(Subject::from(row))
    }

    async fn find_by_id(&self, id: SubjectId) -> Result<Option<Subject>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = subjects::table
            .find(id.get())
            .select(SubjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Subject::from))
    }

    async fn find_all(&self) -> Result<Vec<Subject>, CatalogueRepositoryError> {
        self.load(subjects::table.order_by(subjects::id).into_boxed())
            .await
    }

    async fn exists_by_id(&self, id: SubjectId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(subjects::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: SubjectId) -> Result<(), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(subjects::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn search_by_keywords(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Vec<Subject>, CatalogueRepositoryError> {
        let Some(keywords) = KeywordPair::parse(first, second) else {
            return Ok(Vec::new());
        };
        let first = like_contains_pattern(keywords.first_keyword());
        let second = like_contains_pattern(keywords.second_keyword());

        self.load(
            subjects::table
                .filter(
                    subjects::name
                        .ilike(first.clone())
                        .nullable()
                        .or(subjects::name.ilike(second.clone()).nullable())
                        .or(subjects::description.ilike(first))
                        .or(subjects::description.ilike(second)),
                )
                .order_by(subjects::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Subject>, CatalogueRepositoryError> {
        self.load(
            subjects::table
                .filter(subjects::category.eq(category.to_owned()))
                .order_by(subjects::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Subject>, CatalogueRepositoryError> {
        if tag.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.load(
            subjects::table
                .filter(tag_contains::<subjects::table>("subjects.tags", tag))
                .order_by(subjects::id)
                .into_boxed(),
        )
        .await
    }
}
