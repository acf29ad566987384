//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepositoryError, CourseRepository};
use crate::domain::{
    Course, CourseDraft, CourseId, KeywordPair, SubjectCourseCount, SubjectId,
    like_contains_pattern,
};

use super::diesel_helpers::{
    ParentRef, map_diesel_error, map_pool_error, map_write_error, tag_contains,
};
use super::models::{CourseRow, CourseValues, convert_rows};
use super::pool::DbPool;
use super::schema::courses;

/// Diesel-backed implementation of the course repository port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        query: courses::BoxedQuery<'_, diesel::pg::Pg>,
    ) -> Result<Vec<Course>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = query
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_rows(rows)
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn save(
        &self,
        id: Option<CourseId>,
        draft: &CourseDraft,
    ) -> Result<Course, CatalogueRepositoryError> {
        let values = CourseValues::from_draft(draft)?;
        let parent = draft.subject_id.map(|subject| ParentRef::subject(subject.get()));
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = match id {
            None => {
                diesel::insert_into(courses::table)
                    .values(&values)
                    .returning(CourseRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            Some(id) => {
                diesel::update(courses::table.find(id.get()))
                    .set(&values)
                    .returning(CourseRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(|err| map_write_error(err, parent))?;

        Course::try_from(row)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = courses::table
            .find(id.get())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Course::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Course>, CatalogueRepositoryError> {
        self.load(courses::table.order_by(courses::id).into_boxed())
            .await
    }

    async fn exists_by_id(&self, id: CourseId) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(courses::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<(), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(courses::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn search_by_keywords(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Vec<Course>, CatalogueRepositoryError> {
        let Some(keywords) = KeywordPair::parse(first, second) else {
            return Ok(Vec::new());
        };
        let first = like_contains_pattern(keywords.first_keyword());
        let second = like_contains_pattern(keywords.second_keyword());

        self.load(
            courses::table
                .filter(
                    courses::title
                        .ilike(first.clone())
                        .nullable()
                        .or(courses::title.ilike(second.clone()).nullable())
                        .or(courses::description.ilike(first))
                        .or(courses::description.ilike(second)),
                )
                .order_by(courses::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_by_level(&self, level: &str) -> Result<Vec<Course>, CatalogueRepositoryError> {
        self.load(
            courses::table
                .filter(courses::level.eq(level.to_owned()))
                .order_by(courses::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Course>, CatalogueRepositoryError> {
        self.load(
            courses::table
                .filter(courses::start_date.between(from, to))
                .order_by(courses::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Course>, CatalogueRepositoryError> {
        if tag.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.load(
            courses::table
                .filter(tag_contains::<courses::table>("courses.tags", tag))
                .order_by(courses::id)
                .into_boxed(),
        )
        .await
    }

    async fn find_all_ordered_by_start_date(&self) -> Result<Vec<Course>, CatalogueRepositoryError> {
        self.load(
            courses::table
                .order_by((courses::start_date.asc().nulls_last(), courses::id))
                .into_boxed(),
        )
        .await
    }

    async fn find_all_ordered_by_duration_desc(
        &self,
    ) -> Result<Vec<Course>, CatalogueRepositoryError> {
        self.load(
            courses::table
                .order_by((courses::duration_minutes.desc().nulls_last(), courses::id))
                .into_boxed(),
        )
        .await
    }

    async fn count_by_subject(&self) -> Result<Vec<SubjectCourseCount>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(Option<i64>, i64)> = courses::table
            .filter(courses::subject_id.is_not_null())
            .group_by(courses::subject_id)
            .select((courses::subject_id, count_star()))
            .order_by(courses::subject_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(subject_id, count)| {
                subject_id.map(|id| SubjectCourseCount {
                    subject_id: SubjectId::new(id),
                    course_count: count.unsigned_abs(),
                })
            })
            .collect())
    }
}
