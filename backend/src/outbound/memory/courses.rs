//! Course repository over the in-memory catalogue.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::{CatalogueRepositoryError, CourseRepository};
use crate::domain::{
    Course, CourseDraft, CourseId, KeywordPair, SubjectCourseCount, SubjectId, tags_contain,
};

use super::{InMemoryCatalogue, advance, missing_row};

impl InMemoryCatalogue {
    async fn courses_where(&self, predicate: impl Fn(&Course) -> bool) -> Vec<Course> {
        let state = self.state.read().await;
        state
            .courses
            .values()
            .filter(|course| predicate(course))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCatalogue {
    async fn save(
        &self,
        id: Option<CourseId>,
        draft: &CourseDraft,
    ) -> Result<Course, CatalogueRepositoryError> {
        let mut state = self.state.write().await;
        if let Some(subject_id) = draft.subject_id {
            state.require_subject(subject_id)?;
        }
        let id = match id {
            Some(id) if state.courses.contains_key(&id) => id,
            Some(_) => return Err(missing_row()),
            None => CourseId::new(advance(&mut state.sequences.course)),
        };
        let course = Course::new(id, draft.clone());
        state.courses.insert(id, course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CatalogueRepositoryError> {
        Ok(self.state.read().await.courses.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Course>, CatalogueRepositoryError> {
        Ok(self.courses_where(|_| true).await)
    }

    async fn exists_by_id(&self, id: CourseId) -> Result<bool, CatalogueRepositoryError> {
        Ok(self.state.read().await.courses.contains_key(&id))
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<(), CatalogueRepositoryError> {
        self.state.write().await.remove_course_cascade(id);
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
        Ok(self
            .courses_where(|course| {
                keywords.matches_any(&[Some(course.title.as_str()), course.description.as_deref()])
            })
            .await)
    }

    async fn find_by_level(&self, level: &str) -> Result<Vec<Course>, CatalogueRepositoryError> {
        Ok(self
            .courses_where(|course| course.level.as_deref() == Some(level))
            .await)
    }

    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Course>, CatalogueRepositoryError> {
        Ok(self
            .courses_where(|course| {
                course
                    .start_date
                    .is_some_and(|date| (from..=to).contains(&date))
            })
            .await)
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Course>, CatalogueRepositoryError> {
        Ok(self
            .courses_where(|course| tags_contain(&course.tags, tag))
            .await)
    }

    async fn find_all_ordered_by_start_date(&self) -> Result<Vec<Course>, CatalogueRepositoryError> {
        let mut courses = self.courses_where(|_| true).await;
        courses.sort_by_key(|course| (course.start_date.is_none(), course.start_date, course.id));
        Ok(courses)
    }

    async fn find_all_ordered_by_duration_desc(
        &self,
    ) -> Result<Vec<Course>, CatalogueRepositoryError> {
        let mut courses = self.courses_where(|_| true).await;
        courses.sort_by_key(|course| {
            (
                course.duration_minutes.is_none(),
                Reverse(course.duration_minutes),
                course.id,
            )
        });
        Ok(courses)
    }

    async fn count_by_subject(&self) -> Result<Vec<SubjectCourseCount>, CatalogueRepositoryError> {
        let state = self.state.read().await;
        let mut counts: BTreeMap<SubjectId, u64> = BTreeMap::new();
        for subject_id in state.courses.values().filter_map(|course| course.subject_id) {
            *counts.entry(subject_id).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(subject_id, course_count)| SubjectCourseCount {
                subject_id,
                course_count,
            })
            .collect())
    }
}
