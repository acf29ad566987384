//! Subject domain service.
//!
//! Deleting a subject cascades to its courses in the store, so the whole
//! [`CourseCache`] is cleared afterwards rather than tracking which course
//! entries went with it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::catalogue_service_support::{
    map_replace_error, map_repository_error, map_validation_error, not_found,
};
use crate::domain::ports::{
    CourseCache, CourseRepository, SubjectCommand, SubjectFilter, SubjectQuery, SubjectRepository,
};
use crate::domain::{Error, Subject, SubjectCourseCount, SubjectDraft, SubjectId};

const ENTITY: &str = "Subject";

/// Subject service implementing [`SubjectCommand`] and [`SubjectQuery`].
#[derive(Clone)]
pub struct SubjectService<S, C> {
    subjects: Arc<S>,
    courses: Arc<C>,
    cache: Arc<dyn CourseCache>,
}

impl<S, C> SubjectService<S, C> {
    /// Create a subject service. The course repository backs
    /// [`SubjectQuery::course_counts`].
    pub fn new(subjects: Arc<S>, courses: Arc<C>, cache: Arc<dyn CourseCache>) -> Self {
        Self {
            subjects,
            courses,
            cache,
        }
    }
}

impl<S: SubjectRepository, C> SubjectService<S, C> {
    async fn ensure_exists(&self, id: SubjectId) -> Result<(), Error> {
        let exists = self
            .subjects
            .exists_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if exists {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }
}

#[async_trait]
impl<S, C> SubjectCommand for SubjectService<S, C>
where
    S: SubjectRepository,
    C: CourseRepository,
{
    async fn create_subject(&self, draft: SubjectDraft) -> Result<Subject, Error> {
        draft.validate().map_err(map_validation_error)?;

        let subject = self
            .subjects
            .save(None, &draft)
            .await
            .map_err(map_repository_error)?;
        info!(subject_id = %subject.id, "subject created");
        Ok(subject)
    }

    async fn update_subject(&self, id: SubjectId, draft: SubjectDraft) -> Result<Subject, Error> {
        draft.validate().map_err(map_validation_error)?;
        self.ensure_exists(id).await?;

        let subject = self
            .subjects
            .save(Some(id), &draft)
            .await
            .map_err(map_replace_error(ENTITY, id))?;
        info!(subject_id = %id, "subject updated");
        Ok(subject)
    }

    async fn delete_subject(&self, id: SubjectId) -> Result<(), Error> {
        self.ensure_exists(id).await?;

        self.subjects
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if let Err(err) = self.cache.clear().await {
            warn!(subject_id = %id, error = %err, "course cache clear failed");
        }
        info!(subject_id = %id, "subject deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, C> SubjectQuery for SubjectService<S, C>
where
    S: SubjectRepository,
    C: CourseRepository,
{
    async fn get_subject(&self, id: SubjectId) -> Result<Subject, Error> {
        self.subjects
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, Error> {
        self.subjects.find_all().await.map_err(map_repository_error)
    }

    async fn find_subjects(&self, filter: SubjectFilter) -> Result<Vec<Subject>, Error> {
        let result = match filter {
            SubjectFilter::Keywords { first, second } => {
                self.subjects.search_by_keywords(&first, &second).await
            }
            SubjectFilter::Category(category) => self.subjects.find_by_category(&category).await,
            SubjectFilter::Tag(tag) => self.subjects.find_by_tag(&tag).await,
        };
        result.map_err(map_repository_error)
    }

    async fn course_counts(&self) -> Result<Vec<SubjectCourseCount>, Error> {
        self.courses
            .count_by_subject()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        CourseCacheError, MockCourseCache, MockCourseRepository, MockSubjectRepository,
        NoOpCourseCache,
    };

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let mut subjects = MockSubjectRepository::new();
        subjects.expect_save().times(0);
        let service = SubjectService::new(
            Arc::new(subjects),
            Arc::new(MockCourseRepository::new()),
            Arc::new(NoOpCourseCache),
        );

        let error = service
            .create_subject(SubjectDraft::new(""))
            .await
            .expect_err("blank name");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn delete_subject_clears_the_cache_and_tolerates_failures() {
        let mut subjects = MockSubjectRepository::new();
        subjects.expect_exists_by_id().return_once(|_| Ok(true));
        subjects.expect_delete_by_id().times(1).return_once(|_| Ok(()));
        let mut cache = MockCourseCache::new();
        cache
            .expect_clear()
            .times(1)
            .return_once(|| Err(CourseCacheError::backend("gone")));
        let service = SubjectService::new(
            Arc::new(subjects),
            Arc::new(MockCourseRepository::new()),
            Arc::new(cache),
        );

        service
            .delete_subject(SubjectId::new(1))
            .await
            .expect("subject deleted");
    }

    #[tokio::test]
    async fn update_missing_subject_is_not_found() {
        let mut subjects = MockSubjectRepository::new();
        subjects.expect_exists_by_id().return_once(|_| Ok(false));
        subjects.expect_save().times(0);
        let service = SubjectService::new(
            Arc::new(subjects),
            Arc::new(MockCourseRepository::new()),
            Arc::new(NoOpCourseCache),
        );

        let error = service
            .update_subject(SubjectId::new(3), SubjectDraft::new("Maths"))
            .await
            .expect_err("missing subject");

        assert_eq!(error.message(), "Subject not found with ID: 3");
    }

    #[tokio::test]
    async fn course_counts_come_from_the_course_repository() {
        let mut courses = MockCourseRepository::new();
        courses.expect_count_by_subject().return_once(|| {
            Ok(vec![SubjectCourseCount {
                subject_id: SubjectId::new(1),
                course_count: 2,
            }])
        });
        let service = SubjectService::new(
            Arc::new(MockSubjectRepository::new()),
            Arc::new(courses),
            Arc::new(NoOpCourseCache),
        );

        let counts = service.course_counts().await.expect("counts");

        assert_eq!(counts[0].course_count, 2);
    }
}
