//! Subject repository over the in-memory catalogue.

use async_trait::async_trait;

use crate::domain::ports::{CatalogueRepositoryError, SubjectRepository};
use crate::domain::{KeywordPair, Subject, SubjectDraft, SubjectId, tags_contain};

use super::{InMemoryCatalogue, advance, missing_row};

impl InMemoryCatalogue {
    async fn subjects_where(&self, predicate: impl Fn(&Subject) -> bool) -> Vec<Subject> {
        let state = self.state.read().await;
        state
            .subjects
            .values()
            .filter(|subject| predicate(subject))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SubjectRepository for InMemoryCatalogue {
    async fn save(
        &self,
        id: Option<SubjectId>,
        draft: &SubjectDraft,
    ) -> Result<Subject, CatalogueRepositoryError> {
        let mut state = self.state.write().await;
        let id = match id {
            Some(id) if state.subjects.contains_key(&id) => id,
            Some(_) => return Err(missing_row()),
            None => SubjectId::new(advance(&mut state.sequences.subject)),
        };
        let subject = Subject::new(id, draft.clone());
        state.subjects.insert(id, subject.clone());
        Ok(subject)
    }

    async fn find_by_id(&self, id: SubjectId) -> Result<Option<Subject>, CatalogueRepositoryError> {
        Ok(self.state.read().await.subjects.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Subject>, CatalogueRepositoryError> {
        Ok(self.subjects_where(|_| true).await)
    }

    async fn exists_by_id(&self, id: SubjectId) -> Result<bool, CatalogueRepositoryError> {
        Ok(self.state.read().await.subjects.contains_key(&id))
    }

    async fn delete_by_id(&self, id: SubjectId) -> Result<(), CatalogueRepositoryError> {
        self.state.write().await.remove_subject_cascade(id);
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
        Ok(self
            .subjects_where(|subject| {
                keywords.matches_any(&[Some(subject.name.as_str()), subject.description.as_deref()])
            })
            .await)
    }

    async fn find_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Subject>, CatalogueRepositoryError> {
        Ok(self
            .subjects_where(|subject| subject.category.as_deref() == Some(category))
            .await)
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Subject>, CatalogueRepositoryError> {
        Ok(self
            .subjects_where(|subject| tags_contain(&subject.tags, tag))
            .await)
    }
}
