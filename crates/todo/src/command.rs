//! Command-side service: create, conditional update, conditional delete.
//!
//! Mutating requests walk a fixed state machine: presence of the
//! conditional header is asserted at the request boundary, then the entity
//! is loaded, the expected etag is derived from the freshly loaded state,
//! equality is asserted, the entity mutates, is persisted, and a new etag
//! is issued. Conflicting writers are not serialized by locks; the loser
//! of a race fails deterministically with an etag mismatch.

use std::sync::Arc;

use taskhub_core::{AppError, AppResult, TodoId};
use taskhub_etag::{EtagResponse, assert_matches, generator};

use crate::config::TodoConfig;
use crate::normalize::normalize_title;
use crate::repository::TodoRepository;
use crate::todo::Todo;

pub struct TodoCommandService<R> {
    repository: Arc<R>,
    config: TodoConfig,
}

impl<R: TodoRepository> TodoCommandService<R> {
    pub fn new(repository: Arc<R>, config: TodoConfig) -> Self {
        Self { repository, config }
    }

    /// Create a to-do and return it with its initial etag.
    pub fn create(
        &self,
        title: Option<&str>,
        completed: Option<bool>,
    ) -> AppResult<EtagResponse<Todo>> {
        let title = normalize_title(title, &self.config)?;
        let todo = Todo::new(title, completed.unwrap_or(false));
        let saved = self.repository.save(todo)?;
        let etag = generator::generate_with_context(&saved, "create_todo")?;

        Ok(EtagResponse::new(saved, etag))
    }

    /// Conditionally update a to-do and return it with its new etag.
    ///
    /// The expected etag is always recomputed from the entity loaded within
    /// this request; a stale `if_match` fails with a mismatch before any
    /// state changes.
    pub fn update(
        &self,
        id: TodoId,
        title: Option<&str>,
        completed: Option<bool>,
        if_match: &str,
    ) -> AppResult<EtagResponse<Todo>> {
        let mut existing = self.find_or_fail(id)?;
        let expected = generator::generate_with_context(&existing, "update_todo")?;
        assert_matches(if_match, &expected)?;

        let title = normalize_title(title, &self.config)?;
        existing.apply_update(title, completed);
        let saved = self.repository.save(existing)?;
        let etag = generator::generate_with_context(&saved, "update_todo")?;

        Ok(EtagResponse::new(saved, etag))
    }

    /// Conditionally delete a to-do. No body on success, only a status.
    pub fn delete(&self, id: TodoId, if_match: &str) -> AppResult<()> {
        let existing = self.find_or_fail(id)?;
        let expected = generator::generate_with_context(&existing, "delete_todo")?;
        assert_matches(if_match, &expected)?;

        self.repository.delete(id)
    }

    fn find_or_fail(&self, id: TodoId) -> AppResult<Todo> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryTodoRepository;
    use taskhub_core::ErrorKind;

    fn service() -> TodoCommandService<InMemoryTodoRepository> {
        TodoCommandService::new(Arc::new(InMemoryTodoRepository::new()), TodoConfig::default())
    }

    #[test]
    fn create_normalizes_the_title_and_issues_an_etag() {
        let svc = service();
        let result = svc.create(Some("  Buy milk  "), None).unwrap();
        assert_eq!(result.data.title(), "Buy milk");
        assert!(!result.data.completed());
        assert!(result.etag.as_str().starts_with('"'));
    }

    #[test]
    fn update_with_current_etag_succeeds_and_rotates_the_etag() {
        let svc = service();
        let created = svc.create(Some("Buy milk"), None).unwrap();

        let updated = svc
            .update(created.data.id(), Some("Buy bread"), Some(true), created.etag.as_str())
            .unwrap();

        assert_eq!(updated.data.title(), "Buy bread");
        assert!(updated.data.completed());
        assert_ne!(updated.etag, created.etag);
    }

    #[test]
    fn update_with_stale_etag_fails_and_leaves_state_untouched() {
        let svc = service();
        let created = svc.create(Some("Buy milk"), None).unwrap();
        let id = created.data.id();

        let updated = svc
            .update(id, Some("Buy bread"), None, created.etag.as_str())
            .unwrap();

        // Replaying the first update with the original etag must fail.
        let err = svc
            .update(id, Some("Buy eggs"), None, created.etag.as_str())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TagMismatch);

        let current = svc.repository.find_by_id(id).unwrap().unwrap();
        assert_eq!(current.title(), "Buy bread");
        assert_eq!(current.updated_at(), updated.data.updated_at());
    }

    #[test]
    fn racing_writers_exactly_one_succeeds() {
        let svc = service();
        let created = svc.create(Some("Buy milk"), None).unwrap();
        let id = created.data.id();

        // Both writers read the same snapshot tag.
        let shared_etag = created.etag.clone();

        let a = svc.update(id, Some("writer A"), None, shared_etag.as_str());
        let b = svc.update(id, Some("writer B"), None, shared_etag.as_str());

        assert!(a.is_ok());
        let err = b.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TagMismatch);

        let current = svc.repository.find_by_id(id).unwrap().unwrap();
        assert_eq!(current.title(), "writer A");
    }

    #[test]
    fn update_of_missing_entity_fails_with_not_found() {
        let svc = service();
        let err = svc
            .update(TodoId::new(), Some("Buy milk"), None, "\"any\"")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityNotFound);
    }

    #[test]
    fn field_validation_runs_after_the_etag_check() {
        let svc = service();
        let created = svc.create(Some("Buy milk"), None).unwrap();

        // Stale etag wins over the invalid title.
        let err = svc
            .update(created.data.id(), Some("   "), None, "\"stale\"")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TagMismatch);

        // With a current etag, the invalid title is reported.
        let err = svc
            .update(created.data.id(), Some("   "), None, created.etag.as_str())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldValidationFailure);
    }

    #[test]
    fn delete_with_current_etag_removes_the_entity() {
        let svc = service();
        let created = svc.create(Some("Buy milk"), None).unwrap();
        let id = created.data.id();

        svc.delete(id, created.etag.as_str()).unwrap();
        assert!(svc.repository.find_by_id(id).unwrap().is_none());
    }

    #[test]
    fn delete_with_stale_etag_keeps_the_entity() {
        let svc = service();
        let created = svc.create(Some("Buy milk"), None).unwrap();
        let id = created.data.id();
        svc.update(id, Some("Buy bread"), None, created.etag.as_str())
            .unwrap();

        let err = svc.delete(id, created.etag.as_str()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TagMismatch);
        assert!(svc.repository.find_by_id(id).unwrap().is_some());
    }

    #[test]
    fn delete_of_missing_entity_fails_with_not_found() {
        let svc = service();
        let err = svc.delete(TodoId::new(), "\"any\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityNotFound);
    }
}
