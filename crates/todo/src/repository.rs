//! Repository seam for to-dos.
//!
//! Persistence strategy is an external collaborator; the trait is the
//! boundary, and the in-memory implementation backs the service in dev and
//! tests. Repository failures surface as `AppError` so unclassified store
//! faults flow to the failure dispatcher unmodified.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;

use taskhub_core::{AppError, AppResult, TodoId};

use crate::todo::Todo;

/// One page of to-dos plus paging metadata.
#[derive(Debug, Clone)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

/// Storage boundary for to-dos.
///
/// `page` expects `size >= 1`; paging parameters are validated at the
/// request boundary before they reach the repository.
pub trait TodoRepository: Send + Sync {
    fn save(&self, todo: Todo) -> AppResult<Todo>;
    fn find_by_id(&self, id: TodoId) -> AppResult<Option<Todo>>;
    fn delete(&self, id: TodoId) -> AppResult<()>;
    /// Page through all to-dos, most recently updated first.
    fn page(&self, page: usize, size: usize) -> AppResult<TodoPage>;
}

/// In-memory store backing the service in dev and tests.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    inner: RwLock<HashMap<TodoId, Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn save(&self, todo: Todo) -> AppResult<Todo> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| AppError::Internal(anyhow!("todo store lock poisoned")))?;
        map.insert(todo.id(), todo.clone());
        Ok(todo)
    }

    fn find_by_id(&self, id: TodoId) -> AppResult<Option<Todo>> {
        let map = self
            .inner
            .read()
            .map_err(|_| AppError::Internal(anyhow!("todo store lock poisoned")))?;
        Ok(map.get(&id).cloned())
    }

    fn delete(&self, id: TodoId) -> AppResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| AppError::Internal(anyhow!("todo store lock poisoned")))?;
        map.remove(&id);
        Ok(())
    }

    fn page(&self, page: usize, size: usize) -> AppResult<TodoPage> {
        // size >= 1 is validated at the request boundary; clamp so a
        // caller that skipped it cannot divide by zero below.
        let size = size.max(1);
        let map = self
            .inner
            .read()
            .map_err(|_| AppError::Internal(anyhow!("todo store lock poisoned")))?;

        let mut all: Vec<Todo> = map.values().cloned().collect();
        all.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));

        let total_elements = all.len();
        let total_pages = total_elements.div_ceil(size);
        let items = all.into_iter().skip(page * size).take(size).collect();

        Ok(TodoPage {
            items,
            page,
            size,
            total_elements,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_find_round_trips() {
        let repo = InMemoryTodoRepository::new();
        let todo = repo.save(Todo::new("Buy milk".into(), false)).unwrap();
        let found = repo.find_by_id(todo.id()).unwrap().unwrap();
        assert_eq!(found, todo);
    }

    #[test]
    fn delete_removes_the_entity() {
        let repo = InMemoryTodoRepository::new();
        let todo = repo.save(Todo::new("Buy milk".into(), false)).unwrap();
        repo.delete(todo.id()).unwrap();
        assert!(repo.find_by_id(todo.id()).unwrap().is_none());
    }

    #[test]
    fn paging_sorts_by_updated_at_descending() {
        let repo = InMemoryTodoRepository::new();
        let first = repo.save(Todo::new("first".into(), false)).unwrap();
        let mut second = repo.save(Todo::new("second".into(), false)).unwrap();
        second.apply_update("second updated".into(), None);
        let second = repo.save(second).unwrap();

        let page = repo.page(0, 10).unwrap();
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items[0].id(), second.id());
        assert_eq!(page.items[1].id(), first.id());
    }

    #[test]
    fn paging_splits_and_counts_pages() {
        let repo = InMemoryTodoRepository::new();
        for i in 0..5 {
            repo.save(Todo::new(format!("todo {i}"), false)).unwrap();
        }

        let page = repo.page(0, 2).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);

        let last = repo.page(2, 2).unwrap();
        assert_eq!(last.items.len(), 1);

        let beyond = repo.page(3, 2).unwrap();
        assert!(beyond.items.is_empty());
    }

    #[test]
    fn zero_size_clamps_to_one_instead_of_panicking() {
        let repo = InMemoryTodoRepository::new();
        for i in 0..3 {
            repo.save(Todo::new(format!("todo {i}"), false)).unwrap();
        }

        let page = repo.page(0, 0).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.size, 1);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 3);
    }
}
