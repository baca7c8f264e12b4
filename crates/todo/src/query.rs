//! Query-side service: fetch one to-do, page through all of them.

use std::sync::Arc;

use taskhub_core::{AppError, AppResult, TodoId};
use taskhub_etag::{EtagResponse, generator};

use crate::repository::TodoRepository;
use crate::todo::Todo;

/// One page of to-dos, each item paired with its own etag.
#[derive(Debug, Clone)]
pub struct PagedTodos {
    pub items: Vec<EtagResponse<Todo>>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

pub struct TodoQueryService<R> {
    repository: Arc<R>,
}

impl<R: TodoRepository> TodoQueryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetch a to-do with its current etag.
    pub fn get(&self, id: TodoId) -> AppResult<EtagResponse<Todo>> {
        let todo = self
            .repository
            .find_by_id(id)?
            .ok_or_else(|| AppError::not_found(id))?;
        let etag = generator::generate_with_context(&todo, "get_todo")?;

        Ok(EtagResponse::new(todo, etag))
    }

    /// Page through to-dos, most recently updated first.
    pub fn page(&self, page: usize, size: usize) -> AppResult<PagedTodos> {
        let result = self.repository.page(page, size)?;

        let items = result
            .items
            .into_iter()
            .map(|todo| {
                let etag = generator::generate_with_context(&todo, "get_todos")?;
                Ok(EtagResponse::new(todo, etag))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PagedTodos {
            items,
            page: result.page,
            size: result.size,
            total_elements: result.total_elements,
            total_pages: result.total_pages,
        })
    }
}
