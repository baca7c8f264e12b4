//! Request/response DTOs and their mapping to/from domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::{AppError, AppResult, TodoId};
use taskhub_etag::EtagResponse;
use taskhub_todo::{PagedTodos, Todo};

/// Create/update request body.
///
/// Both fields are optional at the wire level so that validation failures
/// surface as catalogued problems instead of deserialization errors.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoRequest {
    /// Request-boundary validation: `title` must be present and not
    /// whitespace-only. Deeper checks (trim result, max length) are the
    /// service layer's field validation.
    pub fn validate(&self) -> AppResult<()> {
        match self.title.as_deref() {
            None => Err(AppError::request_validation("title", "must not be null")),
            Some(title) if title.trim().is_empty() => Err(AppError::request_validation(
                "title",
                "must not be whitespace only",
            )),
            Some(_) => Ok(()),
        }
    }
}

/// Single to-do representation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id(),
            title: todo.title().to_string(),
            completed: todo.completed(),
            created_at: todo.created_at(),
            updated_at: todo.updated_at(),
        }
    }
}

/// One paged item: the to-do plus its own etag.
#[derive(Debug, Clone, Serialize)]
pub struct PageItem {
    pub data: TodoResponse,
    pub etag: String,
}

impl From<EtagResponse<Todo>> for PageItem {
    fn from(item: EtagResponse<Todo>) -> Self {
        Self {
            data: TodoResponse::from(&item.data),
            etag: item.etag.into_string(),
        }
    }
}

/// Page envelope for list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub content: Vec<PageItem>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl From<PagedTodos> for PageResponse {
    fn from(paged: PagedTodos) -> Self {
        Self {
            content: paged.items.into_iter().map(PageItem::from).collect(),
            page: paged.page,
            size: paged.size,
            total_elements: paged.total_elements,
            total_pages: paged.total_pages,
        }
    }
}

/// Paging query parameters, taken as raw strings so that non-numeric
/// values become catalogued request-validation failures rather than a
/// framework rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
}

const DEFAULT_PAGE: usize = 0;
const DEFAULT_PAGE_SIZE: usize = 10;
const MIN_PAGE_SIZE: usize = 1;
const MAX_PAGE_SIZE: usize = 100;

impl PageParams {
    /// Resolve defaults and validate ranges: `page >= 0`,
    /// `1 <= size <= 100`.
    pub fn resolve(&self) -> AppResult<(usize, usize)> {
        let page = match self.page.as_deref() {
            None => DEFAULT_PAGE,
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                AppError::request_validation("page", "must be a non-negative integer")
            })?,
        };

        let size = match self.size.as_deref() {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => {
                let size = raw
                    .parse::<usize>()
                    .map_err(|_| AppError::request_validation("size", "must be an integer"))?;
                if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
                    return Err(AppError::request_validation(
                        "size",
                        format!("must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}"),
                    ));
                }
                size
            }
        };

        Ok((page, size))
    }
}
