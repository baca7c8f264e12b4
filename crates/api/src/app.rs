//! Router and request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Query};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower::ServiceBuilder;

use taskhub_core::{AppError, TodoId};
use taskhub_etag::{EtagResponse, assert_present};
use taskhub_todo::{
    InMemoryTodoRepository, Todo, TodoCommandService, TodoConfig, TodoQueryService,
};

use crate::dto::{PageParams, PageResponse, TodoRequest, TodoResponse};
use crate::problem::failure_response;

/// Shared per-process services. Requests share nothing mutable beyond the
/// repository; each handler operates on its own loaded entity copy.
pub struct AppState {
    commands: TodoCommandService<InMemoryTodoRepository>,
    queries: TodoQueryService<InMemoryTodoRepository>,
}

/// Build the application router with an in-memory store.
pub fn build_app(config: TodoConfig) -> Router {
    let repository = Arc::new(InMemoryTodoRepository::new());
    let state = Arc::new(AppState {
        commands: TodoCommandService::new(repository.clone(), config),
        queries: TodoQueryService::new(repository),
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .layer(ServiceBuilder::new().layer(Extension(state)))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn create_todo(
    Extension(state): Extension<Arc<AppState>>,
    uri: Uri,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> Response {
    let instance = uri.path();

    let request = match read_body(body) {
        Ok(request) => request,
        Err(e) => return failure_response(&e, instance),
    };
    if let Err(e) = request.validate() {
        return failure_response(&e, instance);
    }

    match state
        .commands
        .create(request.title.as_deref(), request.completed)
    {
        Ok(result) => {
            let location = format!("{instance}/{}", result.data.id());
            tagged_response(StatusCode::CREATED, result, Some(location))
        }
        Err(e) => failure_response(&e, instance),
    }
}

async fn get_todo(
    Extension(state): Extension<Arc<AppState>>,
    uri: Uri,
    Path(id): Path<String>,
) -> Response {
    let instance = uri.path();

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return failure_response(&e, instance),
    };

    match state.queries.get(id) {
        Ok(result) => tagged_response(StatusCode::OK, result, None),
        Err(e) => failure_response(&e, instance),
    }
}

async fn list_todos(
    Extension(state): Extension<Arc<AppState>>,
    uri: Uri,
    Query(params): Query<PageParams>,
) -> Response {
    let instance = uri.path();

    let (page, size) = match params.resolve() {
        Ok(resolved) => resolved,
        Err(e) => return failure_response(&e, instance),
    };

    match state.queries.page(page, size) {
        Ok(paged) => (StatusCode::OK, Json(PageResponse::from(paged))).into_response(),
        Err(e) => failure_response(&e, instance),
    }
}

async fn update_todo(
    Extension(state): Extension<Arc<AppState>>,
    uri: Uri,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> Response {
    let instance = uri.path();

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return failure_response(&e, instance),
    };
    let request = match read_body(body) {
        Ok(request) => request,
        Err(e) => return failure_response(&e, instance),
    };
    if let Err(e) = request.validate() {
        return failure_response(&e, instance);
    }

    // Presence, then equality: a missing header must never surface as a
    // mismatch. Equality is asserted inside the service, against the
    // freshly loaded entity.
    let if_match = if_match_header(&headers);
    if let Err(e) = assert_present(if_match) {
        return failure_response(&e, instance);
    }
    let if_match = if_match.unwrap_or_default();

    match state
        .commands
        .update(id, request.title.as_deref(), request.completed, if_match)
    {
        Ok(result) => tagged_response(StatusCode::OK, result, None),
        Err(e) => failure_response(&e, instance),
    }
}

async fn delete_todo(
    Extension(state): Extension<Arc<AppState>>,
    uri: Uri,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let instance = uri.path();

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return failure_response(&e, instance),
    };

    // Asserted before any entity lookup: a delete without the conditional
    // header must fail without touching the store.
    let if_match = if_match_header(&headers);
    if let Err(e) = assert_present(if_match) {
        return failure_response(&e, instance);
    }
    let if_match = if_match.unwrap_or_default();

    match state.commands.delete(id, if_match) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => failure_response(&e, instance),
    }
}

fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    raw.parse()
}

fn if_match_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::IF_MATCH).and_then(|v| v.to_str().ok())
}

fn read_body(body: Result<Json<TodoRequest>, JsonRejection>) -> Result<TodoRequest, AppError> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => Err(AppError::request_validation("body", rejection.body_text())),
    }
}

/// Success response carrying the entity body plus its etag header (and,
/// for creates, a `Location` header).
fn tagged_response(
    status: StatusCode,
    result: EtagResponse<Todo>,
    location: Option<String>,
) -> Response {
    let body = TodoResponse::from(&result.data);
    let mut response = (status, Json(body)).into_response();

    match HeaderValue::from_str(result.etag.as_str()) {
        Ok(value) => {
            response.headers_mut().insert(header::ETAG, value);
        }
        Err(e) => {
            return failure_response(
                &AppError::Internal(anyhow::anyhow!("etag is not a valid header value: {e}")),
                "",
            );
        }
    }
    if let Some(location) = location {
        if let Ok(value) = HeaderValue::from_str(&location) {
            response.headers_mut().insert(header::LOCATION, value);
        }
    }

    response
}
