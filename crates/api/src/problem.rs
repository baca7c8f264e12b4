//! Problem responses and the failure dispatcher.
//!
//! Every failure arriving from the command/query layer passes through
//! [`failure_response`], the single place that decides external status and
//! message shape. Client-caused kinds log at `warn` with enough context to
//! reconstruct the failure; server-caused kinds log at `error` and render a
//! fixed detail so internals never leak to the caller.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use taskhub_core::{AppError, ErrorKind};

/// Content type of the failure payload.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// The rendered failure payload.
///
/// `errorCode` and `status` are always consistent with the originating
/// catalog entry; `instance` is the path of the failing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResponse {
    pub status: u16,
    pub error_code: String,
    pub title: String,
    pub detail: String,
    pub instance: String,
}

impl IntoResponse for ProblemResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        response
    }
}

/// Dispatch a failure into an HTTP response.
pub fn failure_response(err: &AppError, instance: &str) -> Response {
    problem_for(err, instance).into_response()
}

/// Classify a failure, log it, and render its problem payload.
pub fn problem_for(err: &AppError, instance: &str) -> ProblemResponse {
    let kind = err.kind();
    log_failure(kind, err);

    let (title_args, detail_args) = template_args(err);
    match render_problem(kind, &title_args, &detail_args, instance) {
        Ok(problem) => problem,
        Err(handling) => {
            // The handling path itself failed; report that, not the original.
            let kind = ErrorKind::FailureHandlingFault;
            tracing::error!(
                code = kind.code(),
                error = %handling,
                "failed to render a problem response"
            );
            fixed_problem(kind, instance)
        }
    }
}

/// Positional template arguments per failure variant.
///
/// Server-caused kinds take no arguments: their templates are fixed
/// strings and the diagnostic context goes to the log only.
fn template_args(err: &AppError) -> (Vec<String>, Vec<String>) {
    match err {
        AppError::RequestValidation { field, .. } => (vec![], vec![field.clone()]),
        AppError::FieldValidation { field, value, .. } => {
            (vec![field.clone()], vec![field.clone(), value.clone()])
        }
        AppError::EtagMissing { .. }
        | AppError::EtagMismatch { .. }
        | AppError::EtagGeneration { .. }
        | AppError::NotFound { .. }
        | AppError::ValidationHandling { .. }
        | AppError::Internal(_) => (vec![], vec![]),
    }
}

fn render_problem(
    kind: ErrorKind,
    title_args: &[String],
    detail_args: &[String],
    instance: &str,
) -> Result<ProblemResponse, AppError> {
    let entry = kind.entry();
    Ok(ProblemResponse {
        status: entry.status,
        error_code: entry.code.to_string(),
        title: render(entry.title, title_args)?,
        detail: render(entry.detail, detail_args)?,
        instance: instance.to_string(),
    })
}

/// A problem payload rendered from a template-free catalog entry.
fn fixed_problem(kind: ErrorKind, instance: &str) -> ProblemResponse {
    let entry = kind.entry();
    ProblemResponse {
        status: entry.status,
        error_code: entry.code.to_string(),
        title: entry.title.to_string(),
        detail: entry.detail.to_string(),
        instance: instance.to_string(),
    }
}

/// Fill a template's positional `{}` placeholders.
///
/// An arity mismatch in either direction is a failure-handling fault: the
/// catalog entry and the failure variant disagree about the context the
/// template needs.
fn render(template: &str, args: &[String]) -> Result<String, AppError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut used = 0;

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        let arg = args.get(used).ok_or_else(|| {
            AppError::validation_handling(format!(
                "template {template:?} expects more than {used} argument(s)"
            ))
        })?;
        out.push_str(arg);
        used += 1;
        rest = &rest[pos + 2..];
    }

    if used < args.len() {
        return Err(AppError::validation_handling(format!(
            "template {template:?} consumed {used} of {} argument(s)",
            args.len()
        )));
    }

    out.push_str(rest);
    Ok(out)
}

fn log_failure(kind: ErrorKind, err: &AppError) {
    let code = kind.code();
    if kind.is_client_caused() {
        match err {
            AppError::RequestValidation { field, reason } => {
                tracing::warn!(code, field = %field, reason = %reason, "request validation failed");
            }
            AppError::FieldValidation {
                field,
                value,
                reason,
            } => {
                tracing::warn!(
                    code,
                    field = %field,
                    value = %value,
                    reason = %reason,
                    "field validation failed"
                );
            }
            AppError::EtagMissing { etag } => {
                tracing::warn!(code, etag = ?etag, "etag missing");
            }
            AppError::EtagMismatch { etag, expected } => {
                tracing::warn!(code, etag = %etag, expected = %expected, "etag mismatch");
            }
            AppError::NotFound { id } => {
                tracing::warn!(code, id = %id, "todo not found");
            }
            other => {
                tracing::warn!(code, error = %other, "client-caused failure");
            }
        }
    } else {
        match err {
            AppError::EtagGeneration { context, reason } => {
                tracing::error!(code, context, reason = %reason, "etag generation failed");
            }
            AppError::ValidationHandling { reason } => {
                tracing::error!(code, reason = %reason, "validation handling failed");
            }
            AppError::Internal(cause) => {
                tracing::error!(code, error = %cause, "unexpected internal error");
            }
            other => {
                tracing::error!(code, error = %other, "server-caused failure");
            }
        }
    }
}
