//! Error kinds, the error catalog, and the application failure enum.
//!
//! The catalog entries (code, status, title, detail template) are an
//! external contract: clients dispatch on the `errorCode` strings, so their
//! spelling and casing must not change across versions.

use thiserror::Error;
use uuid::Uuid;

/// Result type used across the application layers.
pub type AppResult<T> = Result<T, AppError>;

/// Closed set of failure kinds known to the service.
///
/// Every kind maps to exactly one catalog entry via [`ErrorKind::entry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request-level validation failed (missing/blank field, malformed
    /// path or query parameter, unreadable body).
    RequestValidationFailure,
    /// Service-level validation of a to-do field failed.
    FieldValidationFailure,
    /// The conditional header was absent or blank on a mutating request.
    TagMissing,
    /// No to-do with the requested id exists.
    EntityNotFound,
    /// The supplied etag did not match the resource's current etag.
    TagMismatch,
    /// The etag could not be derived from its source.
    TagGenerationFailure,
    /// The failure-handling path itself failed (e.g. it could not extract
    /// the context it needs to render a response).
    FailureHandlingFault,
    /// Anything unclassified. Never exposes internal detail to the caller.
    InternalFault,
}

/// One row of the error catalog.
///
/// `title` and `detail` are templates with positional `{}` placeholders,
/// filled by the failure dispatcher from the failure's context.
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Stable, machine-readable error code (external contract).
    pub code: &'static str,
    /// HTTP status the kind renders with.
    pub status: u16,
    /// Title template for the problem response.
    pub title: &'static str,
    /// Detail template for the problem response.
    pub detail: &'static str,
}

const REQUEST_VALIDATION_FAILURE: CatalogEntry = CatalogEntry {
    code: "REQUEST-400",
    status: 400,
    title: "Request Validation Failure",
    detail: "Request validation failed for field: {}",
};

const FIELD_VALIDATION_FAILURE: CatalogEntry = CatalogEntry {
    code: "TODO-400-FIELD",
    status: 400,
    title: "Invalid To-do Field '{}'",
    detail: "Validation failed for field '{}' with value '{}'.",
};

const TAG_MISSING: CatalogEntry = CatalogEntry {
    code: "ETAG-400-MISSING",
    status: 400,
    title: "ETag Missing",
    detail: "ETag must not be null or blank.",
};

const ENTITY_NOT_FOUND: CatalogEntry = CatalogEntry {
    code: "TODO-404",
    status: 404,
    title: "To-do Not Found",
    detail: "Todo with the specified ID does not exist.",
};

const TAG_MISMATCH: CatalogEntry = CatalogEntry {
    code: "ETAG-412",
    status: 412,
    title: "ETag Mismatch",
    detail: "The ETag does not match the expected value.",
};

const TAG_GENERATION_FAILURE: CatalogEntry = CatalogEntry {
    code: "ETAG-500-GENERATION",
    status: 500,
    title: "ETag Generation Failure",
    detail: "An unexpected error occurred while generating the ETag.",
};

const FAILURE_HANDLING_FAULT: CatalogEntry = CatalogEntry {
    code: "VALIDATION-500-HANDLING",
    status: 500,
    title: "Request Validation Handling Failure",
    detail: "An unexpected error occurred while handling a validation failure.",
};

const INTERNAL_FAULT: CatalogEntry = CatalogEntry {
    code: "SYS-500",
    status: 500,
    title: "Internal Server Error",
    detail: "An unexpected internal server error occurred.",
};

impl ErrorKind {
    /// Every declared kind, for totality checks.
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::RequestValidationFailure,
        ErrorKind::FieldValidationFailure,
        ErrorKind::TagMissing,
        ErrorKind::EntityNotFound,
        ErrorKind::TagMismatch,
        ErrorKind::TagGenerationFailure,
        ErrorKind::FailureHandlingFault,
        ErrorKind::InternalFault,
    ];

    /// Resolve the catalog entry for this kind.
    ///
    /// Total over the closed enum; a missing row is a build-time defect,
    /// never a runtime error.
    pub const fn entry(self) -> &'static CatalogEntry {
        match self {
            ErrorKind::RequestValidationFailure => &REQUEST_VALIDATION_FAILURE,
            ErrorKind::FieldValidationFailure => &FIELD_VALIDATION_FAILURE,
            ErrorKind::TagMissing => &TAG_MISSING,
            ErrorKind::EntityNotFound => &ENTITY_NOT_FOUND,
            ErrorKind::TagMismatch => &TAG_MISMATCH,
            ErrorKind::TagGenerationFailure => &TAG_GENERATION_FAILURE,
            ErrorKind::FailureHandlingFault => &FAILURE_HANDLING_FAULT,
            ErrorKind::InternalFault => &INTERNAL_FAULT,
        }
    }

    /// Stable error code of this kind.
    pub const fn code(self) -> &'static str {
        self.entry().code
    }

    /// HTTP status of this kind.
    pub const fn status(self) -> u16 {
        self.entry().status
    }

    /// Client-caused kinds (4xx) log at `warn`; server-caused (5xx) at `error`.
    pub const fn is_client_caused(self) -> bool {
        self.entry().status < 500
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Application failure.
///
/// Raised as a typed value at the point of violation detection and carried
/// unmodified up to the failure dispatcher, which is the single place that
/// decides HTTP status and external message shape. No layer below the
/// dispatcher may swallow, retry, or reinterpret a variant.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request-level validation failure.
    #[error("request validation failed for field '{field}': {reason}")]
    RequestValidation { field: String, reason: String },

    /// Service-level field validation failure.
    #[error("invalid field '{field}' [value={value}, reason={reason}]")]
    FieldValidation {
        field: String,
        value: String,
        reason: String,
    },

    /// The conditional header was absent or blank.
    #[error("etag must not be null or blank [etag={etag:?}]")]
    EtagMissing { etag: Option<String> },

    /// The supplied etag does not match the current resource state.
    #[error("etag mismatch [etag={etag}, expected={expected}]")]
    EtagMismatch { etag: String, expected: String },

    /// The etag could not be derived from the source.
    #[error("etag generation failed [context={context}]: {reason}")]
    EtagGeneration {
        context: &'static str,
        reason: String,
    },

    /// No to-do with the given id exists.
    #[error("todo not found [id={id}]")]
    NotFound { id: Uuid },

    /// The failure-handling path itself could not do its job.
    #[error("validation handling failed: {reason}")]
    ValidationHandling { reason: String },

    /// Unclassified fault. Rendered with a fixed generic detail.
    #[error("unexpected internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn request_validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RequestValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field_validation(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::FieldValidation {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn etag_missing(etag: Option<&str>) -> Self {
        Self::EtagMissing {
            etag: etag.map(str::to_owned),
        }
    }

    pub fn etag_mismatch(etag: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::EtagMismatch {
            etag: etag.into(),
            expected: expected.into(),
        }
    }

    pub fn etag_generation(context: &'static str, reason: impl Into<String>) -> Self {
        Self::EtagGeneration {
            context,
            reason: reason.into(),
        }
    }

    pub fn not_found(id: impl Into<Uuid>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn validation_handling(reason: impl Into<String>) -> Self {
        Self::ValidationHandling {
            reason: reason.into(),
        }
    }

    /// The catalog kind this failure renders as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::RequestValidation { .. } => ErrorKind::RequestValidationFailure,
            AppError::FieldValidation { .. } => ErrorKind::FieldValidationFailure,
            AppError::EtagMissing { .. } => ErrorKind::TagMissing,
            AppError::EtagMismatch { .. } => ErrorKind::TagMismatch,
            AppError::EtagGeneration { .. } => ErrorKind::TagGenerationFailure,
            AppError::NotFound { .. } => ErrorKind::EntityNotFound,
            AppError::ValidationHandling { .. } => ErrorKind::FailureHandlingFault,
            AppError::Internal(_) => ErrorKind::InternalFault,
        }
    }
}
