//! Payload + etag pair returned by the service layer.

use serde::Serialize;

use crate::generator::Etag;

/// A response payload together with the etag of the state it represents.
///
/// For single-resource responses the etag is surfaced as a header; for
/// paged responses each item carries its own etag in the body.
#[derive(Debug, Clone, Serialize)]
pub struct EtagResponse<T> {
    pub data: T,
    pub etag: Etag,
}

impl<T> EtagResponse<T> {
    pub fn new(data: T, etag: Etag) -> Self {
        Self { data, etag }
    }
}
