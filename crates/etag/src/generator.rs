//! Etag generation: SHA-256 over the source's base string, base64-encoded,
//! quoted to match the standard entity-tag syntax.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use taskhub_core::{AppError, AppResult};

use crate::source::EtagSource;

/// An opaque, quoted entity tag (e.g. `"AbCdEf123=="`).
///
/// Derived on demand from entity state, never persisted. Equality is exact
/// string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Etag(String);

impl Etag {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Display for Etag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Etag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Generate the etag for `source`.
///
/// Pure function of the source's base string: identical bases always yield
/// identical etags. Fails with a tag-generation failure when the source
/// yields a blank base (absent identity/timestamp).
pub fn generate<S: EtagSource>(source: &S) -> AppResult<Etag> {
    generate_with_context(source, "generate")
}

/// Like [`generate`], with a caller-supplied context identifier carried in
/// the failure for diagnostics.
pub fn generate_with_context<S: EtagSource>(
    source: &S,
    context: &'static str,
) -> AppResult<Etag> {
    let base = source.etag_base();
    if base.trim().is_empty() {
        return Err(AppError::etag_generation(
            context,
            "etag base string is blank",
        ));
    }

    let hash = Sha256::digest(base.as_bytes());
    Ok(Etag(format!("\"{}\"", BASE64.encode(hash))))
}
