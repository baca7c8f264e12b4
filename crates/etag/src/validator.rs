//! Presence and equality checks for client-supplied etags.
//!
//! Mutating requests must pass both, in order: presence first, then
//! equality, so a missing etag never surfaces as a misleading mismatch.

use taskhub_core::{AppError, AppResult};

use crate::generator::Etag;

/// Assert that a client-supplied etag is present and non-blank.
///
/// `None`, the empty string and whitespace-only values all count as missing.
pub fn assert_present(etag: Option<&str>) -> AppResult<()> {
    match etag {
        Some(value) if !value.trim().is_empty() => Ok(()),
        other => Err(AppError::etag_missing(other)),
    }
}

/// Assert that the client-supplied etag equals the expected current etag.
///
/// Exact string equality; no normalization, no `*` wildcard support. The
/// mismatch failure carries both values.
pub fn assert_matches(etag: &str, expected: &Etag) -> AppResult<()> {
    if expected == etag {
        Ok(())
    } else {
        Err(AppError::etag_mismatch(etag, expected.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::source::EtagSource;
    use taskhub_core::ErrorKind;

    struct FakeSource(&'static str);

    impl EtagSource for FakeSource {
        fn etag_base(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn present_accepts_a_quoted_value() {
        assert!(assert_present(Some("\"x\"")).is_ok());
    }

    #[test]
    fn missing_values_fail_with_tag_missing() {
        for value in [None, Some(""), Some("   "), Some("\t")] {
            let err = assert_present(value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TagMissing);
        }
    }

    #[test]
    fn missing_failure_carries_the_offending_value() {
        match assert_present(Some("  ")).unwrap_err() {
            AppError::EtagMissing { etag } => assert_eq!(etag.as_deref(), Some("  ")),
            other => panic!("expected EtagMissing, got {other:?}"),
        }
        match assert_present(None).unwrap_err() {
            AppError::EtagMissing { etag } => assert_eq!(etag, None),
            other => panic!("expected EtagMissing, got {other:?}"),
        }
    }

    #[test]
    fn equal_etags_pass() {
        let expected = generate(&FakeSource("id:ts")).unwrap();
        assert!(assert_matches(expected.as_str(), &expected).is_ok());
    }

    #[test]
    fn mismatch_carries_both_values() {
        let expected = generate(&FakeSource("id:ts")).unwrap();
        let err = assert_matches("\"stale\"", &expected).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TagMismatch);
        match err {
            AppError::EtagMismatch { etag, expected: exp } => {
                assert_eq!(etag, "\"stale\"");
                assert_eq!(exp, expected.as_str());
            }
            other => panic!("expected EtagMismatch, got {other:?}"),
        }
    }

    #[test]
    fn wildcard_is_not_special_cased() {
        let expected = generate(&FakeSource("id:ts")).unwrap();
        let err = assert_matches("*", &expected).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TagMismatch);
    }

    #[test]
    fn comparison_is_not_normalized() {
        let expected = generate(&FakeSource("id:ts")).unwrap();
        // Same value with surrounding whitespace must not match.
        let padded = format!(" {} ", expected.as_str());
        assert!(assert_matches(&padded, &expected).is_err());
    }
}
