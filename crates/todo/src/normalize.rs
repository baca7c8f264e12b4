//! Title validation and normalization.
//!
//! Service-level checks behind the request boundary: not-null, trim,
//! not-blank, max length. Each violation is a field-validation failure
//! (`TODO-400-FIELD`) carrying the field name, the offending value, and a
//! reason the caller can act on.

use taskhub_core::{AppError, AppResult};

use crate::config::TodoConfig;

const FIELD_TITLE: &str = "title";

/// Normalize a title: require presence, trim surrounding whitespace,
/// reject blank results, and enforce the configured maximum length.
pub fn normalize_title(title: Option<&str>, config: &TodoConfig) -> AppResult<String> {
    let Some(raw) = title else {
        return Err(AppError::field_validation(
            FIELD_TITLE,
            "",
            format!("Field '{FIELD_TITLE}' must not be null."),
        ));
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::field_validation(
            FIELD_TITLE,
            raw,
            format!("Field '{FIELD_TITLE}' must not be blank."),
        ));
    }

    if trimmed.chars().count() > config.title_max_length {
        return Err(AppError::field_validation(
            FIELD_TITLE,
            trimmed,
            format!(
                "Field '{FIELD_TITLE}' must not exceed {} characters.",
                config.title_max_length
            ),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::ErrorKind;

    fn config() -> TodoConfig {
        TodoConfig::default()
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let cases = [
            (" Test Title 2 ", "Test Title 2"),
            ("Test Title 4\t", "Test Title 4"),
            ("\nTest Title 5\n", "Test Title 5"),
            ("Test\nTitle 7\n", "Test\nTitle 7"),
            ("Test\r\nTitle 8\r\n", "Test\r\nTitle 8"),
        ];
        for (raw, want) in cases {
            assert_eq!(normalize_title(Some(raw), &config()).unwrap(), want);
        }
    }

    #[test]
    fn null_title_fails_with_field_validation() {
        let err = normalize_title(None, &config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldValidationFailure);
        match err {
            AppError::FieldValidation { field, reason, .. } => {
                assert_eq!(field, "title");
                assert_eq!(reason, "Field 'title' must not be null.");
            }
            other => panic!("expected FieldValidation, got {other:?}"),
        }
    }

    #[test]
    fn blank_titles_fail_with_field_validation() {
        for raw in ["", " ", "\t", "\n", "  ", " \n ", "\r\n", "\u{3000}"] {
            let err = normalize_title(Some(raw), &config()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::FieldValidationFailure, "raw={raw:?}");
        }
    }

    #[test]
    fn max_length_is_enforced_after_trimming() {
        let cfg = TodoConfig {
            title_max_length: 10,
        };
        let padded = format!("  {}  ", "x".repeat(10));
        assert_eq!(normalize_title(Some(&padded), &cfg).unwrap(), "x".repeat(10));

        let err = normalize_title(Some(&"x".repeat(11)), &cfg).unwrap_err();
        match err {
            AppError::FieldValidation { reason, .. } => {
                assert_eq!(reason, "Field 'title' must not exceed 10 characters.");
            }
            other => panic!("expected FieldValidation, got {other:?}"),
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let cfg = TodoConfig { title_max_length: 3 };
        assert!(normalize_title(Some("日本語"), &cfg).is_ok());
        assert!(normalize_title(Some("日本語だ"), &cfg).is_err());
    }
}
