//! To-do domain configuration.

/// Bounds for the configurable title length.
const TITLE_MAX_LENGTH_MIN: usize = 1;
const TITLE_MAX_LENGTH_MAX: usize = 100;
const TITLE_MAX_LENGTH_DEFAULT: usize = 100;

/// Tunable constants of the to-do domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoConfig {
    /// Maximum number of characters a title may have (1..=100).
    pub title_max_length: usize,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            title_max_length: TITLE_MAX_LENGTH_DEFAULT,
        }
    }
}

impl TodoConfig {
    /// Read configuration from the environment (`TODO_TITLE_MAX_LENGTH`),
    /// falling back to the default and clamping out-of-range values.
    pub fn from_env() -> Self {
        let title_max_length = match std::env::var("TODO_TITLE_MAX_LENGTH") {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(value) => value.clamp(TITLE_MAX_LENGTH_MIN, TITLE_MAX_LENGTH_MAX),
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        "TODO_TITLE_MAX_LENGTH is not a number; using default"
                    );
                    TITLE_MAX_LENGTH_DEFAULT
                }
            },
            Err(_) => TITLE_MAX_LENGTH_DEFAULT,
        };

        Self { title_max_length }
    }
}
