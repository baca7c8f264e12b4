//! Audit timestamps carried by persisted entities.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Creation/modification timestamps.
///
/// `updated_at` is authoritative for etag derivation, so [`Audit::touch`]
/// must strictly advance it: a mutation that left the timestamp unchanged
/// would leave previously issued etags valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Audit {
    /// Fresh audit state for a newly created entity.
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance `updated_at`, strictly, even on coarse clocks.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_audit_has_equal_timestamps() {
        let audit = Audit::now();
        assert_eq!(audit.created_at, audit.updated_at);
    }

    #[test]
    fn touch_strictly_advances_updated_at() {
        let mut audit = Audit::now();
        let before = audit.updated_at;
        audit.touch();
        assert!(audit.updated_at > before);
        assert_eq!(audit.created_at, before);
    }

    #[test]
    fn touch_advances_even_when_clock_is_behind() {
        let mut audit = Audit::now();
        // Force updated_at far into the future; the next touch must still move.
        audit.updated_at = audit.updated_at + Duration::days(365);
        let before = audit.updated_at;
        audit.touch();
        assert!(audit.updated_at > before);
    }
}
