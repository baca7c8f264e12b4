//! The to-do entity.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::{Audit, TodoId};
use taskhub_etag::EtagSource;

/// A single to-do item.
///
/// The persistence layer owns the authoritative state; the etag subsystem
/// only derives a view over `(id, updated_at)` and never mutates either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    title: String,
    completed: bool,
    audit: Audit,
}

impl Todo {
    /// Create a new to-do with a fresh id and audit state.
    ///
    /// `title` is expected to be already normalized (see
    /// [`crate::normalize::normalize_title`]).
    pub fn new(title: String, completed: bool) -> Self {
        Self {
            id: TodoId::new(),
            title,
            completed,
            audit: Audit::now(),
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.audit.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.audit.updated_at
    }

    /// Apply an update: replace the title, optionally flip the completed
    /// flag (omitted keeps the current value), and advance `updated_at`.
    ///
    /// Advancing the timestamp is what invalidates every previously issued
    /// etag for this entity.
    pub fn apply_update(&mut self, title: String, completed: Option<bool>) {
        self.title = title;
        if let Some(completed) = completed {
            self.completed = completed;
        }
        self.audit.touch();
    }
}

impl EtagSource for Todo {
    fn etag_base(&self) -> String {
        format!(
            "{}:{}",
            self.id,
            self.audit
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
        )
    }
}
