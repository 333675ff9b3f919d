//! Core types for the task list.

use crate::error::{ValidationError, MAX_TEXT_CHARS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a task.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        TaskId(Uuid::new_v4())
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(TaskId)
    }
}

/// Wall-clock instant, stored as an RFC 3339 string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    /// Current time, but never earlier than `previous`.
    ///
    /// Keeps `updated_at` monotonic when the wall clock steps backwards.
    pub fn now_after(previous: Timestamp) -> Self {
        Self::now().max(previous)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0.to_rfc3339())
    }
}

/// A single task entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned at creation, never changes.
    pub id: TaskId,

    /// Trimmed, 1 to 200 UTF-16 units.
    pub text: String,

    pub completed: bool,

    pub created_at: Timestamp,

    /// Bumped on every mutation.
    pub updated_at: Timestamp,
}

impl Task {
    /// Build a new, active task from already-validated text.
    pub(crate) fn new(id: TaskId, text: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            text,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch in place and bump `updated_at`.
    pub(crate) fn apply(&mut self, patch: ValidatedPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = Timestamp::now_after(self.updated_at);
    }
}

/// Partial update for a task. Fields left as `None` are untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only replaces the text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    /// Patch that only sets the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }

    /// Validate and trim the text field, if present.
    pub(crate) fn validate(self) -> Result<ValidatedPatch, ValidationError> {
        let text = self.text.as_deref().map(validate_text).transpose()?;
        Ok(ValidatedPatch {
            text,
            completed: self.completed,
        })
    }
}

/// A patch whose text has passed [`validate_text`].
#[derive(Clone, Debug, Default)]
pub(crate) struct ValidatedPatch {
    text: Option<String>,
    completed: Option<bool>,
}

impl ValidatedPatch {
    /// Replace the text with an already-validated value.
    pub(crate) fn text(text: String) -> Self {
        Self {
            text: Some(text),
            completed: None,
        }
    }

    pub(crate) fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }
}

/// Trim `raw` and check it is 1 to [`MAX_TEXT_CHARS`] long.
///
/// Length is counted in UTF-16 code units, so characters outside the Basic
/// Multilingual Plane (most emoji) count twice. Returns the trimmed text.
pub fn validate_text(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let len = trimmed.encode_utf16().count();
    if len > MAX_TEXT_CHARS {
        return Err(ValidationError::TooLong { len });
    }
    Ok(trimmed.to_string())
}
