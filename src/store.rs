//! Persistent store adapter: the whole collection as one blob under one key.

use crate::error::{Result, TaskError};
use crate::medium::Medium;
use crate::types::Task;
use tracing::{debug, error, warn};

/// Reads and writes the full task collection through a [`Medium`].
///
/// The collection is a JSON array, newest task first. Faults never escape
/// [`load`](Self::load) or [`save`](Self::save): an unreadable payload loads
/// as empty and a failed write is logged and dropped.
#[derive(Debug)]
pub struct TaskStore<M> {
    medium: M,
    key: String,
}

impl<M: Medium> TaskStore<M> {
    /// Create an adapter writing under `key`.
    pub fn new(medium: M, key: impl Into<String>) -> Self {
        Self {
            medium,
            key: key.into(),
        }
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying medium.
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Load the stored collection, or an empty one if nothing usable is stored.
    pub fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to load tasks, treating as empty");
                Vec::new()
            }
        }
    }

    /// Load the stored collection, surfacing read and parse faults.
    pub fn try_load(&self) -> Result<Vec<Task>> {
        let Some(payload) = self.medium.get(&self.key)? else {
            debug!(key = %self.key, "no stored tasks");
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_str(&payload)
            .map_err(|e| TaskError::Deserialization(e.to_string()))?;
        debug!(key = %self.key, count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Replace the stored collection. Failures are logged and swallowed.
    ///
    /// Returns whether the write landed; callers are free to ignore it.
    pub fn save(&self, tasks: &[Task]) -> bool {
        match self.try_save(tasks) {
            Ok(()) => true,
            Err(e) => {
                error!(key = %self.key, error = %e, count = tasks.len(), "failed to save tasks");
                false
            }
        }
    }

    /// Replace the stored collection, surfacing write faults.
    pub fn try_save(&self, tasks: &[Task]) -> Result<()> {
        let payload = serde_json::to_string(tasks)?;
        self.medium.set(&self.key, &payload)?;
        debug!(key = %self.key, count = tasks.len(), bytes = payload.len(), "saved tasks");
        Ok(())
    }
}
