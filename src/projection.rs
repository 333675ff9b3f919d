//! Derived views over a task collection: filtered subsets and counts.
//!
//! Nothing here is persisted; recompute from the current collection whenever
//! it changes.

use crate::types::Task;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which tasks a view shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Filters in tab order.
    pub const ALL_FILTERS: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Whether `task` belongs in this view.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Headline shown when the view is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Filter::All => "No todos yet",
            Filter::Active => "No active todos",
            Filter::Completed => "No completed todos",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized filter name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter: {0} (expected all, active, or completed)")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

/// Task counts for a collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl Stats {
    /// Count shown next to a filter's tab.
    pub fn count_for(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}

/// Tasks matching `selection`, in collection order.
pub fn filter(tasks: &[Task], selection: Filter) -> Vec<&Task> {
    tasks.iter().filter(|task| selection.matches(task)).collect()
}

/// Count tasks by completion state.
pub fn stats(tasks: &[Task]) -> Stats {
    let completed = tasks.iter().filter(|task| task.completed).count();
    Stats {
        total: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}
