//! Task list configuration.

use std::path::PathBuf;

/// Storage key the collection is written under by default.
pub const DEFAULT_KEY: &str = "todos";

/// Configuration for a directory-backed task list.
#[derive(Clone, Debug)]
pub struct TaskListConfig {
    /// Directory holding the storage files.
    pub path: PathBuf,

    /// Key the whole collection is stored under.
    pub key: String,

    /// Whether to create the directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Hold an exclusive lock so a second session fails to open.
    /// Off by default: concurrent sessions are last-write-wins.
    pub exclusive: bool,

    /// Max bytes for the serialized collection (None = unlimited).
    pub quota_bytes: Option<usize>,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./tasklist"),
            key: DEFAULT_KEY.to_string(),
            create_if_missing: true,
            exclusive: false,
            quota_bytes: None,
        }
    }
}

impl TaskListConfig {
    /// Default configuration rooted at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}
