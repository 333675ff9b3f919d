//! # Task List
//!
//! A locally persisted task list: short text items that can be added,
//! edited, toggled, filtered, and deleted.
//!
//! ## Core Concepts
//!
//! - **Tasks**: text, a completion flag, and creation/update timestamps
//! - **Collection**: every task, newest first, stored as one JSON blob
//! - **Media**: local key-value storage the blob lives in (a directory or memory)
//! - **Projection**: filtered views and counts derived from the collection
//!
//! Every mutation rewrites the whole collection. Storage faults are logged
//! and degrade to "empty" or "not saved"; they are never fatal.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist::{projection, Filter, TaskList, TaskListConfig};
//!
//! let list = TaskList::open(&TaskListConfig::at("./my-tasks"))?;
//!
//! let milk = list.add("Buy milk")?.value;
//! list.add("Walk dog")?;
//! let tasks = list.toggle(milk.id).tasks;
//!
//! let active = projection::filter(&tasks, Filter::Active);
//! let stats = projection::stats(&tasks);
//! ```

pub mod config;
pub mod error;
pub mod medium;
pub mod projection;
pub mod repository;
pub mod store;
pub mod types;

// Re-exports
pub use config::{TaskListConfig, DEFAULT_KEY};
pub use error::{Result, TaskError, ValidationError, MAX_TEXT_CHARS};
pub use medium::{DirectoryMedium, Medium, MemoryMedium};
pub use projection::{Filter, ParseFilterError, Stats};
pub use repository::{Snapshot, TaskList, TaskRepository};
pub use store::TaskStore;
pub use types::{validate_text, Task, TaskId, TaskPatch, Timestamp};
