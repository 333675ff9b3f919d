//! Local key-value media the task store writes into.
//!
//! A medium maps string keys to string values and nothing else: no
//! transactions, no partial writes. Two implementations ship:
//!
//! - [`DirectoryMedium`]: one file per key under a directory, written atomically
//! - [`MemoryMedium`]: a shared in-process map, with an optional byte quota

mod directory;
mod memory;

pub use directory::DirectoryMedium;
pub use memory::MemoryMedium;

use crate::error::{Result, TaskError};

/// A local key-value storage medium.
pub trait Medium {
    /// Read the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Reject a write of `needed` bytes when it would exceed `quota`.
pub(crate) fn check_quota(quota: Option<usize>, needed: usize) -> Result<()> {
    match quota {
        Some(quota) if needed > quota => Err(TaskError::QuotaExceeded { needed, quota }),
        _ => Ok(()),
    }
}
