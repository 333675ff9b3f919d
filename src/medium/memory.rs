//! In-process key-value medium.

use super::{check_quota, Medium};
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared in-memory map.
///
/// Clones share the same entries, so two stores built from clones of one
/// medium see each other's writes (last write wins).
#[derive(Clone, Debug, Default)]
pub struct MemoryMedium {
    entries: Arc<Mutex<HashMap<String, String>>>,

    /// Max bytes for a single value (None = unlimited).
    quota: Option<usize>,
}

impl MemoryMedium {
    /// Create an empty, unlimited medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty medium rejecting values larger than `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(quota),
        }
    }

    /// A handle on the same entries that rejects values larger than `quota`.
    pub fn limited(&self, quota: usize) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            quota: Some(quota),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Medium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_quota(self.quota, value.len())?;
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;

    #[test]
    fn test_set_get_replace() {
        let medium = MemoryMedium::new();
        assert!(medium.get("todos").unwrap().is_none());

        medium.set("todos", "[]").unwrap();
        assert_eq!(medium.get("todos").unwrap().as_deref(), Some("[]"));
        assert_eq!(medium.len(), 1);

        medium.set("todos", "[1]").unwrap();
        assert_eq!(medium.get("todos").unwrap().as_deref(), Some("[1]"));
        assert_eq!(medium.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryMedium::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_quota_rejects_large_values() {
        let medium = MemoryMedium::with_quota(4);
        medium.set("k", "1234").unwrap();

        let result = medium.set("k", "12345");
        assert!(matches!(
            result,
            Err(TaskError::QuotaExceeded { needed: 5, quota: 4 })
        ));
        // Prior value survives.
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_limited_shares_entries() {
        let medium = MemoryMedium::new();
        let limited = medium.limited(2);
        medium.set("k", "long value").unwrap();

        assert_eq!(limited.get("k").unwrap().as_deref(), Some("long value"));
        assert!(limited.set("k", "abc").is_err());
        assert!(limited.set("k", "ab").is_ok());
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("ab"));
    }
}
