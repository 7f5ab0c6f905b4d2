//! In-memory blob store

use std::collections::HashMap;

use super::blob::BlobStore;
use crate::error::{FinanceError, FinanceResult};

/// Blobs kept in a map; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a blob, as if written by an earlier session
    pub fn with_blob(mut self, key: &str, value: impl Into<String>) -> Self {
        self.blobs.insert(key.to_string(), value.into());
        self
    }

    /// Make every subsequent `set` fail with a storage error
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> FinanceResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> FinanceResult<()> {
        if self.fail_writes {
            return Err(FinanceError::Storage(format!("write to '{}' rejected", key)));
        }
        self.blobs.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("incomes").unwrap(), None);

        store.set("incomes", "[]".into()).unwrap();
        assert_eq!(store.get("incomes").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_failing_writes() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);

        let err = store.set("incomes", "[]".into()).unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));
        assert_eq!(store.raw("incomes"), None);
    }
}
