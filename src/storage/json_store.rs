//! Blob store backed by one JSON file per key

use std::path::{Path, PathBuf};

use tracing::debug;

use super::blob::BlobStore;
use super::file_io::{read_text_optional, write_text_atomic};
use crate::error::FinanceResult;

/// Stores each blob at `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file holding `key`
    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl BlobStore for JsonFileStore {
    fn get(&self, key: &str) -> FinanceResult<Option<String>> {
        read_text_optional(self.blob_path(key))
    }

    fn set(&mut self, key: &str, value: String) -> FinanceResult<()> {
        let path = self.blob_path(key);
        debug!(path = %path.display(), bytes = value.len(), "writing blob");
        write_text_atomic(path, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_blob_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        assert_eq!(store.get("expenses").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path().join("data"));

        store.set("expense_goal", "1500.0".into()).unwrap();

        assert_eq!(store.get("expense_goal").unwrap().as_deref(), Some("1500.0"));
        assert!(temp_dir.path().join("data").join("expense_goal.json").exists());
    }
}
