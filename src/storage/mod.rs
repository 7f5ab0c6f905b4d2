//! Storage layer for fintrack
//!
//! The ledger is persisted as five JSON blobs behind the [`BlobStore`] trait.
//! [`JsonFileStore`] keeps them as files with atomic writes;
//! [`MemoryStore`] keeps them in a map.

pub mod blob;
pub mod file_io;
pub mod json_store;
pub mod memory;
pub mod state;

pub use blob::{BlobKey, BlobStore};
pub use file_io::{read_text_optional, write_json_atomic, write_text_atomic};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use state::{load_state, persist_state, LoadedState};

use crate::config::FinancePaths;
use crate::error::FinanceResult;

/// Open the file-backed store under the configured data directory
pub fn open_file_store(paths: &FinancePaths) -> FinanceResult<JsonFileStore> {
    paths.ensure_directories()?;
    Ok(JsonFileStore::new(paths.data_dir()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_file_store_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = open_file_store(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert_eq!(store.data_dir(), temp_dir.path().join("data"));
    }
}
