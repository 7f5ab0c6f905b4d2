//! Backup manager for fintrack
//!
//! Writes the whole ledger to a dated JSON file and lists what's there.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::ledger::LedgerSnapshot;
use crate::storage::write_json_atomic;

/// Metadata about a backup file on disk
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// Date taken from a `backup_YYYY-MM-DD` file name, if it has one
    pub date: Option<NaiveDate>,
    pub size_bytes: u64,
}

/// Creates and lists backups in one directory
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// `backup_YYYY-MM-DD.json`
    pub fn default_file_name(day: NaiveDate) -> String {
        format!("backup_{}.json", day.format("%Y-%m-%d"))
    }

    /// Write `snapshot` to the default file for `day`, replacing any backup
    /// already taken that day
    pub fn create_backup(&self, snapshot: LedgerSnapshot, day: NaiveDate) -> FinanceResult<PathBuf> {
        let path = self.backup_dir.join(Self::default_file_name(day));
        write_backup(&path, snapshot)?;
        Ok(path)
    }

    /// List backups, newest first
    pub fn list_backups(&self) -> FinanceResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir)
            .map_err(|e| FinanceError::Io(format!("Failed to read backup directory: {}", e)))?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| FinanceError::Io(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.filename.cmp(&a.filename)));
        Ok(backups)
    }
}

/// Write a stamped snapshot to `path`
pub fn write_backup(path: &Path, snapshot: LedgerSnapshot) -> FinanceResult<()> {
    let stamped = snapshot.stamped(Utc::now());
    write_json_atomic(path, &stamped).map_err(|e| match e {
        FinanceError::Storage(msg) => FinanceError::Export(msg),
        other => other,
    })?;
    info!(path = %path.display(), "wrote backup");
    Ok(())
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let date = filename
        .strip_prefix("backup_")
        .and_then(|rest| rest.strip_suffix(".json"))
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok());

    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        date,
        size_bytes,
    })
}
