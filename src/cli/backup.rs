//! Backup CLI commands
//!
//! Implements CLI commands for backup export, listing and restore.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Subcommand;

use super::today;
use crate::backup::{restore_from_file, validate_backup, write_backup, BackupManager};
use crate::config::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::LedgerStore;
use crate::storage::BlobStore;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Export the whole ledger to a JSON backup
    Create {
        /// Write to this file instead of the backups directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List backups in the backups directory
    List,

    /// Replace ledger data with the contents of a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Check a backup file and show what it contains
    Validate {
        /// Backup filename or path
        backup: String,
    },
}

/// Handle a backup command
pub fn handle_backup_command<S: BlobStore>(
    store: &mut LedgerStore<S>,
    paths: &FinancePaths,
    cmd: BackupCommands,
) -> FinanceResult<()> {
    let manager = BackupManager::new(paths.backup_dir());

    match cmd {
        BackupCommands::Create { output } => {
            let backup_path = match output {
                Some(path) => {
                    write_backup(&path, store.snapshot())?;
                    path
                }
                None => manager.create_backup(store.snapshot(), today())?,
            };
            println!("Backup created: {}", backup_path.display());
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: fintrack backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            for (i, backup) in backups.iter().enumerate() {
                println!(
                    "  {}. {} ({})",
                    i + 1,
                    backup.filename,
                    format_size(backup.size_bytes)
                );
            }
            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let validation = validate_backup(&backup_path)?;

            println!("File: {}", backup_path.display());
            println!("Contents: {}", validation.summary());
            println!();

            if !force {
                println!("WARNING: This replaces every section present in the backup!");
                println!("To proceed, run again with --force flag:");
                println!("  fintrack backup restore {} --force", backup);
                return Ok(());
            }

            let safety_name = format!(
                "pre_restore_{}.json",
                Local::now().format("%Y-%m-%d_%H%M%S")
            );
            let safety_path = manager.backup_dir().join(safety_name);
            write_backup(&safety_path, store.snapshot())?;
            println!("Current data saved to: {}", safety_path.display());

            let summary = restore_from_file(store, &backup_path)?;
            println!("Restore complete: {}", summary);
        }

        BackupCommands::Validate { backup } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let validation = validate_backup(&backup_path)?;
            println!("File: {}", backup_path.display());
            println!("Valid backup: {}", validation.summary());
        }
    }

    Ok(())
}

/// `latest`, an existing path, or a file name inside the backups directory
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> FinanceResult<PathBuf> {
    if backup == "latest" {
        return manager
            .list_backups()?
            .into_iter()
            .next()
            .map(|info| info.path)
            .ok_or_else(|| FinanceError::NotFound {
                entity_type: "Backup",
                identifier: "latest".into(),
            });
    }

    let direct = Path::new(backup);
    if direct.exists() {
        return Ok(direct.to_path_buf());
    }

    let in_dir = manager.backup_dir().join(backup);
    if in_dir.exists() {
        return Ok(in_dir);
    }

    Err(FinanceError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    })
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::{BlobKey, MemoryStore};
    use tempfile::TempDir;

    fn setup() -> (TempDir, FinancePaths, LedgerStore<MemoryStore>) {
        let temp = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp.path().to_path_buf());
        let store =
            LedgerStore::open(MemoryStore::new().with_blob(BlobKey::BALANCES, "[]")).unwrap();
        (temp, paths, store)
    }

    #[test]
    fn test_restore_without_force_changes_nothing() {
        let (_temp, paths, mut store) = setup();
        store.set_monthly_expense_goal(Money::from_units(100)).unwrap();
        handle_backup_command(&mut store, &paths, BackupCommands::Create { output: None }).unwrap();

        store.set_monthly_expense_goal(Money::from_units(900)).unwrap();
        handle_backup_command(
            &mut store,
            &paths,
            BackupCommands::Restore {
                backup: "latest".into(),
                force: false,
            },
        )
        .unwrap();
        assert_eq!(store.monthly_expense_goal(), Money::from_units(900));

        handle_backup_command(
            &mut store,
            &paths,
            BackupCommands::Restore {
                backup: "latest".into(),
                force: true,
            },
        )
        .unwrap();
        assert_eq!(store.monthly_expense_goal(), Money::from_units(100));
    }

    #[test]
    fn test_latest_without_backups_is_not_found() {
        let (_temp, paths, mut store) = setup();
        let err = handle_backup_command(
            &mut store,
            &paths,
            BackupCommands::Validate {
                backup: "latest".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_to_explicit_output() {
        let (temp, paths, mut store) = setup();
        let output = temp.path().join("export.json");
        handle_backup_command(
            &mut store,
            &paths,
            BackupCommands::Create {
                output: Some(output.clone()),
            },
        )
        .unwrap();
        assert!(validate_backup(&output).unwrap().has_goal);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(2048), "2.0 KB");
    }
}
