//! Backup system for fintrack
//!
//! # Backup Format
//!
//! A backup is one JSON object:
//! - `expenses`, `incomes`, `balances`, `reserves`: record lists
//! - `monthlyExpenseGoal`: number
//! - `exportedAt`, `schemaVersion`: written for reference, ignored on import
//!
//! On import every field is optional. Fields present replace the matching
//! part of the ledger wholesale; absent fields are left alone.

mod manager;
mod restore;

pub use manager::{write_backup, BackupInfo, BackupManager};
pub use restore::{read_backup, restore_from_file, validate_backup, ValidationResult};
