//! Backup restoration for fintrack
//!
//! A backup is read and validated in full before anything reaches the store.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::ledger::{ImportSummary, LedgerSnapshot, LedgerStore};
use crate::storage::BlobStore;

/// What a backup file carries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub expenses: Option<usize>,
    pub incomes: Option<usize>,
    pub balances: Option<usize>,
    pub reserves: Option<usize>,
    pub has_goal: bool,
}

impl ValidationResult {
    fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        Self {
            expenses: snapshot.expenses.as_ref().map(Vec::len),
            incomes: snapshot.incomes.as_ref().map(Vec::len),
            balances: snapshot.balances.as_ref().map(Vec::len),
            reserves: snapshot.reserves.as_ref().map(Vec::len),
            has_goal: snapshot.monthly_expense_goal.is_some(),
        }
    }

    pub fn summary(&self) -> String {
        let describe = |name: &str, count: Option<usize>| match count {
            Some(n) => format!("{}: {}", name, n),
            None => format!("{}: absent", name),
        };
        [
            describe("expenses", self.expenses),
            describe("incomes", self.incomes),
            describe("balances", self.balances),
            describe("reserves", self.reserves),
            format!("goal: {}", if self.has_goal { "present" } else { "absent" }),
        ]
        .join(", ")
    }
}

/// Read and parse a backup file
pub fn read_backup(path: &Path) -> FinanceResult<LedgerSnapshot> {
    let contents = fs::read_to_string(path)
        .map_err(|e| FinanceError::Import(format!("Failed to read {}: {}", path.display(), e)))?;
    LedgerSnapshot::from_json_str(&contents)
}

/// Check a backup file without restoring it
pub fn validate_backup(path: &Path) -> FinanceResult<ValidationResult> {
    read_backup(path).map(|snapshot| ValidationResult::from_snapshot(&snapshot))
}

/// Replace the sub-states present in the backup at `path`
pub fn restore_from_file<S: BlobStore>(
    store: &mut LedgerStore<S>,
    path: &Path,
) -> FinanceResult<ImportSummary> {
    let snapshot = read_backup(path)?;
    let summary = store.import_snapshot(snapshot)?;
    info!(path = %path.display(), %summary, "restored backup");
    Ok(summary)
}
