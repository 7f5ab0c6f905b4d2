//! Whole-ledger snapshots for backup and restore
//!
//! Every sub-state is optional on the way in: a backup that only carries
//! expenses replaces only the expenses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::LedgerState;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{AccountBalance, ExpenseRecord, IncomeRecord, Money, ReserveItem};

/// Current backup schema version
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Serializable ledger payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// Written for readers; ignored on import
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    /// Written for readers; ignored on import
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<ExpenseRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incomes: Option<Vec<IncomeRecord>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balances: Option<Vec<AccountBalance>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserves: Option<Vec<ReserveItem>>,

    /// Backups from the web front end carry this as `goal`, often a string or null
    #[serde(default, alias = "goal", skip_serializing_if = "Option::is_none")]
    pub monthly_expense_goal: Option<Money>,
}

impl LedgerSnapshot {
    /// A snapshot with every sub-state present
    pub fn from_state(state: &LedgerState) -> Self {
        Self {
            schema_version: None,
            exported_at: None,
            expenses: Some(state.expenses.clone()),
            incomes: Some(state.incomes.clone()),
            balances: Some(state.balances.clone()),
            reserves: Some(state.reserves.clone()),
            monthly_expense_goal: Some(state.monthly_expense_goal),
        }
    }

    /// Stamp export metadata before writing
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.schema_version = Some(SNAPSHOT_SCHEMA_VERSION);
        self.exported_at = Some(at);
        self
    }

    /// Parse a backup document
    ///
    /// The document must be a JSON object; anything else, or any field
    /// that fails to decode, is an import error.
    pub fn from_json_str(raw: &str) -> FinanceResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| FinanceError::Import(format!("Backup is not valid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(FinanceError::Import(
                "Backup must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| FinanceError::Import(format!("Backup has an invalid field: {}", e)))
    }

    /// True when no sub-state is present
    pub fn is_empty(&self) -> bool {
        self.expenses.is_none()
            && self.incomes.is_none()
            && self.balances.is_none()
            && self.reserves.is_none()
            && self.monthly_expense_goal.is_none()
    }
}

/// What an import replaced; `None` means the sub-state was left alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub expenses: Option<usize>,
    pub incomes: Option<usize>,
    pub balances: Option<usize>,
    pub reserves: Option<usize>,
    pub monthly_expense_goal: Option<Money>,
}

impl ImportSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        let counts = [
            ("expenses", self.expenses),
            ("incomes", self.incomes),
            ("balances", self.balances),
            ("reserves", self.reserves),
        ];
        for (name, count) in counts {
            if let Some(count) = count {
                parts.push(format!("{} ({})", name, count));
            }
        }
        if let Some(goal) = self.monthly_expense_goal {
            parts.push(format!("monthly goal ({})", goal));
        }

        if parts.is_empty() {
            write!(f, "nothing replaced")
        } else {
            write!(f, "replaced {}", parts.join(", "))
        }
    }
}
