//! Account balance snapshots and reserve allocations
//!
//! Balances are typed in by hand from bank statements; they are not derived
//! from the income/expense history and updating one simply overwrites it.
//! Reserves earmark part of the gross balance so it is not counted as
//! available for spending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BalanceId, ReserveId};
use super::money::Money;

/// Accounts created on first run, each at zero
pub const DEFAULT_ACCOUNTS: [&str; 10] = [
    "Conta Viacredi PF",
    "Aplicação Viacredi PF",
    "Cotas Capitais PF",
    "Conta Viacredi PJ",
    "Aplicação Viacredi PJ",
    "Cotas Capitais PJ",
    "Investimentos",
    "Conta CEF Joelma",
    "Conta BB André",
    "Dinheiro",
];

/// Broad kind of account, inferred from its name for display grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Investment,
    Shares,
    Cash,
    Bank,
}

/// Current balance of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub id: BalanceId,
    pub name: String,
    pub value: Money,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl AccountBalance {
    pub fn new(name: impl Into<String>, value: Money) -> Self {
        Self {
            id: BalanceId::new(),
            name: name.into(),
            value,
            updated_at: Utc::now(),
        }
    }

    /// Overwrite the value and refresh the timestamp
    pub fn set_value(&mut self, value: Money, at: DateTime<Utc>) {
        self.value = value;
        self.updated_at = at;
    }

    /// The seed list used when no balances have been stored yet
    pub fn seed_defaults() -> Vec<Self> {
        DEFAULT_ACCOUNTS
            .iter()
            .map(|name| Self::new(*name, Money::zero()))
            .collect()
    }

    pub fn kind(&self) -> AccountKind {
        let name = self.name.as_str();
        if name.contains("Aplicação") || name.contains("Investimentos") {
            AccountKind::Investment
        } else if name.contains("Cotas") {
            AccountKind::Shares
        } else if name.contains("Dinheiro") {
            AccountKind::Cash
        } else {
            AccountKind::Bank
        }
    }
}

/// Money set aside and excluded from the available balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveItem {
    pub id: ReserveId,
    pub description: String,
    pub value: Money,
}

impl ReserveItem {
    pub fn new(description: impl Into<String>, value: Money) -> Self {
        Self {
            id: ReserveId::new(),
            description: description.into(),
            value,
        }
    }
}
