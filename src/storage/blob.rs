//! Key/value persistence boundary
//!
//! The ledger persists itself as five independent JSON blobs. Anything that
//! can get and set a string under a key can back it.

use crate::error::FinanceResult;

/// Stable blob names for the ledger's sub-states
pub struct BlobKey;

impl BlobKey {
    pub const EXPENSES: &'static str = "expenses";
    pub const INCOMES: &'static str = "incomes";
    pub const BALANCES: &'static str = "balances";
    pub const RESERVES: &'static str = "reserves";
    pub const EXPENSE_GOAL: &'static str = "expense_goal";

    pub const ALL: [&'static str; 5] = [
        Self::EXPENSES,
        Self::INCOMES,
        Self::BALANCES,
        Self::RESERVES,
        Self::EXPENSE_GOAL,
    ];
}

/// A string blob store keyed by name
pub trait BlobStore {
    /// The blob stored under `key`, or `None` if nothing was ever written
    fn get(&self, key: &str) -> FinanceResult<Option<String>>;

    /// Replace the blob stored under `key`
    fn set(&mut self, key: &str, value: String) -> FinanceResult<()>;
}
