//! Loading and persisting the ledger state as blobs

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::blob::{BlobKey, BlobStore};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::LedgerState;
use crate::models::{AccountBalance, Money};

/// Result of reading the five blobs
#[derive(Debug, Clone)]
pub struct LoadedState {
    pub state: LedgerState,
    /// True when no balances blob existed and the default accounts were created
    pub seeded_balances: bool,
}

/// Read every sub-state, falling back to defaults for missing blobs
///
/// A blob that exists but does not parse is a storage error.
pub fn load_state<S: BlobStore>(store: &S) -> FinanceResult<LoadedState> {
    let expenses = read_blob(store, BlobKey::EXPENSES)?.unwrap_or_default();
    let incomes = read_blob(store, BlobKey::INCOMES)?.unwrap_or_default();
    let reserves = read_blob(store, BlobKey::RESERVES)?.unwrap_or_default();
    let monthly_expense_goal = read_blob::<Money, _>(store, BlobKey::EXPENSE_GOAL)?.unwrap_or_default();

    let (balances, seeded_balances) = match read_blob(store, BlobKey::BALANCES)? {
        Some(balances) => (balances, false),
        None => (AccountBalance::seed_defaults(), true),
    };

    let state = LedgerState {
        expenses,
        incomes,
        balances,
        reserves,
        monthly_expense_goal,
    };

    debug!(
        expenses = state.expenses.len(),
        incomes = state.incomes.len(),
        balances = state.balances.len(),
        reserves = state.reserves.len(),
        seeded_balances,
        "ledger state loaded"
    );

    Ok(LoadedState {
        state,
        seeded_balances,
    })
}

/// Write all five sub-states
pub fn persist_state<S: BlobStore>(store: &mut S, state: &LedgerState) -> FinanceResult<()> {
    write_blob(store, BlobKey::EXPENSES, &state.expenses)?;
    write_blob(store, BlobKey::INCOMES, &state.incomes)?;
    write_blob(store, BlobKey::BALANCES, &state.balances)?;
    write_blob(store, BlobKey::RESERVES, &state.reserves)?;
    write_blob(store, BlobKey::EXPENSE_GOAL, &state.monthly_expense_goal)?;
    info!("ledger state persisted");
    Ok(())
}

fn read_blob<T, S>(store: &S, key: &str) -> FinanceResult<Option<T>>
where
    T: DeserializeOwned,
    S: BlobStore,
{
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| FinanceError::Storage(format!("Failed to parse blob '{}': {}", key, e))),
    }
}

fn write_blob<T, S>(store: &mut S, key: &str, value: &T) -> FinanceResult<()>
where
    T: Serialize + ?Sized,
    S: BlobStore,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| FinanceError::Storage(format!("Failed to serialize blob '{}': {}", key, e)))?;
    store.set(key, raw)
}
