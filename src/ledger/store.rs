//! The ledger store
//!
//! Owns the full [`LedgerState`] and writes it through a [`BlobStore`] after
//! every mutation that changed something. Updates and removals that name an
//! unknown id are silent no-ops reporting `false`; they don't touch storage.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::snapshot::{ImportSummary, LedgerSnapshot};
use super::state::LedgerState;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    AccountBalance, BalanceId, ExpenseId, ExpensePatch, ExpenseRecord, IncomeId, IncomeRecord,
    Money, NewExpense, NewIncome, ReserveId, ReserveItem,
};
use crate::storage::{load_state, persist_state, BlobStore};

/// Single source of truth for all ledger records
#[derive(Debug)]
pub struct LedgerStore<S: BlobStore> {
    state: LedgerState,
    backend: S,
}

impl<S: BlobStore> LedgerStore<S> {
    /// Load the ledger from `backend`
    ///
    /// Missing blobs start empty; missing balances are seeded with the
    /// default accounts and written back right away so their ids stay stable.
    pub fn open(backend: S) -> FinanceResult<Self> {
        let loaded = load_state(&backend)?;
        let mut store = Self {
            state: loaded.state,
            backend,
        };

        if loaded.seeded_balances {
            info!(accounts = store.state.balances.len(), "seeded default accounts");
            store.persist()?;
        }

        Ok(store)
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.state.expenses
    }

    pub fn incomes(&self) -> &[IncomeRecord] {
        &self.state.incomes
    }

    pub fn balances(&self) -> &[AccountBalance] {
        &self.state.balances
    }

    pub fn reserves(&self) -> &[ReserveItem] {
        &self.state.reserves
    }

    pub fn monthly_expense_goal(&self) -> Money {
        self.state.monthly_expense_goal
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Full snapshot with every sub-state present
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::from_state(&self.state)
    }

    // Expenses

    pub fn add_expense(&mut self, fields: NewExpense) -> FinanceResult<ExpenseRecord> {
        ensure_non_negative("Expense amount", fields.amount)?;

        let record = fields.into_record(Utc::now());
        debug!(id = %record.id, amount = %record.amount, category = %record.category, "adding expense");
        self.state.expenses.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Merge `patch` into the expense with `id`; `false` if no such expense
    pub fn update_expense(&mut self, id: &ExpenseId, patch: ExpensePatch) -> FinanceResult<bool> {
        if let Some(amount) = patch.amount {
            ensure_non_negative("Expense amount", amount)?;
        }

        let Some(record) = self.state.expenses.iter_mut().find(|e| &e.id == id) else {
            return Ok(false);
        };
        record.apply(patch);
        debug!(%id, "updated expense");
        self.persist()?;
        Ok(true)
    }

    pub fn remove_expense(&mut self, id: &ExpenseId) -> FinanceResult<bool> {
        let before = self.state.expenses.len();
        self.state.expenses.retain(|e| &e.id != id);
        if self.state.expenses.len() == before {
            return Ok(false);
        }
        debug!(%id, "removed expense");
        self.persist()?;
        Ok(true)
    }

    // Incomes

    pub fn add_income(&mut self, fields: NewIncome) -> FinanceResult<IncomeRecord> {
        ensure_non_negative("Income amount", fields.amount)?;

        let record = fields.into_record(Utc::now());
        debug!(id = %record.id, amount = %record.amount, source = %record.source, "adding income");
        self.state.incomes.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    pub fn remove_income(&mut self, id: &IncomeId) -> FinanceResult<bool> {
        let before = self.state.incomes.len();
        self.state.incomes.retain(|i| &i.id != id);
        if self.state.incomes.len() == before {
            return Ok(false);
        }
        debug!(%id, "removed income");
        self.persist()?;
        Ok(true)
    }

    // Balances and reserves

    /// Overwrite an account's value; balances may be negative
    pub fn update_account_balance(&mut self, id: &BalanceId, value: Money) -> FinanceResult<bool> {
        let Some(balance) = self.state.balances.iter_mut().find(|b| &b.id == id) else {
            return Ok(false);
        };
        balance.set_value(value, Utc::now());
        debug!(%id, %value, "updated account balance");
        self.persist()?;
        Ok(true)
    }

    pub fn add_reserve(&mut self, description: impl Into<String>, value: Money) -> FinanceResult<ReserveItem> {
        ensure_non_negative("Reserve value", value)?;

        let reserve = ReserveItem::new(description, value);
        debug!(id = %reserve.id, %value, "adding reserve");
        self.state.reserves.push(reserve.clone());
        self.persist()?;
        Ok(reserve)
    }

    pub fn update_reserve(
        &mut self,
        id: &ReserveId,
        description: impl Into<String>,
        value: Money,
    ) -> FinanceResult<bool> {
        ensure_non_negative("Reserve value", value)?;

        let Some(reserve) = self.state.reserves.iter_mut().find(|r| &r.id == id) else {
            return Ok(false);
        };
        reserve.description = description.into();
        reserve.value = value;
        debug!(%id, %value, "updated reserve");
        self.persist()?;
        Ok(true)
    }

    pub fn remove_reserve(&mut self, id: &ReserveId) -> FinanceResult<bool> {
        let before = self.state.reserves.len();
        self.state.reserves.retain(|r| &r.id != id);
        if self.state.reserves.len() == before {
            return Ok(false);
        }
        debug!(%id, "removed reserve");
        self.persist()?;
        Ok(true)
    }

    pub fn set_monthly_expense_goal(&mut self, value: Money) -> FinanceResult<()> {
        ensure_non_negative("Monthly expense goal", value)?;

        self.state.monthly_expense_goal = value;
        debug!(%value, "set monthly expense goal");
        self.persist()
    }

    // Import

    /// Replace every sub-state present in `snapshot`, leaving the rest alone
    ///
    /// The replacement state is assembled first and swapped in as a whole.
    pub fn import_snapshot(&mut self, snapshot: LedgerSnapshot) -> FinanceResult<ImportSummary> {
        let mut next = self.state.clone();
        let mut summary = ImportSummary::default();

        if let Some(expenses) = snapshot.expenses {
            summary.expenses = Some(expenses.len());
            next.expenses = expenses;
        }
        if let Some(incomes) = snapshot.incomes {
            summary.incomes = Some(incomes.len());
            next.incomes = incomes;
        }
        if let Some(balances) = snapshot.balances {
            summary.balances = Some(balances.len());
            next.balances = balances;
        }
        if let Some(reserves) = snapshot.reserves {
            summary.reserves = Some(reserves.len());
            next.reserves = reserves;
        }
        if let Some(goal) = snapshot.monthly_expense_goal {
            summary.monthly_expense_goal = Some(goal);
            next.monthly_expense_goal = goal;
        }

        if summary.is_empty() {
            info!("import carried no ledger data");
            return Ok(summary);
        }

        self.state = next;
        info!(%summary, "imported snapshot");
        self.persist()?;
        Ok(summary)
    }

    // Lookup by user-typed id

    pub fn resolve_expense(&self, typed: &str) -> FinanceResult<&ExpenseRecord> {
        resolve_by_id(
            &self.state.expenses,
            typed,
            "Expense",
            |e| e.id.as_str(),
            |e, t| e.id.matches_prefix(t),
        )
    }

    pub fn resolve_income(&self, typed: &str) -> FinanceResult<&IncomeRecord> {
        resolve_by_id(
            &self.state.incomes,
            typed,
            "Income",
            |i| i.id.as_str(),
            |i, t| i.id.matches_prefix(t),
        )
    }

    pub fn resolve_reserve(&self, typed: &str) -> FinanceResult<&ReserveItem> {
        resolve_by_id(
            &self.state.reserves,
            typed,
            "Reserve",
            |r| r.id.as_str(),
            |r, t| r.id.matches_prefix(t),
        )
    }

    /// Accounts resolve by name (case-insensitive) as well as by id
    pub fn resolve_account(&self, typed: &str) -> FinanceResult<&AccountBalance> {
        let wanted = typed.trim();
        if let Some(balance) = self
            .state
            .balances
            .iter()
            .find(|b| b.name.to_lowercase() == wanted.to_lowercase())
        {
            return Ok(balance);
        }

        resolve_by_id(
            &self.state.balances,
            typed,
            "Account",
            |b| b.id.as_str(),
            |b, t| b.id.matches_prefix(t),
        )
    }

    fn persist(&mut self) -> FinanceResult<()> {
        persist_state(&mut self.backend, &self.state).map_err(|e| {
            warn!(error = %e, "failed to persist ledger state");
            match e {
                FinanceError::Storage(_) => e,
                other => FinanceError::Storage(other.to_string()),
            }
        })
    }
}

fn ensure_non_negative(what: &str, value: Money) -> FinanceResult<()> {
    if value.is_negative() {
        return Err(FinanceError::Validation(format!(
            "{} cannot be negative: {}",
            what, value
        )));
    }
    Ok(())
}

/// Find a record by exact id, then by unique id prefix
fn resolve_by_id<'a, T>(
    items: &'a [T],
    typed: &str,
    entity_type: &'static str,
    id_of: impl Fn(&T) -> &str,
    matches: impl Fn(&T, &str) -> bool,
) -> FinanceResult<&'a T> {
    let typed = typed.trim();
    if let Some(exact) = items.iter().find(|item| id_of(item) == typed) {
        return Ok(exact);
    }

    let candidates: Vec<&T> = items.iter().filter(|item| matches(item, typed)).collect();
    match candidates.as_slice() {
        [single] => Ok(*single),
        [] => Err(FinanceError::NotFound {
            entity_type,
            identifier: typed.to_string(),
        }),
        many => Err(FinanceError::Ambiguous {
            entity_type,
            prefix: typed.to_string(),
            matches: many.len(),
        }),
    }
}
