//! The complete ledger state

use crate::models::{AccountBalance, ExpenseRecord, IncomeRecord, Money, ReserveItem};

/// Everything the store owns; statistics are computed from a reference to this
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub expenses: Vec<ExpenseRecord>,
    pub incomes: Vec<IncomeRecord>,
    pub balances: Vec<AccountBalance>,
    pub reserves: Vec<ReserveItem>,
    pub monthly_expense_goal: Money,
}

impl LedgerState {
    /// True when there is nothing to analyse (balances and reserves don't count)
    pub fn has_no_activity(&self) -> bool {
        self.expenses.is_empty() && self.incomes.is_empty()
    }
}
