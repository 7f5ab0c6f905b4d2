//! Service layer for fintrack
//!
//! Read-side logic on top of the ledger: date-range selection and the
//! statistics shown on the dashboard and in reports.

pub mod period;
pub mod statistics;

pub use period::{select_in_range, DateRange, RangeInstant};
pub use statistics::{
    category_breakdown, sorted_by_amount, BalanceFigures, BudgetPacing, CategorySlice,
    LedgerTotals, PeriodReport, StatisticsEngine,
};
