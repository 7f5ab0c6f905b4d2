//! Display formatting for terminal output
//!
//! Tables for record listings and small helpers shared by the report views.

pub mod format;
pub mod ledger;

pub use format::{bar, double_separator, money, money_colored, percentage, separator, truncate};
pub use ledger::{
    format_account_table, format_expense_details, format_expense_table, format_income_table,
    format_reserve_table,
};
