//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger and services.

pub mod advice;
pub mod backup;
pub mod balance;
pub mod expense;
pub mod goal;
pub mod income;
pub mod report;
pub mod reserve;

pub use advice::handle_advice_command;
pub use backup::{handle_backup_command, BackupCommands};
pub use balance::{handle_balance_command, BalanceCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use report::{handle_dashboard_command, handle_report_command, ReportArgs};
pub use reserve::{handle_reserve_command, ReserveCommands};

use chrono::{Local, NaiveDate};

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a user-typed amount; unparseable input is a validation error
pub fn parse_amount(input: &str) -> FinanceResult<Money> {
    Money::parse(input).map_err(|e| FinanceError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse a non-negative amount
pub fn parse_non_negative_amount(input: &str) -> FinanceResult<Money> {
    let amount = parse_amount(input)?;
    if amount.is_negative() {
        return Err(FinanceError::Validation(format!(
            "Amount cannot be negative: {}",
            input
        )));
    }
    Ok(amount)
}

/// Parse `YYYY-MM-DD` or `DD/MM/YYYY`
pub fn parse_date(input: &str) -> FinanceResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .map_err(|_| {
            FinanceError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY",
                input
            ))
        })
}

/// Parse an optional date, defaulting to `fallback`
pub fn parse_date_or(input: Option<&str>, fallback: NaiveDate) -> FinanceResult<NaiveDate> {
    input.map(parse_date).transpose().map(|d| d.unwrap_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("R$ 10,50").unwrap(), Money::from_cents(1050));
        assert!(parse_amount("ten").unwrap_err().is_validation());
        assert!(parse_non_negative_amount("-5").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(parse_date("2025-03-09").unwrap(), expected);
        assert_eq!(parse_date("09/03/2025").unwrap(), expected);
        assert!(parse_date("March 9").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date_or_fallback() {
        let fallback = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(parse_date_or(None, fallback).unwrap(), fallback);
        assert!(parse_date_or(Some("bad"), fallback).is_err());
    }
}
