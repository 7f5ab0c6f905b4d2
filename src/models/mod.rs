//! Core data models for fintrack
//!
//! Value objects for the ledger: expense and income records, account balance
//! snapshots, reserves, money and categories.

pub mod balance;
pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;

pub use balance::{AccountBalance, AccountKind, ReserveItem, DEFAULT_ACCOUNTS};
pub use category::{Category, FALLBACK_COLOR};
pub use expense::{ExpensePatch, ExpenseRecord, ExpenseStatus, ExpenseType, NewExpense, PaymentMethod};
pub use ids::{BalanceId, ExpenseId, IncomeId, ReserveId};
pub use income::{IncomeRecord, IncomeType, NewIncome};
pub use money::{Money, MoneyParseError};
