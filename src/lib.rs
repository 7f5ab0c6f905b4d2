//! fintrack - personal finance ledger and statistics
//!
//! This library keeps a household ledger of expenses, incomes, account
//! balance snapshots, reserves and a monthly expense goal, persisted as
//! independent JSON blobs, and derives the figures shown on the dashboard
//! and in date-range reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Value objects (expenses, incomes, balances, money, categories)
//! - `storage`: Key/value blob persistence
//! - `ledger`: The in-memory ledger and its mutations
//! - `services`: Date ranges and statistics
//! - `reports`: Dashboard and period reports with export
//! - `backup`: Whole-ledger JSON backup and restore
//! - `advice`: Spending tips from a text-generation service
//! - `cli`, `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::FinancePaths;
//! use fintrack::ledger::LedgerStore;
//! use fintrack::storage::open_file_store;
//!
//! let paths = FinancePaths::new()?;
//! let store = LedgerStore::open(open_file_store(&paths)?)?;
//! ```

pub mod advice;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
