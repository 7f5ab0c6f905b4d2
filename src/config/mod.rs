//! Configuration module for fintrack
//!
//! - Data/backup/config path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::{AdviceSettings, Settings};
