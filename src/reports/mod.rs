//! Reports module for fintrack
//!
//! The dashboard summary and date-range reports, with terminal output and
//! CSV/JSON/YAML export.

pub mod dashboard;
pub mod period;

pub use dashboard::DashboardReport;
pub use period::{export_to_dir, format_terminal, ExportFormat};
