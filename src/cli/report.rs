//! Report CLI commands
//!
//! The dashboard summary and date-range reports with optional file export.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use super::{parse_date, parse_date_or, today};
use crate::config::{FinancePaths, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::LedgerStore;
use crate::reports::{export_to_dir, format_terminal, DashboardReport, ExportFormat};
use crate::services::{DateRange, StatisticsEngine};
use crate::storage::BlobStore;

/// Arguments for `fintrack report`
#[derive(Args)]
pub struct ReportArgs {
    /// Range start (defaults to the first of the current month)
    #[arg(long, conflicts_with = "month")]
    pub from: Option<String>,

    /// Range end (defaults to today)
    #[arg(long, conflicts_with = "month")]
    pub to: Option<String>,

    /// A whole calendar month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Export format (csv, json, yaml)
    #[arg(short, long)]
    pub export: Option<String>,

    /// Directory for exported files (defaults to the reports directory)
    #[arg(short, long, requires = "export")]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    fn range(&self, today: NaiveDate) -> FinanceResult<DateRange> {
        if let Some(month) = &self.month {
            let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
                .map_err(|_| {
                    FinanceError::Validation(format!("Invalid month '{}'. Use YYYY-MM", month))
                })?;
            return Ok(DateRange::month_of(first));
        }

        let default = DateRange::month_to_date(today);
        let start = parse_date_or(self.from.as_deref(), default.start)?;
        let end = match self.to.as_deref() {
            Some(to) => parse_date(to)?,
            None => default.end,
        };
        Ok(DateRange::new(start, end))
    }
}

/// Print the dashboard for today
pub fn handle_dashboard_command<S: BlobStore>(
    store: &LedgerStore<S>,
    settings: &Settings,
) -> FinanceResult<()> {
    let report = DashboardReport::generate(store.state(), today());
    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}

/// Handle `fintrack report`
pub fn handle_report_command<S: BlobStore>(
    store: &LedgerStore<S>,
    paths: &FinancePaths,
    settings: &Settings,
    args: ReportArgs,
) -> FinanceResult<()> {
    let range = args.range(today())?;
    if range.is_empty() {
        return Err(FinanceError::Validation(format!(
            "Range start {} is after its end {}",
            range.start, range.end
        )));
    }

    let report = StatisticsEngine::new(store.state()).period_report(range);
    print!("{}", format_terminal(&report, &settings.currency_symbol));

    if let Some(format) = args.export.as_deref() {
        let format = ExportFormat::parse(format).ok_or_else(|| {
            FinanceError::Validation(format!(
                "Unknown export format '{}'. Use csv, json or yaml",
                format
            ))
        })?;
        let dir = args.output.unwrap_or_else(|| paths.reports_dir());

        println!();
        for path in export_to_dir(&report, format, &dir)? {
            println!("Exported: {}", path.display());
        }
    }

    Ok(())
}
