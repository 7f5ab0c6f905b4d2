//! Period Report
//!
//! Terminal view and file exports for a [`PeriodReport`]. The CSV export
//! writes two files, one for expenses and one for incomes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::display::{double_separator, money, percentage, separator, truncate};
use crate::error::{FinanceError, FinanceResult};
use crate::services::{sorted_by_amount, DateRange, PeriodReport};

/// Output format for report exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ExpenseCsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Payment")]
    payment: String,
}

#[derive(Serialize)]
struct IncomeCsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Source")]
    source: &'a str,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Format the report for terminal display
pub fn format_terminal(report: &PeriodReport, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Financial Report: {}\n", report.range));
    output.push_str(&double_separator(60));
    output.push('\n');
    output.push_str(&format!("{:<28} {:>20}\n", "Total income:", money(report.total_income, symbol)));
    output.push_str(&format!("{:<28} {:>20}\n", "Total expenses:", money(report.total_expense, symbol)));
    output.push_str(&format!("{:<28} {:>20}\n", "Balance:", money(report.net_balance, symbol)));
    output.push_str(&format!(
        "{:<28} {:>20}\n\n",
        "Records:",
        format!("{} expense(s), {} income(s)", report.expenses.len(), report.incomes.len())
    ));

    if report.categories.is_empty() {
        output.push_str("No expenses in this period.\n");
        return output;
    }

    output.push_str(&format!("{:<28} {:>14} {:>6} {:>7}\n", "Category", "Amount", "Count", "Share"));
    output.push_str(&separator(60));
    output.push('\n');
    for slice in sorted_by_amount(report.categories.clone()) {
        output.push_str(&format!(
            "{:<28} {:>14} {:>6} {:>7}\n",
            truncate(slice.category.label(), 28),
            money(slice.amount, symbol),
            slice.count,
            percentage(slice.share_percent)
        ));
    }

    output
}

/// Write the period's expenses as CSV
pub fn write_expenses_csv<W: Write>(report: &PeriodReport, writer: W) -> FinanceResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for expense in &report.expenses {
        csv.serialize(ExpenseCsvRow {
            date: expense.due_date.to_string(),
            description: &expense.description,
            category: expense.category.label(),
            amount: expense.amount.to_string(),
            status: expense.status.to_string(),
            payment: expense.payment_method.to_string(),
        })
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    }
    if report.expenses.is_empty() {
        csv.write_record(["Date", "Description", "Category", "Amount", "Status", "Payment"])
            .map_err(|e| FinanceError::Export(e.to_string()))?;
    }
    csv.flush().map_err(|e| FinanceError::Export(e.to_string()))
}

/// Write the period's incomes as CSV
pub fn write_incomes_csv<W: Write>(report: &PeriodReport, writer: W) -> FinanceResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for income in &report.incomes {
        csv.serialize(IncomeCsvRow {
            date: income.received_date.to_string(),
            source: &income.source,
            kind: income.kind.to_string(),
            amount: income.amount.to_string(),
        })
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    }
    if report.incomes.is_empty() {
        csv.write_record(["Date", "Source", "Type", "Amount"])
            .map_err(|e| FinanceError::Export(e.to_string()))?;
    }
    csv.flush().map_err(|e| FinanceError::Export(e.to_string()))
}

pub fn write_json<W: Write>(report: &PeriodReport, writer: W) -> FinanceResult<()> {
    serde_json::to_writer_pretty(writer, report).map_err(|e| FinanceError::Export(e.to_string()))
}

pub fn write_yaml<W: Write>(report: &PeriodReport, mut writer: W) -> FinanceResult<()> {
    writeln!(writer, "# fintrack report: {}", report.range)
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    serde_yaml::to_writer(writer, report).map_err(|e| FinanceError::Export(e.to_string()))
}

/// Base file name for a range, e.g. `report_2025-03-01_to_2025-03-31`
pub fn file_stem(range: &DateRange) -> String {
    format!("report_{}_to_{}", range.start, range.end)
}

/// Write the report into `dir` in the given format; returns the files written
pub fn export_to_dir(report: &PeriodReport, format: ExportFormat, dir: &Path) -> FinanceResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .map_err(|e| FinanceError::Export(format!("Failed to create {}: {}", dir.display(), e)))?;

    let stem = file_stem(&report.range);
    let written = match format {
        ExportFormat::Csv => {
            let expenses_path = dir.join(format!("{}_expenses.csv", stem));
            let incomes_path = dir.join(format!("{}_incomes.csv", stem));
            write_expenses_csv(report, create(&expenses_path)?)?;
            write_incomes_csv(report, create(&incomes_path)?)?;
            vec![expenses_path, incomes_path]
        }
        ExportFormat::Json => {
            let path = dir.join(format!("{}.json", stem));
            let mut writer = create(&path)?;
            write_json(report, &mut writer)?;
            writer.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
            vec![path]
        }
        ExportFormat::Yaml => {
            let path = dir.join(format!("{}.yaml", stem));
            let mut writer = create(&path)?;
            write_yaml(report, &mut writer)?;
            writer.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
            vec![path]
        }
    };

    info!(files = written.len(), range = %report.range, "exported report");
    Ok(written)
}

fn create(path: &Path) -> FinanceResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| FinanceError::Export(format!("Failed to create {}: {}", path.display(), e)))
}
