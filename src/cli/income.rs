//! Income CLI commands
//!
//! Implements CLI commands for recording and listing received income.

use clap::Subcommand;

use super::{parse_date_or, parse_non_negative_amount, today};
use crate::config::Settings;
use crate::display::{format_income_table, money};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::LedgerStore;
use crate::models::{IncomeType, Money, NewIncome};
use crate::services::period::matches_search;
use crate::services::DateRange;
use crate::storage::BlobStore;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record received income
    Add {
        /// Where the money came from (e.g., "Salary")
        source: String,

        /// Amount (e.g., "5000" or "R$ 5.000,00")
        amount: String,

        /// business or personal
        #[arg(short = 't', long = "type", default_value = "personal")]
        kind: String,

        /// Date received (YYYY-MM-DD or DD/MM/YYYY, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List incomes
    List {
        /// Only sources containing this text
        #[arg(long)]
        search: Option<String>,

        /// Received on or after this date
        #[arg(long)]
        from: Option<String>,

        /// Received on or before this date
        #[arg(long)]
        to: Option<String>,
    },

    /// Delete an income
    Remove {
        /// Income ID (or unique prefix)
        id: String,
    },
}

/// Handle an income command
pub fn handle_income_command<S: BlobStore>(
    store: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: IncomeCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::Add {
            source,
            amount,
            kind,
            date,
            notes,
        } => {
            if source.trim().is_empty() {
                return Err(FinanceError::Validation("Source cannot be empty".into()));
            }

            let mut fields = NewIncome::new(
                source.trim(),
                parse_non_negative_amount(&amount)?,
                parse_date_or(date.as_deref(), today())?,
            );
            fields.kind = IncomeType::parse(&kind)
                .ok_or_else(|| FinanceError::Validation(format!("Unknown income type '{}'", kind)))?;
            fields.notes = notes;

            let record = store.add_income(fields)?;
            println!(
                "Added income: {} {} [{}]",
                record.source,
                money(record.amount, symbol),
                record.id.short()
            );
        }

        IncomeCommands::List { search, from, to } => {
            let range = DateRange::new(
                parse_date_or(from.as_deref(), chrono::NaiveDate::MIN)?,
                parse_date_or(to.as_deref(), chrono::NaiveDate::MAX)?,
            );

            let selected: Vec<_> = range
                .select(store.incomes(), |i| i.received_date)
                .into_iter()
                .filter(|i| search.as_deref().map_or(true, |term| matches_search(&i.source, term)))
                .collect();

            println!(
                "{}",
                format_income_table(&selected, symbol, &settings.date_format)
            );
            if !selected.is_empty() {
                let total: Money = selected.iter().map(|i| i.amount).sum();
                println!("{} income(s), total {}", selected.len(), money(total, symbol));
            }
        }

        IncomeCommands::Remove { id } => {
            let income = store.resolve_income(&id)?;
            let (income_id, source) = (income.id.clone(), income.source.clone());
            store.remove_income(&income_id)?;
            println!("Removed income: {} [{}]", source, income_id.short());
        }
    }

    Ok(())
}
