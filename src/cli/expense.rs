//! Expense CLI commands

use clap::Subcommand;

use super::{parse_date, parse_date_or, parse_non_negative_amount, today};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table, money};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::LedgerStore;
use crate::models::{
    Category, ExpensePatch, ExpenseStatus, ExpenseType, Money, NewExpense, PaymentMethod,
};
use crate::services::period::matches_search;
use crate::services::DateRange;
use crate::storage::BlobStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the expense is for
        description: String,

        /// Amount (e.g., "150", "150.90" or "R$ 150,90")
        amount: String,

        /// Category label (e.g., "Alimentação"); unknown labels are kept as typed
        #[arg(short, long, default_value = "Outros")]
        category: String,

        /// fixed or variable
        #[arg(short = 't', long = "type", default_value = "variable")]
        kind: String,

        /// Due date (YYYY-MM-DD or DD/MM/YYYY, defaults to today)
        #[arg(short, long)]
        due: Option<String>,

        /// paid, pending or overdue
        #[arg(short, long, default_value = "pending")]
        status: String,

        /// pix, card, cash, boleto or debit
        #[arg(short, long, default_value = "pix")]
        payment: String,

        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List expenses
    List {
        /// Only descriptions containing this text
        #[arg(long)]
        search: Option<String>,

        /// Only this status
        #[arg(short, long)]
        status: Option<String>,

        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Due on or after this date
        #[arg(long)]
        from: Option<String>,

        /// Due on or before this date
        #[arg(long)]
        to: Option<String>,
    },

    /// Show one expense in full
    Show {
        /// Expense ID (or unique prefix)
        id: String,
    },

    /// Change fields of an expense
    Edit {
        /// Expense ID (or unique prefix)
        id: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        amount: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        #[arg(short, long)]
        due: Option<String>,

        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        payment: Option<String>,

        #[arg(short, long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        /// Remove the notes
        #[arg(long)]
        clear_notes: bool,
    },

    /// Mark an expense as paid
    Pay {
        /// Expense ID (or unique prefix)
        id: String,
    },

    /// Delete an expense
    Remove {
        /// Expense ID (or unique prefix)
        id: String,
    },
}

fn parse_kind(input: &str) -> FinanceResult<ExpenseType> {
    ExpenseType::parse(input)
        .ok_or_else(|| FinanceError::Validation(format!("Unknown expense type '{}'", input)))
}

fn parse_status(input: &str) -> FinanceResult<ExpenseStatus> {
    ExpenseStatus::parse(input)
        .ok_or_else(|| FinanceError::Validation(format!("Unknown status '{}'", input)))
}

fn parse_payment(input: &str) -> FinanceResult<PaymentMethod> {
    PaymentMethod::parse(input)
        .ok_or_else(|| FinanceError::Validation(format!("Unknown payment method '{}'", input)))
}

/// Handle an expense command
pub fn handle_expense_command<S: BlobStore>(
    store: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            kind,
            due,
            status,
            payment,
            notes,
        } => {
            if description.trim().is_empty() {
                return Err(FinanceError::Validation("Description cannot be empty".into()));
            }

            let mut fields = NewExpense::new(
                description.trim(),
                Category::from_label(&category),
                parse_non_negative_amount(&amount)?,
                parse_date_or(due.as_deref(), today())?,
            );
            fields.kind = parse_kind(&kind)?;
            fields.status = parse_status(&status)?;
            fields.payment_method = parse_payment(&payment)?;
            fields.notes = notes;

            let category_known = fields.category.is_known();
            let record = store.add_expense(fields)?;
            println!(
                "Added expense: {} {} [{}]",
                record.description,
                money(record.amount, symbol),
                record.id.short()
            );
            if !category_known {
                println!("Note: '{}' is not a standard category.", record.category);
            }
        }

        ExpenseCommands::List {
            search,
            status,
            category,
            from,
            to,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let category = category.as_deref().map(Category::from_label);
            let range = match (from.as_deref(), to.as_deref()) {
                (None, None) => None,
                (from, to) => Some(DateRange::new(
                    parse_date_or(from, chrono::NaiveDate::MIN)?,
                    parse_date_or(to, chrono::NaiveDate::MAX)?,
                )),
            };

            let selected: Vec<_> = store
                .expenses()
                .iter()
                .filter(|e| search.as_deref().map_or(true, |term| matches_search(&e.description, term)))
                .filter(|e| status.map_or(true, |s| e.status == s))
                .filter(|e| category.as_ref().map_or(true, |c| &e.category == c))
                .filter(|e| range.map_or(true, |r| r.contains(&e.due_date)))
                .collect();

            println!("{}", format_expense_table(&selected, symbol, date_format));
            if !selected.is_empty() {
                let total: Money = selected.iter().map(|e| e.amount).sum();
                println!("{} expense(s), total {}", selected.len(), money(total, symbol));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = store.resolve_expense(&id)?;
            print!("{}", format_expense_details(expense, symbol, date_format));
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            kind,
            due,
            status,
            payment,
            notes,
            clear_notes,
        } => {
            let patch = ExpensePatch {
                description,
                category: category.as_deref().map(Category::from_label),
                kind: kind.as_deref().map(parse_kind).transpose()?,
                amount: amount.as_deref().map(parse_non_negative_amount).transpose()?,
                due_date: due.as_deref().map(parse_date).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                payment_method: payment.as_deref().map(parse_payment).transpose()?,
                notes: if clear_notes { Some(None) } else { notes.map(Some) },
            };

            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let expense_id = store.resolve_expense(&id)?.id.clone();
            store.update_expense(&expense_id, patch)?;
            println!("Updated expense [{}]", expense_id.short());
        }

        ExpenseCommands::Pay { id } => {
            let expense_id = store.resolve_expense(&id)?.id.clone();
            store.update_expense(&expense_id, ExpensePatch::status(ExpenseStatus::Paid))?;
            println!("Marked expense [{}] as paid", expense_id.short());
        }

        ExpenseCommands::Remove { id } => {
            let expense = store.resolve_expense(&id)?;
            let (expense_id, description) = (expense.id.clone(), expense.description.clone());
            store.remove_expense(&expense_id)?;
            println!("Removed expense: {} [{}]", description, expense_id.short());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BlobKey, MemoryStore};

    fn open_store() -> LedgerStore<MemoryStore> {
        LedgerStore::open(MemoryStore::new().with_blob(BlobKey::BALANCES, "[]")).unwrap()
    }

    fn add(store: &mut LedgerStore<MemoryStore>, description: &str, amount: &str) {
        handle_expense_command(
            store,
            &Settings::default(),
            ExpenseCommands::Add {
                description: description.into(),
                amount: amount.into(),
                category: "Farmácia".into(),
                kind: "fixo".into(),
                due: Some("2025-05-10".into()),
                status: "pendente".into(),
                payment: "card".into(),
                notes: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_add_parses_fields() {
        let mut store = open_store();
        add(&mut store, "Remédio", "R$ 45,90");

        let expense = &store.expenses()[0];
        assert_eq!(expense.amount, Money::from_cents(4590));
        assert_eq!(expense.category, Category::Pharmacy);
        assert_eq!(expense.kind, ExpenseType::Fixed);
        assert_eq!(expense.payment_method, PaymentMethod::Card);
    }

    #[test]
    fn test_add_rejects_bad_amount() {
        let mut store = open_store();
        let err = handle_expense_command(
            &mut store,
            &Settings::default(),
            ExpenseCommands::Add {
                description: "x".into(),
                amount: "lots".into(),
                category: "Outros".into(),
                kind: "variable".into(),
                due: None,
                status: "pending".into(),
                payment: "pix".into(),
                notes: None,
            },
        )
        .unwrap_err();

        assert!(err.is_validation());
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_pay_and_edit_by_prefix() {
        let mut store = open_store();
        add(&mut store, "Remédio", "10");
        let prefix: String = store.expenses()[0].id.as_str().chars().take(6).collect();

        handle_expense_command(&mut store, &Settings::default(), ExpenseCommands::Pay { id: prefix.clone() })
            .unwrap();
        assert_eq!(store.expenses()[0].status, ExpenseStatus::Paid);

        handle_expense_command(
            &mut store,
            &Settings::default(),
            ExpenseCommands::Edit {
                id: prefix,
                description: None,
                amount: Some("12,00".into()),
                category: None,
                kind: None,
                due: None,
                status: None,
                payment: None,
                notes: Some("generic".into()),
                clear_notes: false,
            },
        )
        .unwrap();
        assert_eq!(store.expenses()[0].amount, Money::from_units(12));
        assert_eq!(store.expenses()[0].notes.as_deref(), Some("generic"));
    }

    #[test]
    fn test_remove_unknown_id_is_not_found() {
        let mut store = open_store();
        let err = handle_expense_command(
            &mut store,
            &Settings::default(),
            ExpenseCommands::Remove { id: "nope".into() },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
