//! Record tables for list commands

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{money, truncate};
use crate::models::{AccountBalance, ExpenseRecord, IncomeRecord, ReserveItem};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Payment")]
    payment: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Account")]
    name: String,
    #[tabled(rename = "Balance")]
    value: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

#[derive(Tabled)]
struct ReserveRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn format_expense_table(expenses: &[&ExpenseRecord], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.short(),
            due: e.due_date.format(date_format).to_string(),
            description: truncate(&e.description, 32),
            category: e.category.to_string(),
            kind: e.kind.to_string(),
            amount: money(e.amount, symbol),
            status: e.status.to_string(),
            payment: e.payment_method.to_string(),
        })
        .collect();

    render(rows)
}

pub fn format_income_table(incomes: &[&IncomeRecord], symbol: &str, date_format: &str) -> String {
    if incomes.is_empty() {
        return "No incomes found.".to_string();
    }

    let rows = incomes
        .iter()
        .map(|i| IncomeRow {
            id: i.id.short(),
            received: i.received_date.format(date_format).to_string(),
            source: truncate(&i.source, 32),
            kind: i.kind.to_string(),
            amount: money(i.amount, symbol),
        })
        .collect();

    render(rows)
}

pub fn format_account_table(balances: &[AccountBalance], symbol: &str, date_format: &str) -> String {
    if balances.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = balances
        .iter()
        .map(|b| AccountRow {
            id: b.id.short(),
            name: b.name.clone(),
            value: money(b.value, symbol),
            updated: b.updated_at.format(date_format).to_string(),
        })
        .collect();

    render(rows)
}

pub fn format_reserve_table(reserves: &[ReserveItem], symbol: &str) -> String {
    if reserves.is_empty() {
        return "No reserves found.".to_string();
    }

    let rows = reserves
        .iter()
        .map(|r| ReserveRow {
            id: r.id.short(),
            description: r.description.clone(),
            value: money(r.value, symbol),
        })
        .collect();

    render(rows)
}

/// Multi-line detail view of a single expense
pub fn format_expense_details(expense: &ExpenseRecord, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.description));
    output.push_str(&format!("ID:          {}\n", expense.id));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Type:        {}\n", expense.kind));
    output.push_str(&format!("Amount:      {}\n", money(expense.amount, symbol)));
    output.push_str(&format!("Due:         {}\n", expense.due_date.format(date_format)));
    output.push_str(&format!("Status:      {}\n", expense.status));
    output.push_str(&format!("Payment:     {}\n", expense.payment_method));
    if let Some(notes) = &expense.notes {
        output.push_str(&format!("Notes:       {}\n", notes));
    }
    output
}
