//! Expense record model
//!
//! An expense is a bill or purchase with a due date and a payment status.
//! Amounts are never negative; the direction of money is implied by the
//! record kind, not by sign.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// Whether an expense recurs every month or varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExpenseType {
    #[serde(alias = "Fixo")]
    Fixed,
    #[default]
    #[serde(alias = "Variável")]
    Variable,
}

impl ExpenseType {
    /// Parse from user input (English or Portuguese labels)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fixed" | "fixo" => Some(Self::Fixed),
            "variable" | "variável" | "variavel" => Some(Self::Variable),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => f.pad("Fixed"),
            Self::Variable => f.pad("Variable"),
        }
    }
}

/// Payment status of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExpenseStatus {
    #[serde(alias = "Pago")]
    Paid,
    #[default]
    #[serde(alias = "Pendente")]
    Pending,
    #[serde(alias = "Atrasado")]
    Overdue,
}

impl ExpenseStatus {
    /// Parse from user input (English or Portuguese labels)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paid" | "pago" => Some(Self::Paid),
            "pending" | "pendente" => Some(Self::Pending),
            "overdue" | "atrasado" => Some(Self::Overdue),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => f.pad("Paid"),
            Self::Pending => f.pad("Pending"),
            Self::Overdue => f.pad("Overdue"),
        }
    }
}

/// How an expense is (or will be) paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Pix,
    #[serde(alias = "Cartão")]
    Card,
    #[serde(alias = "Dinheiro")]
    Cash,
    Boleto,
    #[serde(alias = "Débito")]
    Debit,
}

impl PaymentMethod {
    /// Parse from user input (English or Portuguese labels)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pix" => Some(Self::Pix),
            "card" | "credit" | "cartão" | "cartao" => Some(Self::Card),
            "cash" | "dinheiro" => Some(Self::Cash),
            "boleto" => Some(Self::Boleto),
            "debit" | "débito" | "debito" => Some(Self::Debit),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pix => f.pad("Pix"),
            Self::Card => f.pad("Card"),
            Self::Cash => f.pad("Cash"),
            Self::Boleto => f.pad("Boleto"),
            Self::Debit => f.pad("Debit"),
        }
    }
}

/// A recorded expense
///
/// Records keyed in Portuguese (`descricao`, `valor`, `dataVencimento`, ...)
/// are read as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    #[serde(alias = "descricao")]
    pub description: String,
    #[serde(alias = "categoria")]
    pub category: Category,
    #[serde(rename = "type", alias = "tipo")]
    pub kind: ExpenseType,
    #[serde(alias = "valor")]
    pub amount: Money,
    #[serde(alias = "dataVencimento")]
    pub due_date: NaiveDate,
    pub status: ExpenseStatus,
    #[serde(alias = "formaPagamento")]
    pub payment_method: PaymentMethod,
    #[serde(default, alias = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new expense; id and timestamp are assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub category: Category,
    pub kind: ExpenseType,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub status: ExpenseStatus,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

impl NewExpense {
    /// A pending variable Pix expense; adjust the public fields as needed
    pub fn new(
        description: impl Into<String>,
        category: Category,
        amount: Money,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            category,
            kind: ExpenseType::default(),
            amount,
            due_date,
            status: ExpenseStatus::default(),
            payment_method: PaymentMethod::default(),
            notes: None,
        }
    }

    /// Turn the fields into a record with a fresh id
    pub fn into_record(self, created_at: DateTime<Utc>) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(),
            description: self.description,
            category: self.category,
            kind: self.kind,
            amount: self.amount,
            due_date: self.due_date,
            status: self.status,
            payment_method: self.payment_method,
            notes: self.notes,
            created_at,
        }
    }
}

/// Partial update for an expense. `None` leaves a field untouched;
/// `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub category: Option<Category>,
    pub kind: Option<ExpenseType>,
    pub amount: Option<Money>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<ExpenseStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<Option<String>>,
}

impl ExpensePatch {
    /// Patch that only changes the status
    pub fn status(status: ExpenseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ExpenseRecord {
    /// Merge the set fields of a patch into this record
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(payment_method) = patch.payment_method {
            self.payment_method = payment_method;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}
