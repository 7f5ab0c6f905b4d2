//! Income record model
//!
//! Money received, tagged by source and whether it is business or personal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::IncomeId;
use super::money::Money;

/// Business or personal income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IncomeType {
    #[serde(alias = "Empresarial")]
    Business,
    #[default]
    #[serde(alias = "Pessoal")]
    Personal,
}

impl IncomeType {
    /// Parse from user input (English or Portuguese labels)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "business" | "empresarial" => Some(Self::Business),
            "personal" | "pessoal" => Some(Self::Personal),
            _ => None,
        }
    }
}

impl fmt::Display for IncomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Business => f.pad("Business"),
            Self::Personal => f.pad("Personal"),
        }
    }
}

/// A recorded income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub id: IncomeId,
    #[serde(alias = "fonte")]
    pub source: String,
    #[serde(rename = "type", alias = "tipo")]
    pub kind: IncomeType,
    #[serde(alias = "valor")]
    pub amount: Money,
    #[serde(alias = "dataRecebimento")]
    pub received_date: NaiveDate,
    #[serde(default, alias = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new income
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub source: String,
    pub kind: IncomeType,
    pub amount: Money,
    pub received_date: NaiveDate,
    pub notes: Option<String>,
}

impl NewIncome {
    pub fn new(source: impl Into<String>, amount: Money, received_date: NaiveDate) -> Self {
        Self {
            source: source.into(),
            kind: IncomeType::default(),
            amount,
            received_date,
            notes: None,
        }
    }

    /// Turn the fields into a record with a fresh id
    pub fn into_record(self, created_at: DateTime<Utc>) -> IncomeRecord {
        IncomeRecord {
            id: IncomeId::new(),
            source: self.source,
            kind: self.kind,
            amount: self.amount,
            received_date: self.received_date,
            notes: self.notes,
            created_at,
        }
    }
}
