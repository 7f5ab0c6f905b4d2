//! Spending advice from a text-generation service
//!
//! The service gets a short summary of the ledger and is asked for three tips
//! as `{"tips": [...]}`. Any failure along the way (transport, a reply that
//! isn't the expected JSON, an empty list) yields the fixed fallback tips, so
//! callers always get something to show.

pub mod ollama;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::FinanceResult;
use crate::models::{ExpenseRecord, IncomeRecord, Money};

pub use ollama::OllamaAdviceProvider;

/// Tips returned whenever the provider can't produce usable ones
pub const FALLBACK_TIPS: [&str; 3] = [
    "Keep your bills up to date.",
    "Try to save at least 10% of your income.",
    "Avoid impulse purchases.",
];

/// How many expenses are itemised in the prompt
const PROMPT_EXPENSE_LIMIT: usize = 10;

/// Something that turns a prompt into text
pub trait AdviceProvider {
    fn complete(&self, prompt: &str) -> FinanceResult<String>;
}

#[derive(Debug, Deserialize)]
struct TipsReply {
    #[serde(alias = "dicas")]
    tips: Vec<String>,
}

/// Builds prompts, calls a provider and interprets the reply
pub struct AdviceService<P: AdviceProvider> {
    provider: P,
}

impl<P: AdviceProvider> AdviceService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Tips for the given records
    ///
    /// Returns an empty list without calling the provider when there are no
    /// records at all.
    pub fn advise(&self, expenses: &[ExpenseRecord], incomes: &[IncomeRecord]) -> Vec<String> {
        if expenses.is_empty() && incomes.is_empty() {
            return Vec::new();
        }

        let prompt = build_prompt(expenses, incomes);
        match self.provider.complete(&prompt) {
            Ok(reply) => match parse_tips(&reply) {
                Some(tips) => {
                    debug!(count = tips.len(), "received advice");
                    tips
                }
                None => {
                    warn!("advice reply had no usable tips; using fallback");
                    fallback_tips()
                }
            },
            Err(e) => {
                warn!(error = %e, "advice request failed; using fallback");
                fallback_tips()
            }
        }
    }
}

pub fn fallback_tips() -> Vec<String> {
    FALLBACK_TIPS.iter().map(|tip| tip.to_string()).collect()
}

/// Summary prompt: totals, balance and the first expenses
pub fn build_prompt(expenses: &[ExpenseRecord], incomes: &[IncomeRecord]) -> String {
    let total_income: Money = incomes.iter().map(|i| i.amount).sum();
    let total_expense: Money = expenses.iter().map(|e| e.amount).sum();
    let balance = total_income - total_expense;

    let listed: Vec<String> = expenses
        .iter()
        .take(PROMPT_EXPENSE_LIMIT)
        .map(|e| format!("- {}: {} ({})", e.description, e.amount, e.category))
        .collect();

    format!(
        "As an expert financial advisor, analyse this household's figures:\n\
         Total income: {}\n\
         Total expenses: {}\n\
         Current balance: {}\n\
         \n\
         Main expenses:\n\
         {}\n\
         \n\
         Give 3 short, practical tips to improve this household's financial health. \
         Be encouraging and direct. Reply in JSON with a single field \"tips\" holding a list of strings.",
        total_income,
        total_expense,
        balance,
        listed.join("\n")
    )
}

/// Pull the tip list out of a reply, tolerating text around the JSON object
pub fn parse_tips(reply: &str) -> Option<Vec<String>> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }

    let parsed: TipsReply = serde_json::from_str(&reply[start..=end]).ok()?;
    let tips: Vec<String> = parsed
        .tips
        .into_iter()
        .map(|tip| tip.trim().to_string())
        .filter(|tip| !tip.is_empty())
        .collect();

    if tips.is_empty() {
        None
    } else {
        Some(tips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use crate::models::{Category, NewExpense, NewIncome};
    use chrono::{NaiveDate, Utc};
    use std::cell::{Cell, RefCell};

    struct ScriptedProvider {
        reply: FinanceResult<String>,
        calls: Cell<usize>,
        last_prompt: RefCell<String>,
    }

    impl ScriptedProvider {
        fn new(reply: FinanceResult<String>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
                last_prompt: RefCell::new(String::new()),
            }
        }
    }

    impl AdviceProvider for &ScriptedProvider {
        fn complete(&self, prompt: &str) -> FinanceResult<String> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = prompt.to_string();
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(FinanceError::Advice(e.to_string())),
            }
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn expenses(count: usize) -> Vec<ExpenseRecord> {
        (0..count)
            .map(|n| {
                NewExpense::new(format!("bill {n}"), Category::Others, Money::from_units(10), date())
                    .into_record(Utc::now())
            })
            .collect()
    }

    #[test]
    fn test_no_data_skips_provider() {
        let provider = ScriptedProvider::new(Ok(r#"{"tips": ["x"]}"#.into()));
        let tips = AdviceService::new(&provider).advise(&[], &[]);

        assert!(tips.is_empty());
        assert_eq!(provider.calls.get(), 0);
    }

    #[test]
    fn test_parses_tips_inside_text() {
        let provider = ScriptedProvider::new(Ok(
            "Sure! ```json\n{\"tips\": [\"Cut delivery\", \" \", \"Pay on time\"]}\n```".into(),
        ));
        let tips = AdviceService::new(&provider).advise(&expenses(1), &[]);

        assert_eq!(tips, vec!["Cut delivery", "Pay on time"]);
    }

    #[test]
    fn test_provider_error_gives_fallback() {
        let provider = ScriptedProvider::new(Err(FinanceError::Advice("connection refused".into())));
        let tips = AdviceService::new(&provider).advise(&expenses(1), &[]);

        assert_eq!(tips, fallback_tips());
        assert_eq!(tips.len(), 3);
    }

    #[test]
    fn test_unusable_replies_give_fallback() {
        for reply in ["no json here", r#"{"tips": []}"#, r#"{"advice": ["x"]}"#, "} {"] {
            let provider = ScriptedProvider::new(Ok(reply.into()));
            let tips = AdviceService::new(&provider).advise(&expenses(1), &[]);
            assert_eq!(tips, fallback_tips(), "{reply}");
        }
    }

    #[test]
    fn test_prompt_lists_first_ten_expenses() {
        let provider = ScriptedProvider::new(Ok(r#"{"tips": ["ok"]}"#.into()));
        let incomes = vec![NewIncome::new("Salary", Money::from_units(500), date()).into_record(Utc::now())];
        AdviceService::new(&provider).advise(&expenses(12), &incomes);

        let prompt = provider.last_prompt.borrow();
        assert!(prompt.contains("Total income: 500.00"));
        assert!(prompt.contains("Total expenses: 120.00"));
        assert!(prompt.contains("Current balance: 380.00"));
        assert!(prompt.contains("- bill 9: 10.00 (Outros)"));
        assert!(!prompt.contains("bill 10"));
    }

    #[test]
    fn test_portuguese_field_alias() {
        assert_eq!(parse_tips(r#"{"dicas": ["Economize"]}"#), Some(vec!["Economize".to_string()]));
    }
}
