//! Advice CLI command

use tracing::warn;

use crate::advice::{fallback_tips, AdviceService, OllamaAdviceProvider};
use crate::config::Settings;
use crate::error::FinanceResult;
use crate::ledger::LedgerStore;
use crate::storage::BlobStore;

/// Print spending tips for the current ledger
pub fn handle_advice_command<S: BlobStore>(
    store: &LedgerStore<S>,
    settings: &Settings,
) -> FinanceResult<()> {
    if store.state().has_no_activity() {
        println!("Record some expenses or incomes first to get advice.");
        return Ok(());
    }

    let tips = if settings.advice.enabled {
        match OllamaAdviceProvider::new(&settings.advice) {
            Ok(provider) => AdviceService::new(provider).advise(store.expenses(), store.incomes()),
            Err(e) => {
                warn!(error = %e, "advice provider unavailable; using fallback");
                fallback_tips()
            }
        }
    } else {
        fallback_tips()
    };

    println!("Tips");
    println!("====");
    for (i, tip) in tips.iter().enumerate() {
        println!("  {}. {}", i + 1, tip);
    }

    Ok(())
}
