//! Account balance CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::{format_account_table, money, money_colored};
use crate::error::FinanceResult;
use crate::ledger::LedgerStore;
use crate::services::StatisticsEngine;
use crate::storage::BlobStore;

/// Balance subcommands
#[derive(Subcommand)]
pub enum BalanceCommands {
    /// List account balances with gross and available totals
    List,

    /// Overwrite an account's current value
    Set {
        /// Account name (case-insensitive) or ID prefix
        account: String,

        /// New value; may be negative (e.g., "-150,00" for an overdraft)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Handle a balance command
pub fn handle_balance_command<S: BlobStore>(
    store: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: BalanceCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BalanceCommands::List => {
            println!(
                "{}",
                format_account_table(store.balances(), symbol, &settings.date_format)
            );

            let figures = StatisticsEngine::new(store.state()).balance_figures();
            println!();
            println!("Gross balance:     {}", money(figures.gross_balance, symbol));
            println!("Reserved:          {}", money(figures.reserve_total, symbol));
            println!(
                "Available balance: {}",
                money_colored(figures.available_balance, symbol)
            );
            if figures.is_overcommitted() {
                println!("Reserves exceed the gross balance.");
            }
        }

        BalanceCommands::Set { account, value } => {
            let value = parse_amount(&value)?;
            let balance = store.resolve_account(&account)?;
            let (id, name) = (balance.id.clone(), balance.name.clone());
            store.update_account_balance(&id, value)?;
            println!("Set {} to {}", name, money(value, symbol));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::MemoryStore;

    #[test]
    fn test_set_by_name_allows_negative() {
        let mut store = LedgerStore::open(MemoryStore::new()).unwrap();
        handle_balance_command(
            &mut store,
            &Settings::default(),
            BalanceCommands::Set {
                account: "dinheiro".into(),
                value: "-20,00".into(),
            },
        )
        .unwrap();

        let cash = store.balances().iter().find(|b| b.name == "Dinheiro").unwrap();
        assert_eq!(cash.value, Money::from_units(-20));
    }

    #[test]
    fn test_set_unknown_account() {
        let mut store = LedgerStore::open(MemoryStore::new()).unwrap();
        let err = handle_balance_command(
            &mut store,
            &Settings::default(),
            BalanceCommands::Set {
                account: "Offshore".into(),
                value: "10".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
