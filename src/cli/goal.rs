//! Monthly expense goal CLI commands

use clap::Subcommand;

use super::{parse_non_negative_amount, today};
use crate::config::Settings;
use crate::display::{money, percentage};
use crate::error::FinanceResult;
use crate::ledger::LedgerStore;
use crate::services::StatisticsEngine;
use crate::storage::BlobStore;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Show the goal and this month's pacing against it
    Show,

    /// Set the monthly expense goal (0 disables pacing)
    Set {
        /// Goal amount (e.g., "3000" or "R$ 3.000,00")
        amount: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command<S: BlobStore>(
    store: &mut LedgerStore<S>,
    settings: &Settings,
    cmd: GoalCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::Show => {
            let pacing = StatisticsEngine::new(store.state()).budget_pacing(today());
            if pacing.monthly_goal.is_zero() {
                println!("No monthly expense goal set.");
                println!("Set one with: fintrack goal set <amount>");
                return Ok(());
            }

            println!("Monthly goal:     {}", money(pacing.monthly_goal, symbol));
            println!(
                "Spent this month: {} ({})",
                money(pacing.current_month_expense_total, symbol),
                percentage(pacing.spent_percentage_of_goal)
            );
            println!("Still available:  {}", money(pacing.available_budget, symbol));
            println!(
                "Daily limit:      {} over {} day(s)",
                money(pacing.daily_limit, symbol),
                pacing.remaining_days
            );
            if pacing.goal_exceeds_income {
                println!("Goal is higher than total income.");
            }
        }

        GoalCommands::Set { amount } => {
            let goal = parse_non_negative_amount(&amount)?;
            store.set_monthly_expense_goal(goal)?;
            println!("Monthly expense goal set to {}", money(goal, symbol));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::{BlobKey, MemoryStore};

    #[test]
    fn test_set_goal() {
        let mut store =
            LedgerStore::open(MemoryStore::new().with_blob(BlobKey::BALANCES, "[]")).unwrap();
        handle_goal_command(
            &mut store,
            &Settings::default(),
            GoalCommands::Set {
                amount: "2.500,00".into(),
            },
        )
        .unwrap();

        assert_eq!(store.monthly_expense_goal(), Money::from_units(2500));
        assert!(store.backend().raw(BlobKey::EXPENSE_GOAL).is_some());
    }

    #[test]
    fn test_show_without_goal() {
        let mut store =
            LedgerStore::open(MemoryStore::new().with_blob(BlobKey::BALANCES, "[]")).unwrap();
        handle_goal_command(&mut store, &Settings::default(), GoalCommands::Show).unwrap();
    }
}
