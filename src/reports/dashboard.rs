//! Dashboard Report
//!
//! The at-a-glance view: totals, net worth after reserves, budget pacing for
//! the current month and where the money went.

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::{bar, double_separator, money, percentage, separator, truncate};
use crate::ledger::LedgerState;
use crate::services::{
    sorted_by_amount, BalanceFigures, BudgetPacing, CategorySlice, LedgerTotals, StatisticsEngine,
};

/// Everything shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub today: NaiveDate,
    pub totals: LedgerTotals,
    pub balances: BalanceFigures,
    pub pacing: BudgetPacing,
    /// Largest category first
    pub categories: Vec<CategorySlice>,
    pub account_count: usize,
    pub reserve_count: usize,
}

impl DashboardReport {
    pub fn generate(state: &LedgerState, today: NaiveDate) -> Self {
        let engine = StatisticsEngine::new(state);

        Self {
            today,
            totals: engine.totals(),
            balances: engine.balance_figures(),
            pacing: engine.budget_pacing(today),
            categories: sorted_by_amount(engine.category_breakdown()),
            account_count: state.balances.len(),
            reserve_count: state.reserves.len(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard ({})\n", self.today.format("%d/%m/%Y")));
        output.push_str(&double_separator(60));
        output.push('\n');

        output.push_str(&format!("{:<28} {:>20}\n", "Total income:", money(self.totals.total_income, symbol)));
        output.push_str(&format!("{:<28} {:>20}\n", "Total expenses:", money(self.totals.total_expense, symbol)));
        output.push_str(&format!("{:<28} {:>20}\n", "Net flow:", money(self.totals.net_flow, symbol)));
        output.push_str(&format!("{:<28} {:>20}\n", "Pending:", money(self.totals.pending, symbol)));
        output.push_str(&format!("{:<28} {:>20}\n", "Overdue:", money(self.totals.overdue, symbol)));
        output.push('\n');

        output.push_str(&format!(
            "{:<28} {:>20}\n",
            format!("Accounts ({}):", self.account_count),
            money(self.balances.gross_balance, symbol)
        ));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            format!("Reserves ({}):", self.reserve_count),
            money(self.balances.reserve_total, symbol)
        ));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Available:",
            money(self.balances.available_balance, symbol)
        ));
        if self.balances.is_overcommitted() {
            output.push_str("  ! Reserves exceed the account balances\n");
        }
        output.push('\n');

        output.push_str(&self.format_pacing(symbol));

        if !self.categories.is_empty() {
            output.push('\n');
            output.push_str(&format!("{:<24} {:>14} {:>7}  {}\n", "Category", "Amount", "Share", ""));
            output.push_str(&separator(60));
            output.push('\n');
            for slice in &self.categories {
                output.push_str(&format!(
                    "{:<24} {:>14} {:>7}  {}\n",
                    truncate(slice.category.label(), 24),
                    money(slice.amount, symbol),
                    percentage(slice.share_percent),
                    bar(slice.share_percent, 100.0, 10)
                ));
            }
        }

        output
    }

    fn format_pacing(&self, symbol: &str) -> String {
        let pacing = &self.pacing;
        let mut output = String::new();

        output.push_str(&format!(
            "Monthly goal: {} ({} spent, {} of goal)\n",
            money(pacing.monthly_goal, symbol),
            money(pacing.current_month_expense_total, symbol),
            percentage(pacing.spent_percentage_of_goal)
        ));
        output.push_str(&format!(
            "  [{}]\n",
            bar(pacing.spent_percentage_of_goal, 100.0, 30)
        ));
        output.push_str(&format!(
            "  Left this month: {} over {} day(s)\n",
            money(pacing.available_budget, symbol),
            pacing.remaining_days
        ));
        output.push_str(&format!("  Daily limit: {}\n", money(pacing.daily_limit, symbol)));
        if pacing.goal_exceeds_income {
            output.push_str("  ! Goal is higher than total income\n");
        }

        output
    }
}
