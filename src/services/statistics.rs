//! Derived figures over a ledger state
//!
//! Everything here is a pure function of the state (plus an injected "today"
//! for budget pacing). Reductions over nothing are zero and no division can
//! panic.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::period::{days_in_month, DateRange};
use crate::ledger::LedgerState;
use crate::models::{Category, ExpenseRecord, ExpenseStatus, IncomeRecord, Money};

/// Income/expense totals across the whole ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerTotals {
    pub total_income: Money,
    pub total_expense: Money,
    /// Expenses still marked pending
    pub pending: Money,
    /// Expenses marked overdue
    pub overdue: Money,
    pub net_flow: Money,
}

/// Account balances net of reserves
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceFigures {
    pub gross_balance: Money,
    pub reserve_total: Money,
    /// May be negative; never clamped
    pub available_balance: Money,
}

impl BalanceFigures {
    /// Reserves exceed what the accounts hold
    pub fn is_overcommitted(&self) -> bool {
        self.available_balance.is_negative()
    }
}

/// One category's share of expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: Category,
    pub amount: Money,
    pub count: usize,
    /// Percentage of the breakdown total; zero when the total is zero
    pub share_percent: f64,
    pub color: &'static str,
}

/// Month-to-date spending against the monthly goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetPacing {
    pub today: NaiveDate,
    pub days_in_month: u32,
    /// Days left including today
    pub remaining_days: i64,
    pub monthly_goal: Money,
    pub current_month_expense_total: Money,
    pub available_budget: Money,
    pub daily_limit: Money,
    /// Across all incomes, not just this month's
    pub total_income: Money,
    pub goal_exceeds_income: bool,
    pub spent_percentage_of_goal: f64,
}

/// Everything that happened in a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub range: DateRange,
    pub expenses: Vec<ExpenseRecord>,
    pub incomes: Vec<IncomeRecord>,
    pub total_income: Money,
    pub total_expense: Money,
    pub net_balance: Money,
    pub categories: Vec<CategorySlice>,
}

/// Read-only statistics over a ledger state
#[derive(Debug, Clone, Copy)]
pub struct StatisticsEngine<'a> {
    state: &'a LedgerState,
}

impl<'a> StatisticsEngine<'a> {
    pub fn new(state: &'a LedgerState) -> Self {
        Self { state }
    }

    pub fn total_income(&self) -> Money {
        self.state.incomes.iter().map(|i| i.amount).sum()
    }

    pub fn total_expense(&self) -> Money {
        self.state.expenses.iter().map(|e| e.amount).sum()
    }

    fn expense_total_with_status(&self, status: ExpenseStatus) -> Money {
        self.state
            .expenses
            .iter()
            .filter(|e| e.status == status)
            .map(|e| e.amount)
            .sum()
    }

    pub fn totals(&self) -> LedgerTotals {
        let total_income = self.total_income();
        let total_expense = self.total_expense();

        LedgerTotals {
            total_income,
            total_expense,
            pending: self.expense_total_with_status(ExpenseStatus::Pending),
            overdue: self.expense_total_with_status(ExpenseStatus::Overdue),
            net_flow: total_income - total_expense,
        }
    }

    pub fn balance_figures(&self) -> BalanceFigures {
        let gross_balance: Money = self.state.balances.iter().map(|b| b.value).sum();
        let reserve_total: Money = self.state.reserves.iter().map(|r| r.value).sum();

        BalanceFigures {
            gross_balance,
            reserve_total,
            available_balance: gross_balance - reserve_total,
        }
    }

    /// Breakdown of every expense in the ledger
    pub fn category_breakdown(&self) -> Vec<CategorySlice> {
        category_breakdown(&self.state.expenses)
    }

    /// Spending pace for the month containing `today`
    pub fn budget_pacing(&self, today: NaiveDate) -> BudgetPacing {
        let days_in_month = days_in_month(today);
        let remaining_days = i64::from(days_in_month) - i64::from(today.day()) + 1;

        let current_month_expense_total: Money = self
            .state
            .expenses
            .iter()
            .filter(|e| e.due_date.year() == today.year() && e.due_date.month() == today.month())
            .map(|e| e.amount)
            .sum();

        let monthly_goal = self.state.monthly_expense_goal;
        let total_income = self.total_income();
        let available_budget = monthly_goal - current_month_expense_total;

        let goal_exceeds_income = monthly_goal > total_income;
        let daily_limit = daily_limit(available_budget, remaining_days, goal_exceeds_income);

        let spent_percentage_of_goal = if monthly_goal.is_positive() {
            current_month_expense_total.percent_of(monthly_goal)
        } else {
            0.0
        };

        BudgetPacing {
            today,
            days_in_month,
            remaining_days,
            monthly_goal,
            current_month_expense_total,
            available_budget,
            daily_limit,
            total_income,
            goal_exceeds_income,
            spent_percentage_of_goal,
        }
    }

    /// Expenses by due date and incomes by received date within `range`
    pub fn period_report(&self, range: DateRange) -> PeriodReport {
        let expenses = range.select(&self.state.expenses, |e| e.due_date);
        let incomes = range.select(&self.state.incomes, |i| i.received_date);

        let total_expense: Money = expenses.iter().map(|e| e.amount).sum();
        let total_income: Money = incomes.iter().map(|i| i.amount).sum();
        let categories = category_breakdown(expenses.iter().copied());

        PeriodReport {
            range,
            expenses: expenses.into_iter().cloned().collect(),
            incomes: incomes.into_iter().cloned().collect(),
            total_income,
            total_expense,
            net_balance: total_income - total_expense,
            categories,
        }
    }
}

/// Budget left per remaining day, zero once no days remain. Always
/// non-positive when the goal is higher than total income.
pub fn daily_limit(available_budget: Money, remaining_days: i64, goal_exceeds_income: bool) -> Money {
    if remaining_days <= 0 {
        return Money::zero();
    }

    let limit = available_budget.div_rounded(remaining_days);
    if goal_exceeds_income {
        -limit.abs()
    } else {
        limit
    }
}

/// Group expenses by category in order of first appearance
pub fn category_breakdown<'e, I>(expenses: I) -> Vec<CategorySlice>
where
    I: IntoIterator<Item = &'e ExpenseRecord>,
{
    let mut slices: Vec<CategorySlice> = Vec::new();

    for expense in expenses {
        match slices.iter_mut().find(|s| s.category == expense.category) {
            Some(slice) => {
                slice.amount += expense.amount;
                slice.count += 1;
            }
            None => slices.push(CategorySlice {
                category: expense.category.clone(),
                amount: expense.amount,
                count: 1,
                share_percent: 0.0,
                color: expense.category.color(),
            }),
        }
    }

    let total: Money = slices.iter().map(|s| s.amount).sum();
    for slice in &mut slices {
        slice.share_percent = slice.amount.percent_of(total);
    }

    slices
}

/// Largest category first; ties keep first-appearance order
pub fn sorted_by_amount(mut slices: Vec<CategorySlice>) -> Vec<CategorySlice> {
    slices.sort_by(|a, b| b.amount.cmp(&a.amount));
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountBalance, NewExpense, NewIncome, ReserveItem};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: Category, cents: i64, due: NaiveDate, status: ExpenseStatus) -> ExpenseRecord {
        let mut fields = NewExpense::new("item", category, Money::from_cents(cents), due);
        fields.status = status;
        fields.into_record(Utc::now())
    }

    fn income(cents: i64, received: NaiveDate) -> IncomeRecord {
        NewIncome::new("Salary", Money::from_cents(cents), received).into_record(Utc::now())
    }

    #[test]
    fn test_empty_state_is_all_zero() {
        let state = LedgerState::default();
        let engine = StatisticsEngine::new(&state);

        let totals = engine.totals();
        assert!(totals.total_income.is_zero());
        assert!(totals.net_flow.is_zero());
        assert!(engine.balance_figures().available_balance.is_zero());
        assert!(engine.category_breakdown().is_empty());

        let pacing = engine.budget_pacing(date(2025, 3, 15));
        assert!(pacing.daily_limit.is_zero());
        assert_eq!(pacing.spent_percentage_of_goal, 0.0);
    }

    #[test]
    fn test_net_flow_is_exact() {
        let state = LedgerState {
            incomes: vec![income(10, date(2025, 1, 1)), income(20, date(2025, 1, 2))],
            expenses: vec![expense(Category::Food, 30, date(2025, 1, 3), ExpenseStatus::Paid)],
            ..LedgerState::default()
        };

        let totals = StatisticsEngine::new(&state).totals();
        assert_eq!(totals.total_income, Money::from_cents(30));
        assert!(totals.net_flow.is_zero());
    }

    #[test]
    fn test_pending_and_overdue() {
        let day = date(2025, 1, 3);
        let state = LedgerState {
            expenses: vec![
                expense(Category::Food, 100, day, ExpenseStatus::Pending),
                expense(Category::Food, 200, day, ExpenseStatus::Overdue),
                expense(Category::Food, 400, day, ExpenseStatus::Paid),
                expense(Category::Water, 800, day, ExpenseStatus::Pending),
            ],
            ..LedgerState::default()
        };

        let totals = StatisticsEngine::new(&state).totals();
        assert_eq!(totals.pending, Money::from_cents(900));
        assert_eq!(totals.overdue, Money::from_cents(200));
        assert_eq!(totals.total_expense, Money::from_cents(1500));
    }

    #[test]
    fn test_available_balance_may_go_negative() {
        let state = LedgerState {
            balances: vec![AccountBalance::new("Dinheiro", Money::from_units(100))],
            reserves: vec![ReserveItem::new("Emergency", Money::from_units(150))],
            ..LedgerState::default()
        };

        let figures = StatisticsEngine::new(&state).balance_figures();
        assert_eq!(figures.available_balance, Money::from_units(-50));
        assert!(figures.is_overcommitted());
    }

    #[test]
    fn test_breakdown_order_and_sum() {
        let day = date(2025, 2, 10);
        let state = LedgerState {
            expenses: vec![
                expense(Category::Water, 1000, day, ExpenseStatus::Paid),
                expense(Category::Food, 3000, day, ExpenseStatus::Paid),
                expense(Category::Water, 1000, day, ExpenseStatus::Pending),
                expense(Category::from_label("Pet Shop"), 0, day, ExpenseStatus::Paid),
            ],
            ..LedgerState::default()
        };

        let engine = StatisticsEngine::new(&state);
        let slices = engine.category_breakdown();

        let labels: Vec<&str> = slices.iter().map(|s| s.category.label()).collect();
        assert_eq!(labels, vec!["Água", "Alimentação", "Pet Shop"]);
        assert!(!labels.contains(&"Energia"));

        assert_eq!(slices[0].amount, Money::from_cents(2000));
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].share_percent, 40.0);
        assert_eq!(slices[2].color, "#CBD5E1");

        let sum: Money = slices.iter().map(|s| s.amount).sum();
        assert_eq!(sum, engine.totals().total_expense);

        let sorted = sorted_by_amount(slices);
        assert_eq!(sorted[0].category, Category::Food);
    }

    #[test]
    fn test_budget_pacing_daily_limit() {
        let state = LedgerState {
            monthly_expense_goal: Money::from_units(1000),
            incomes: vec![income(500_000, date(2024, 1, 5))],
            expenses: vec![
                expense(Category::Food, 60_000, date(2025, 4, 3), ExpenseStatus::Paid),
                expense(Category::Food, 99_900, date(2025, 3, 31), ExpenseStatus::Paid),
                expense(Category::Food, 99_900, date(2024, 4, 10), ExpenseStatus::Paid),
            ],
            ..LedgerState::default()
        };

        // April has 30 days; on the 21st, 10 days remain including today
        let pacing = StatisticsEngine::new(&state).budget_pacing(date(2025, 4, 21));

        assert_eq!(pacing.days_in_month, 30);
        assert_eq!(pacing.remaining_days, 10);
        assert_eq!(pacing.current_month_expense_total, Money::from_units(600));
        assert_eq!(pacing.available_budget, Money::from_units(400));
        assert_eq!(pacing.daily_limit, Money::from_units(40));
        assert_eq!(pacing.spent_percentage_of_goal, 60.0);
        assert!(!pacing.goal_exceeds_income);
    }

    #[test]
    fn test_goal_above_income_forces_negative_limit() {
        let state = LedgerState {
            monthly_expense_goal: Money::from_units(1000),
            incomes: vec![income(50_000, date(2025, 4, 1))],
            ..LedgerState::default()
        };

        let pacing = StatisticsEngine::new(&state).budget_pacing(date(2025, 4, 21));

        assert!(pacing.goal_exceeds_income);
        assert_eq!(pacing.daily_limit, Money::from_units(-100));
    }

    #[test]
    fn test_overspent_budget_and_last_day() {
        let state = LedgerState {
            monthly_expense_goal: Money::from_units(100),
            incomes: vec![income(100_000, date(2025, 4, 1))],
            expenses: vec![expense(Category::Food, 25_000, date(2025, 4, 2), ExpenseStatus::Paid)],
            ..LedgerState::default()
        };

        let pacing = StatisticsEngine::new(&state).budget_pacing(date(2025, 4, 30));

        assert_eq!(pacing.remaining_days, 1);
        assert_eq!(pacing.daily_limit, Money::from_units(-150));
        assert_eq!(pacing.spent_percentage_of_goal, 250.0);
    }

    #[test]
    fn test_daily_limit_without_remaining_days() {
        assert!(daily_limit(Money::from_units(300), 0, false).is_zero());
        assert!(daily_limit(Money::from_units(300), -2, true).is_zero());
        assert!(daily_limit(Money::from_units(-300), 0, true).is_zero());
    }

    #[test]
    fn test_daily_limit_sign() {
        assert_eq!(daily_limit(Money::from_units(300), 3, false), Money::from_units(100));
        assert_eq!(daily_limit(Money::from_units(-300), 3, false), Money::from_units(-100));
        assert_eq!(daily_limit(Money::from_units(300), 3, true), Money::from_units(-100));
        assert_eq!(daily_limit(Money::from_units(-300), 3, true), Money::from_units(-100));
    }

    #[test]
    fn test_zero_goal_gives_zero_percent() {
        let state = LedgerState {
            expenses: vec![expense(Category::Food, 5000, date(2025, 4, 2), ExpenseStatus::Paid)],
            ..LedgerState::default()
        };

        let pacing = StatisticsEngine::new(&state).budget_pacing(date(2025, 4, 10));
        assert_eq!(pacing.spent_percentage_of_goal, 0.0);
        assert_eq!(pacing.available_budget, Money::from_cents(-5000));
    }

    #[test]
    fn test_period_report() {
        let state = LedgerState {
            expenses: vec![
                expense(Category::Food, 1000, date(2025, 3, 31), ExpenseStatus::Paid),
                expense(Category::Phone, 2000, date(2025, 4, 1), ExpenseStatus::Paid),
            ],
            incomes: vec![
                income(5000, date(2025, 3, 1)),
                income(7000, date(2025, 2, 28)),
            ],
            ..LedgerState::default()
        };

        let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 31));
        let report = StatisticsEngine::new(&state).period_report(range);

        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.incomes.len(), 1);
        assert_eq!(report.total_expense, Money::from_cents(1000));
        assert_eq!(report.total_income, Money::from_cents(5000));
        assert_eq!(report.net_balance, Money::from_cents(4000));
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].category, Category::Food);
    }
}
