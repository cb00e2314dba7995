use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{saturating_sum, BudgetPlan, Month, SavingsGoal, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MonthSummary {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
}

impl MonthSummary {
    pub(crate) fn net(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }
}

/// Income and spending bucketed by calendar month, January first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MonthlyData {
    pub(crate) months: [MonthSummary; 12],
    /// Transactions left out because their date could not be read.
    pub(crate) skipped: usize,
}

impl MonthlyData {
    pub(crate) fn get(&self, month: Month) -> MonthSummary {
        self.months[month.index()]
    }

    pub(crate) fn total(&self) -> MonthSummary {
        self.months
            .iter()
            .fold(MonthSummary::default(), |acc, m| MonthSummary {
                income: acc.income.saturating_add(m.income),
                expenses: acc.expenses.saturating_add(m.expenses),
            })
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Month, MonthSummary)> + '_ {
        Month::all().iter().map(|m| (*m, self.months[m.index()]))
    }
}

pub(crate) fn monthly_data(transactions: &[Transaction]) -> MonthlyData {
    let mut data = MonthlyData::default();
    for txn in transactions {
        let Some(date) = txn.parsed_date() else {
            warn!(date = %txn.date, description = %txn.description, "skipping transaction with unreadable date");
            data.skipped += 1;
            continue;
        };
        let bucket = &mut data.months[Month::from_date(date).index()];
        if txn.is_income() {
            bucket.income = bucket.income.saturating_add(txn.amount);
        } else {
            bucket.expenses = bucket.expenses.saturating_add(txn.amount);
        }
    }
    data
}

/// `value` as a percentage of `max`; zero when there is no limit. A ratio
/// too large to represent saturates.
pub(crate) fn progress_percent(value: Decimal, max: Decimal) -> Decimal {
    if max.is_zero() {
        return Decimal::ZERO;
    }
    value
        .checked_div(max)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if value.is_sign_negative() == max.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// Fill ratio for a progress bar, clamped to `0.0..=1.0`.
pub(crate) fn bar_fraction(value: Decimal, max: Decimal) -> f64 {
    let pct = progress_percent(value, max).to_f64().unwrap_or(0.0);
    (pct / 100.0).clamp(0.0, 1.0)
}

pub(crate) fn is_over(value: Decimal, max: Decimal) -> bool {
    value > max
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetProgress {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    /// Capped at 100 for display.
    pub(crate) percent: Decimal,
    pub(crate) over: bool,
}

/// Spending against each plan category, computed from expense transactions
/// whose category matches the category name exactly.
pub(crate) fn budget_tracking(plan: &BudgetPlan, transactions: &[Transaction]) -> Vec<BudgetProgress> {
    plan.categories
        .iter()
        .map(|cat| {
            let spent = saturating_sum(
                transactions
                    .iter()
                    .filter(|t| t.is_expense() && t.category == cat.name)
                    .map(|t| t.amount),
            );
            BudgetProgress {
                category: cat.name.clone(),
                budget: cat.limit,
                spent,
                percent: progress_percent(spent, cat.limit).min(Decimal::ONE_HUNDRED),
                over: !cat.limit.is_zero() && is_over(spent, cat.limit),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GoalProgress {
    pub(crate) name: String,
    pub(crate) target: Decimal,
    pub(crate) saved: Decimal,
    pub(crate) percent: Decimal,
}

/// Every goal draws on the same balance: all income recorded so far.
pub(crate) fn goal_progress(goals: &[SavingsGoal], transactions: &[Transaction]) -> Vec<GoalProgress> {
    let saved = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount),
    );
    goals
        .iter()
        .map(|g| GoalProgress {
            name: g.name.clone(),
            target: g.target,
            saved,
            percent: progress_percent(saved, g.target).min(Decimal::ONE_HUNDRED),
        })
        .collect()
}

/// Each category's share of the total limit, for the allocation chart.
pub(crate) fn allocation(plan: &BudgetPlan) -> Vec<(String, f64)> {
    let total = plan.total_limit();
    plan.categories
        .iter()
        .map(|c| {
            let share = if total.is_zero() {
                0.0
            } else {
                c.limit
                    .checked_div(total)
                    .and_then(|s| s.to_f64())
                    .unwrap_or(0.0)
            };
            (c.name.clone(), share)
        })
        .collect()
}

/// Months whose spending reaches the threshold. A zero threshold turns the
/// red zone off.
pub(crate) fn red_zone_months(data: &MonthlyData, threshold: Decimal) -> Vec<Month> {
    if threshold <= Decimal::ZERO {
        return Vec::new();
    }
    data.iter()
        .filter(|(_, s)| s.expenses >= threshold)
        .map(|(m, _)| m)
        .collect()
}

/// Highest monthly spending; the top edge of the red zone band.
pub(crate) fn spending_peak(data: &MonthlyData) -> Decimal {
    data.months
        .iter()
        .map(|m| m.expenses)
        .max()
        .unwrap_or(Decimal::ZERO)
}
