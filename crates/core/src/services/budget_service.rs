use chrono::NaiveDate;

use crate::models::budget::{BudgetHorizon, BudgetLimits, BudgetOverview, HorizonBudget};
use crate::models::period::MonthPeriod;
use crate::models::record::{FinancialRecord, RecordKind};
use crate::models::settings::WeekStart;
use crate::services::aggregator::Aggregator;
use crate::services::period_filter::PeriodFilter;

/// Builds the daily / weekly / monthly budget bars.
///
/// `today` is always passed in; nothing here reads the clock.
pub struct BudgetService {
    aggregator: Aggregator,
    period_filter: PeriodFilter,
}

impl BudgetService {
    pub fn new() -> Self {
        Self {
            aggregator: Aggregator::new(),
            period_filter: PeriodFilter::new(),
        }
    }

    /// Spend against each limit as of `today`.
    ///
    /// - daily: expenses dated `today`
    /// - weekly: expenses from the start of `today`'s week through `today`
    /// - monthly: expenses anywhere in `today`'s calendar month
    pub fn budget_overview(
        &self,
        records: &[FinancialRecord],
        limits: &BudgetLimits,
        today: NaiveDate,
        week_start: WeekStart,
    ) -> BudgetOverview {
        let daily_spent = self.aggregator.spending_on(records, today);
        let week_from = week_start.start_of_week(today);
        let weekly_spent = self.aggregator.spending_between(records, week_from, today);
        let month = self
            .period_filter
            .filter_month(records, &MonthPeriod::containing(today));
        let monthly_spent = self.aggregator.total_by_kind(month, RecordKind::Expense);

        BudgetOverview {
            as_of_date: today,
            daily: self.horizon(BudgetHorizon::Daily, daily_spent, limits),
            weekly: self.horizon(BudgetHorizon::Weekly, weekly_spent, limits),
            monthly: self.horizon(BudgetHorizon::Monthly, monthly_spent, limits),
        }
    }

    fn horizon(&self, horizon: BudgetHorizon, spent: f64, limits: &BudgetLimits) -> HorizonBudget {
        let limit = limits.limit_for(horizon);
        HorizonBudget {
            horizon,
            spent,
            limit,
            consumption: self.aggregator.budget_consumption(spent, limit),
        }
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
