use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Spending ceilings for the three budget horizons.
///
/// One per ledger. Created with the seed values on first read and only ever
/// replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimits {
    pub daily_limit: f64,
    pub weekly_limit: f64,
    pub monthly_limit: f64,
}

impl BudgetLimits {
    pub const DEFAULT_DAILY: f64 = 50.0;
    pub const DEFAULT_WEEKLY: f64 = 300.0;
    pub const DEFAULT_MONTHLY: f64 = 1200.0;

    pub fn new(daily_limit: f64, weekly_limit: f64, monthly_limit: f64) -> Self {
        Self {
            daily_limit,
            weekly_limit,
            monthly_limit,
        }
    }

    /// Every limit must be a finite, non-negative number.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("daily", self.daily_limit),
            ("weekly", self.weekly_limit),
            ("monthly", self.monthly_limit),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "{name} limit must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Limit for a given horizon.
    pub fn limit_for(&self, horizon: BudgetHorizon) -> f64 {
        match horizon {
            BudgetHorizon::Daily => self.daily_limit,
            BudgetHorizon::Weekly => self.weekly_limit,
            BudgetHorizon::Monthly => self.monthly_limit,
        }
    }
}

impl Default for BudgetLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DAILY, Self::DEFAULT_WEEKLY, Self::DEFAULT_MONTHLY)
    }
}

/// Time window a budget limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetHorizon {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for BudgetHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetHorizon::Daily => write!(f, "Daily"),
            BudgetHorizon::Weekly => write!(f, "Weekly"),
            BudgetHorizon::Monthly => write!(f, "Monthly"),
        }
    }
}

/// How much of a limit has been used.
///
/// `percentage_used` is capped at 100 so a progress bar never overflows;
/// `overage_amount` is the true uncapped excess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetConsumption {
    pub percentage_used: f64,
    pub is_over_budget: bool,
    pub overage_amount: f64,
}

impl BudgetConsumption {
    /// Share of the bar left unfilled, `100 - percentage_used`.
    pub fn remaining_pct(&self) -> f64 {
        100.0 - self.percentage_used
    }
}

/// Spend against one horizon's limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonBudget {
    pub horizon: BudgetHorizon,
    pub spent: f64,
    pub limit: f64,
    pub consumption: BudgetConsumption,
}

/// Daily, weekly and monthly budget bars for one reference day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub as_of_date: chrono::NaiveDate,
    pub daily: HorizonBudget,
    pub weekly: HorizonBudget,
    pub monthly: HorizonBudget,
}

impl BudgetOverview {
    /// The three horizons in display order.
    pub fn horizons(&self) -> [&HorizonBudget; 3] {
        [&self.daily, &self.weekly, &self.monthly]
    }

    /// True if any horizon is over its limit.
    pub fn any_over_budget(&self) -> bool {
        self.horizons().iter().any(|h| h.consumption.is_over_budget)
    }
}
