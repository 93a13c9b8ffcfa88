use serde::{Deserialize, Serialize};

use super::period::MonthPeriod;

/// One slice of a chart: a category's share of total expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,

    /// Expense total for this category in the filtered records
    pub amount: f64,

    /// `amount / total_expenses * 100`, or 0 when there are no expenses
    pub percentage: f64,
}

/// Per-category line of a period summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub amount: f64,
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Everything a monthly dashboard shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: MonthPeriod,
    pub total_income: f64,
    pub total_expenses: f64,

    /// income - expenses
    pub net_balance: f64,

    /// Number of records in the period, both kinds
    pub record_count: usize,

    /// Expense categories, largest first
    pub category_breakdown: Vec<CategoryBreakdown>,

    /// Names of the (up to) three largest expense categories
    pub top_expense_categories: Vec<String>,

    /// Names of the (up to) three largest income categories
    pub top_income_categories: Vec<String>,
}
