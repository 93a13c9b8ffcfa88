use chrono::NaiveDate;
use std::borrow::Borrow;
use std::collections::HashMap;

use crate::models::budget::BudgetConsumption;
use crate::models::category::CategoryDefinition;
use crate::models::period::MonthPeriod;
use crate::models::record::{FinancialRecord, RecordKind};
use crate::models::summary::{CategoryBreakdown, CategoryShare, PeriodSummary};

/// How many categories `summarize` lists as top spenders.
const TOP_CATEGORY_COUNT: usize = 3;

/// Derived numbers over an already-filtered set of records.
///
/// Stateless and pure: the same records always give the same numbers, and
/// no method can fail. Empty inputs, zero totals and zero limits resolve to
/// 0 rather than NaN or infinity. Amounts are assumed to be finite; that is
/// checked where records are created, not here.
///
/// Every method accepts anything that iterates over records or record
/// references, so both `&ledger.records` and the output of
/// [`PeriodFilter`](super::period_filter::PeriodFilter) can be passed in.
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// Sum of `amount` over records of the given kind.
    pub fn total_by_kind<I, R>(&self, records: I, kind: RecordKind) -> f64
    where
        I: IntoIterator<Item = R>,
        R: Borrow<FinancialRecord>,
    {
        records
            .into_iter()
            .filter(|r| r.borrow().kind == kind)
            .map(|r| r.borrow().amount)
            .sum()
    }

    /// Expense totals keyed by category name.
    ///
    /// Income is left out: category analysis is about where money goes.
    /// Categories without any expense do not appear in the map.
    pub fn totals_by_category<I, R>(&self, records: I) -> HashMap<String, f64>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<FinancialRecord>,
    {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for record in records {
            let record = record.borrow();
            if record.kind == RecordKind::Expense {
                *totals.entry(record.category.clone()).or_insert(0.0) += record.amount;
            }
        }
        totals
    }

    /// Each category's share of total expenses, in the order `categories`
    /// is given (not sorted by size), so chart legends stay put.
    ///
    /// Every category is listed whatever its kind; income categories and
    /// categories nobody used simply get 0.
    pub fn percentage_breakdown<I, R>(
        &self,
        records: I,
        categories: &[CategoryDefinition],
    ) -> Vec<CategoryShare>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<FinancialRecord>,
    {
        let totals = self.totals_by_category(records);
        let total_expenses: f64 = totals.values().sum();

        categories
            .iter()
            .map(|category| {
                let amount = totals.get(&category.name).copied().unwrap_or(0.0);
                CategoryShare {
                    category: category.name.clone(),
                    amount,
                    percentage: Self::share_pct(amount, total_expenses),
                }
            })
            .collect()
    }

    /// Spend measured against a limit.
    ///
    /// - `percentage_used = min(spent / limit * 100, 100)`, or 0 when `limit <= 0`
    /// - `is_over_budget = spent > limit`
    /// - `overage_amount = max(spent - limit, 0)`
    pub fn budget_consumption(&self, spent: f64, limit: f64) -> BudgetConsumption {
        let percentage_used = if limit > 0.0 {
            ((spent / limit) * 100.0).min(100.0)
        } else {
            0.0
        };

        BudgetConsumption {
            percentage_used,
            is_over_budget: spent > limit,
            overage_amount: (spent - limit).max(0.0),
        }
    }

    /// Income minus expenses.
    pub fn net_balance<I, R>(&self, records: I) -> f64
    where
        I: IntoIterator<Item = R>,
        R: Borrow<FinancialRecord>,
    {
        records.into_iter().map(|r| r.borrow().signed_amount()).sum()
    }

    /// Expenses dated exactly `day`.
    pub fn spending_on<I, R>(&self, records: I, day: NaiveDate) -> f64
    where
        I: IntoIterator<Item = R>,
        R: Borrow<FinancialRecord>,
    {
        self.spending_between(records, day, day)
    }

    /// Expenses dated within `from..=to`.
    pub fn spending_between<I, R>(&self, records: I, from: NaiveDate, to: NaiveDate) -> f64
    where
        I: IntoIterator<Item = R>,
        R: Borrow<FinancialRecord>,
    {
        records
            .into_iter()
            .filter(|r| {
                let r = r.borrow();
                r.kind == RecordKind::Expense && r.date >= from && r.date <= to
            })
            .map(|r| r.borrow().amount)
            .sum()
    }

    /// Full dashboard numbers for records already filtered to `period`.
    pub fn summarize<I, R>(&self, records: I, period: MonthPeriod) -> PeriodSummary
    where
        I: IntoIterator<Item = R>,
        R: Borrow<FinancialRecord>,
    {
        let mut total_income = 0.0;
        let mut total_expenses = 0.0;
        let mut record_count = 0;
        let mut per_category: HashMap<String, (f64, usize)> = HashMap::new();
        let mut income_by_category: HashMap<String, f64> = HashMap::new();

        for record in records {
            let record = record.borrow();
            record_count += 1;
            match record.kind {
                RecordKind::Income => {
                    total_income += record.amount;
                    *income_by_category
                        .entry(record.category.clone())
                        .or_insert(0.0) += record.amount;
                }
                RecordKind::Expense => {
                    total_expenses += record.amount;
                    let entry = per_category.entry(record.category.clone()).or_insert((0.0, 0));
                    entry.0 += record.amount;
                    entry.1 += 1;
                }
            }
        }

        let mut category_breakdown: Vec<CategoryBreakdown> = per_category
            .into_iter()
            .map(|(name, (amount, transaction_count))| CategoryBreakdown {
                percentage: Self::share_pct(amount, total_expenses),
                name,
                amount,
                transaction_count,
            })
            .collect();

        category_breakdown.sort_by(|a, b| {
            Self::largest_first((a.name.as_str(), a.amount), (b.name.as_str(), b.amount))
        });

        let top_expense_categories = category_breakdown
            .iter()
            .take(TOP_CATEGORY_COUNT)
            .map(|c| c.name.clone())
            .collect();

        let mut income_ranked: Vec<(String, f64)> = income_by_category.into_iter().collect();
        income_ranked
            .sort_by(|a, b| Self::largest_first((a.0.as_str(), a.1), (b.0.as_str(), b.1)));
        let top_income_categories = income_ranked
            .into_iter()
            .take(TOP_CATEGORY_COUNT)
            .map(|(name, _)| name)
            .collect();

        PeriodSummary {
            period,
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
            record_count,
            category_breakdown,
            top_expense_categories,
            top_income_categories,
        }
    }

    /// Largest amount first; ties broken by name so output is deterministic.
    fn largest_first(a: (&str, f64), b: (&str, f64)) -> std::cmp::Ordering {
        b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
    }

    fn share_pct(amount: f64, total: f64) -> f64 {
        if total > 0.0 {
            (amount / total) * 100.0
        } else {
            0.0
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

