use chrono::NaiveDate;

use crate::models::period::MonthPeriod;
use crate::models::record::FinancialRecord;

/// Selects the records that fall inside a period.
///
/// Pure business logic, no I/O. Results are stable: records come back in
/// the same relative order they had in the input, never duplicated.
pub struct PeriodFilter;

impl PeriodFilter {
    pub fn new() -> Self {
        Self
    }

    /// Records dated within the given calendar month (every day inclusive).
    ///
    /// The month is matched on the date's year and month fields, so there is
    /// no timezone or epoch arithmetic that could shift a record across a
    /// month boundary.
    pub fn filter_month<'a>(
        &self,
        records: &'a [FinancialRecord],
        period: &MonthPeriod,
    ) -> Vec<&'a FinancialRecord> {
        records.iter().filter(|r| period.contains(r.date)).collect()
    }

    /// Records dated within `from..=to`. Empty if `from > to`.
    pub fn filter_range<'a>(
        &self,
        records: &'a [FinancialRecord],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<&'a FinancialRecord> {
        records
            .iter()
            .filter(|r| r.date >= from && r.date <= to)
            .collect()
    }
}

impl Default for PeriodFilter {
    fn default() -> Self {
        Self::new()
    }
}
