use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::record::MONTH_NAMES;

/// A calendar month, identified by year and a 0-based month index
/// (0 = January .. 11 = December).
///
/// Construction validates the month index, so anything holding a
/// `MonthPeriod` can rely on it being in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMonthPeriod")]
pub struct MonthPeriod {
    year: i32,
    month_index: u32,
}

/// Wire shape of [`MonthPeriod`]; deserialized values go through
/// [`MonthPeriod::new`] so stored data cannot bypass the range check.
#[derive(Deserialize)]
struct RawMonthPeriod {
    year: i32,
    month_index: u32,
}

impl TryFrom<RawMonthPeriod> for MonthPeriod {
    type Error = CoreError;

    fn try_from(raw: RawMonthPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month_index)
    }
}

impl MonthPeriod {
    /// Build a period, rejecting a month index outside `0..=11`.
    /// Out-of-range indices are never wrapped into the next year.
    pub fn new(year: i32, month_index: u32) -> Result<Self, CoreError> {
        if month_index > 11 {
            return Err(CoreError::InvalidPeriod(month_index));
        }
        Ok(Self { year, month_index })
    }

    /// The month a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month_index: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-based month index.
    pub fn month_index(&self) -> u32 {
        self.month_index
    }

    /// Whether `date` lies in this month. Compares calendar fields only.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month_index
    }

    /// The following month; December rolls over into January of the next year.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month_index == 11 {
            Self { year: self.year + 1, month_index: 0 }
        } else {
            Self { year: self.year, month_index: self.month_index + 1 }
        }
    }

    /// The preceding month; January rolls back into December of the previous year.
    #[must_use]
    pub fn previous(&self) -> Self {
        if self.month_index == 0 {
            Self { year: self.year - 1, month_index: 11 }
        } else {
            Self { year: self.year, month_index: self.month_index - 1 }
        }
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month_index + 1, 1)
    }

    /// Last calendar day of the month.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.next().first_day().and_then(|d| d.pred_opt())
    }

    /// Human label, e.g. "March 2025".
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month_index as usize], self.year)
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month_index + 1)
    }
}
