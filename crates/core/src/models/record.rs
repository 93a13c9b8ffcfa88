use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Whether a record is money going out or coming in.
/// Expenses subtract from the balance, income adds to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Expense => write!(f, "expense"),
            RecordKind::Income => write!(f, "income"),
        }
    }
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];

/// Descriptive repeat schedule attached to a record.
///
/// This is metadata only. A recurring record is counted once, on its own
/// `date`; future occurrences are never generated from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Repeats on a weekday, 0 = Sunday .. 6 = Saturday.
    Weekly { weekday: u8 },
    /// Repeats on a day of the month (1..=31).
    Monthly { day_of_month: u8 },
    /// Repeats once a year; `month` is 0-based (0 = January).
    Annually { month: u8, day_of_month: u8 },
}

impl Recurrence {
    /// Check that every field is within its calendar range.
    pub fn validate(&self) -> Result<(), CoreError> {
        match *self {
            Recurrence::Weekly { weekday } if weekday > 6 => Err(CoreError::ValidationError(
                format!("Weekly recurrence weekday {weekday} out of range (expected 0..=6)"),
            )),
            Recurrence::Monthly { day_of_month } if !(1..=31).contains(&day_of_month) => {
                Err(CoreError::ValidationError(format!(
                    "Monthly recurrence day {day_of_month} out of range (expected 1..=31)"
                )))
            }
            Recurrence::Annually { month, .. } if month > 11 => Err(CoreError::ValidationError(
                format!("Annual recurrence month {month} out of range (expected 0..=11)"),
            )),
            Recurrence::Annually { day_of_month, .. } if !(1..=31).contains(&day_of_month) => {
                Err(CoreError::ValidationError(format!(
                    "Annual recurrence day {day_of_month} out of range (expected 1..=31)"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Recurrence::Weekly { weekday } => {
                let name = WEEKDAY_NAMES.get(weekday as usize).unwrap_or(&"?");
                write!(f, "Every {name}")
            }
            Recurrence::Monthly { day_of_month } => write!(f, "Monthly on day {day_of_month}"),
            Recurrence::Annually { month, day_of_month } => {
                let name = MONTH_NAMES.get(month as usize).unwrap_or(&"?");
                write!(f, "Annually on {name} {day_of_month}")
            }
        }
    }
}

/// Sort order for record listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
    /// Alphabetical by title (case-insensitive)
    TitleAsc,
}

/// One logged expense or income event.
///
/// `category` is a category *name*, not an owning reference: deleting the
/// category definition leaves the record untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Unique identifier, never changes after creation
    pub id: Uuid,

    /// Free-text label
    pub title: String,

    /// Non-negative amount in the ledger's single currency
    pub amount: f64,

    /// Name of the category this record is filed under
    pub category: String,

    /// Calendar date the transaction is attributed to
    pub date: NaiveDate,

    pub kind: RecordKind,

    /// Optional repeat schedule (descriptive only)
    #[serde(default)]
    pub recurrence: Option<Recurrence>,

    /// Optional longer note
    #[serde(default)]
    pub description: Option<String>,
}

impl FinancialRecord {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
        kind: RecordKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category: category.into(),
            date,
            kind,
            recurrence: None,
            description: None,
        }
    }

    /// Shorthand for an expense record.
    pub fn expense(
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(title, amount, category, date, RecordKind::Expense)
    }

    /// Shorthand for an income record.
    pub fn income(
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(title, amount, category, date, RecordKind::Income)
    }

    /// Attach a recurrence schedule.
    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Signed contribution to the balance: income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            RecordKind::Expense => -self.amount,
            RecordKind::Income => self.amount,
        }
    }
}

/// Editable fields of a record, used for updates.
/// The record id is never part of a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub recurrence: Option<Recurrence>,
    pub description: Option<String>,
}

impl RecordDraft {
    /// Turn this draft into a record carrying the given id.
    pub fn into_record(self, id: Uuid) -> FinancialRecord {
        FinancialRecord {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            date: self.date,
            kind: self.kind,
            recurrence: self.recurrence,
            description: self.description,
        }
    }
}

impl From<&FinancialRecord> for RecordDraft {
    fn from(record: &FinancialRecord) -> Self {
        Self {
            title: record.title.clone(),
            amount: record.amount,
            category: record.category.clone(),
            date: record.date,
            kind: record.kind,
            recurrence: record.recurrence,
            description: record.description.clone(),
        }
    }
}
