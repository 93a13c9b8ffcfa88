use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// First day of the week used for the weekly budget window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// The first day of the week containing `date`.
    pub fn start_of_week(self, date: NaiveDate) -> NaiveDate {
        let offset = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        date - chrono::Duration::days(i64::from(offset))
    }
}

/// User-configurable settings, stored inside the encrypted ledger file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Symbol shown next to amounts. Display only: the ledger holds a single
    /// implicit currency and never converts.
    pub currency_symbol: String,

    pub week_start: WeekStart,
}

impl Settings {
    /// Longest accepted currency symbol, in characters.
    pub const MAX_SYMBOL_CHARS: usize = 4;

    pub fn validate(&self) -> Result<(), CoreError> {
        let symbol = &self.currency_symbol;
        if symbol.trim().is_empty() || symbol.chars().count() > Self::MAX_SYMBOL_CHARS {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency symbol '{symbol}': must be 1 to {} characters",
                Self::MAX_SYMBOL_CHARS
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            week_start: WeekStart::default(),
        }
    }
}
