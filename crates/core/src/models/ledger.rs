use serde::{Deserialize, Serialize};

use super::budget::BudgetLimits;
use super::category::CategoryDefinition;
use super::record::FinancialRecord;
use super::settings::Settings;

/// The main data container. The whole struct is what gets encrypted into
/// a portable .fnlg file.
///
/// Records are kept in insertion order; that order is what period filters
/// preserve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// All logged expense/income records
    pub records: Vec<FinancialRecord>,

    /// Category definitions. Records refer to these by name only.
    pub categories: Vec<CategoryDefinition>,

    /// Set once a category list has been stored (seeded, edited or loaded).
    /// An initialised but empty list means the user deleted every category
    /// and must not be re-seeded.
    #[serde(default)]
    pub categories_initialised: bool,

    /// `None` until first read, then the seed limits or whatever the user set
    #[serde(default)]
    pub budget_limits: Option<BudgetLimits>,

    pub settings: Settings,

    /// Records that have been removed but can be restored (undo support).
    #[serde(default)]
    pub trash: Vec<FinancialRecord>,
}
