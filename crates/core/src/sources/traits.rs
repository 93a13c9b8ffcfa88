use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::budget::BudgetLimits;
use crate::models::category::CategoryDefinition;
use crate::models::record::FinancialRecord;
use crate::models::settings::Settings;

/// Where the record list lives between sessions (device storage, a hosted
/// backend, a file).
///
/// Only whole-list reads and whole-list writes exist: after any add or
/// delete the caller writes the complete list back.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecordSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// The full current record list.
    async fn load_records(&self) -> Result<Vec<FinancialRecord>, CoreError>;

    /// Overwrite the stored list with `records`.
    async fn replace_records(&self, records: &[FinancialRecord]) -> Result<(), CoreError>;
}

/// Where category definitions live. Loaded and persisted independently
/// of records.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CategorySource: Send + Sync {
    fn name(&self) -> &str;

    /// `None` if no category list was ever stored. `Some` of an empty list
    /// means the user deleted every category.
    async fn load_categories(&self) -> Result<Option<Vec<CategoryDefinition>>, CoreError>;

    async fn replace_categories(&self, categories: &[CategoryDefinition]) -> Result<(), CoreError>;
}

/// Where budget limits and display settings live.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SettingsSource: Send + Sync {
    fn name(&self) -> &str;

    /// `None` until limits have been stored; the ledger then falls back to
    /// the seed limits on first read.
    async fn load_budget_limits(&self) -> Result<Option<BudgetLimits>, CoreError>;

    async fn replace_budget_limits(&self, limits: &BudgetLimits) -> Result<(), CoreError>;

    /// `None` until settings have been stored.
    async fn load_settings(&self) -> Result<Option<Settings>, CoreError>;

    async fn replace_settings(&self, settings: &Settings) -> Result<(), CoreError>;
}
