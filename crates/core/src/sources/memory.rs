use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::errors::CoreError;
use crate::models::budget::BudgetLimits;
use crate::models::category::CategoryDefinition;
use crate::models::record::FinancialRecord;
use crate::models::settings::Settings;

use super::traits::{CategorySource, RecordSource, SettingsSource};

const NAME: &str = "memory";

/// Records, categories and settings held in process memory.
/// Useful for tests and for hosts that persist the lists themselves.
///
/// Categories, limits and settings start out as never stored (`None`).
#[derive(Debug, Default)]
pub struct InMemorySource {
    records: Mutex<Vec<FinancialRecord>>,
    categories: Mutex<Option<Vec<CategoryDefinition>>>,
    budget_limits: Mutex<Option<BudgetLimits>>,
    settings: Mutex<Option<Settings>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records only; no category list has been stored yet.
    pub fn with_records(records: Vec<FinancialRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Records plus a stored (possibly empty) category list.
    pub fn with_data(records: Vec<FinancialRecord>, categories: Vec<CategoryDefinition>) -> Self {
        Self {
            records: Mutex::new(records),
            categories: Mutex::new(Some(categories)),
            ..Self::default()
        }
    }

    fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, CoreError> {
        m.lock().map_err(|_| CoreError::Source {
            source_name: NAME.to_string(),
            message: "lock poisoned".to_string(),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordSource for InMemorySource {
    fn name(&self) -> &str {
        NAME
    }

    async fn load_records(&self) -> Result<Vec<FinancialRecord>, CoreError> {
        Ok(Self::lock(&self.records)?.clone())
    }

    async fn replace_records(&self, records: &[FinancialRecord]) -> Result<(), CoreError> {
        *Self::lock(&self.records)? = records.to_vec();
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CategorySource for InMemorySource {
    fn name(&self) -> &str {
        NAME
    }

    async fn load_categories(&self) -> Result<Option<Vec<CategoryDefinition>>, CoreError> {
        Ok(Self::lock(&self.categories)?.clone())
    }

    async fn replace_categories(&self, categories: &[CategoryDefinition]) -> Result<(), CoreError> {
        *Self::lock(&self.categories)? = Some(categories.to_vec());
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SettingsSource for InMemorySource {
    fn name(&self) -> &str {
        NAME
    }

    async fn load_budget_limits(&self) -> Result<Option<BudgetLimits>, CoreError> {
        Ok(*Self::lock(&self.budget_limits)?)
    }

    async fn replace_budget_limits(&self, limits: &BudgetLimits) -> Result<(), CoreError> {
        *Self::lock(&self.budget_limits)? = Some(*limits);
        Ok(())
    }

    async fn load_settings(&self) -> Result<Option<Settings>, CoreError> {
        Ok(Self::lock(&self.settings)?.clone())
    }

    async fn replace_settings(&self, settings: &Settings) -> Result<(), CoreError> {
        *Self::lock(&self.settings)? = Some(settings.clone());
        Ok(())
    }
}
