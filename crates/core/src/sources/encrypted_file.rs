use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::budget::BudgetLimits;
use crate::models::category::CategoryDefinition;
use crate::models::ledger::Ledger;
use crate::models::record::FinancialRecord;
use crate::models::settings::Settings;
use crate::storage::encryption::KdfParams;
use crate::storage::manager::StorageManager;

use super::traits::{CategorySource, RecordSource, SettingsSource};

/// Records, categories and settings kept in one encrypted `.fnlg` ledger file.
///
/// Each write re-reads the file, swaps in the new part and saves the whole
/// ledger again, so each part can be written independently.
/// A missing file reads as "nothing stored yet".
///
/// The trait methods do synchronous file I/O and Argon2 key derivation
/// (64 MiB with the default params) on the calling thread. Hosts running
/// on a multi-threaded async runtime should call them from
/// `tokio::task::spawn_blocking` or an equivalent.
pub struct EncryptedFileSource {
    path: PathBuf,
    password: String,
    kdf_params: KdfParams,
}

impl EncryptedFileSource {
    pub fn new(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            password: password.into(),
            kdf_params: KdfParams::default(),
        }
    }

    /// Use non-default key-derivation cost (e.g. cheaper params in tests).
    #[must_use]
    pub fn with_kdf_params(mut self, kdf_params: KdfParams) -> Self {
        self.kdf_params = kdf_params;
        self
    }

    /// `None` if the file does not exist.
    fn read_ledger(&self) -> Result<Option<Ledger>, CoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        StorageManager::load_from_bytes(&bytes, &self.password).map(Some)
    }

    fn update_ledger(&self, apply: impl FnOnce(&mut Ledger)) -> Result<(), CoreError> {
        let mut ledger = self.read_ledger()?.unwrap_or_default();
        apply(&mut ledger);
        let bytes = StorageManager::save_to_bytes_with(&ledger, &self.password, self.kdf_params)?;
        std::fs::write(&self.path, bytes)?;
        debug!(path = %self.path.display(), "ledger file written");
        Ok(())
    }
}

#[async_trait]
impl RecordSource for EncryptedFileSource {
    fn name(&self) -> &str {
        "encrypted-file"
    }

    async fn load_records(&self) -> Result<Vec<FinancialRecord>, CoreError> {
        Ok(self.read_ledger()?.map(|l| l.records).unwrap_or_default())
    }

    async fn replace_records(&self, records: &[FinancialRecord]) -> Result<(), CoreError> {
        self.update_ledger(|ledger| ledger.records = records.to_vec())
    }
}

#[async_trait]
impl CategorySource for EncryptedFileSource {
    fn name(&self) -> &str {
        "encrypted-file"
    }

    async fn load_categories(&self) -> Result<Option<Vec<CategoryDefinition>>, CoreError> {
        Ok(self
            .read_ledger()?
            .filter(|l| l.categories_initialised || !l.categories.is_empty())
            .map(|l| l.categories))
    }

    async fn replace_categories(&self, categories: &[CategoryDefinition]) -> Result<(), CoreError> {
        self.update_ledger(|ledger| {
            ledger.categories = categories.to_vec();
            ledger.categories_initialised = true;
        })
    }
}

#[async_trait]
impl SettingsSource for EncryptedFileSource {
    fn name(&self) -> &str {
        "encrypted-file"
    }

    async fn load_budget_limits(&self) -> Result<Option<BudgetLimits>, CoreError> {
        Ok(self.read_ledger()?.and_then(|l| l.budget_limits))
    }

    async fn replace_budget_limits(&self, limits: &BudgetLimits) -> Result<(), CoreError> {
        self.update_ledger(|ledger| ledger.budget_limits = Some(*limits))
    }

    async fn load_settings(&self) -> Result<Option<Settings>, CoreError> {
        Ok(self.read_ledger()?.map(|l| l.settings))
    }

    async fn replace_settings(&self, settings: &Settings) -> Result<(), CoreError> {
        self.update_ledger(|ledger| ledger.settings = settings.clone())
    }
}
