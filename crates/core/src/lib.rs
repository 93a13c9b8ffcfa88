pub mod errors;
pub mod models;
pub mod palette;
pub mod services;
pub mod sources;
pub mod storage;

use chrono::NaiveDate;
use models::{
    budget::{BudgetLimits, BudgetOverview},
    category::{CategoryDefinition, CategoryDisplay},
    ledger::Ledger,
    period::MonthPeriod,
    record::{FinancialRecord, RecordDraft, RecordKind, RecordSortOrder},
    settings::{Settings, WeekStart},
    summary::{CategoryShare, PeriodSummary},
};
use services::{
    aggregator::Aggregator, budget_service::BudgetService, category_service::CategoryService,
    ledger_service::LedgerService, period_filter::PeriodFilter,
};
use sources::traits::{CategorySource, RecordSource, SettingsSource};
use std::collections::HashMap;
use storage::manager::StorageManager;
use tracing::{debug, info, warn};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the finance ledger core library.
/// Holds the ledger state and all services needed to operate on it.
#[must_use]
pub struct FinanceLedger {
    ledger: Ledger,
    ledger_service: LedgerService,
    category_service: CategoryService,
    budget_service: BudgetService,
    period_filter: PeriodFilter,
    aggregator: Aggregator,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for FinanceLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceLedger")
            .field("records", &self.ledger.records.len())
            .field("categories", &self.ledger.categories.len())
            .field("settings", &self.ledger.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FinanceLedger {
    /// Create a new ledger with the default categories seeded.
    pub fn create_new() -> Self {
        let mut tracker = Self::build(Ledger::default());
        tracker.category_service.ensure_defaults(&mut tracker.ledger);
        tracker
    }

    /// Wrap an existing in-memory ledger.
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self::build(ledger)
    }

    /// Load a ledger from encrypted bytes (password required).
    /// Use this when the host handles file I/O itself.
    pub fn load_from_bytes(encrypted: &[u8], password: &str) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_bytes(encrypted, password)?;
        info!(records = ledger.records.len(), "ledger loaded");
        Ok(Self::build(ledger))
    }

    /// Save the ledger to encrypted bytes.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.ledger, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from an encrypted file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>, password: &str) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(ledger))
    }

    /// Save to an encrypted file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: impl AsRef<std::path::Path>, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.ledger, path, password)?;
        self.dirty = false;
        Ok(())
    }

    /// Re-encrypt the ledger with a new password.
    ///
    /// `last_saved_bytes` must be the most recently saved bytes; the current
    /// password is verified by decrypting them.
    pub fn change_password(
        &mut self,
        last_saved_bytes: &[u8],
        current_password: &str,
        new_password: &str,
    ) -> Result<Vec<u8>, CoreError> {
        StorageManager::load_from_bytes(last_saved_bytes, current_password)?;
        let new_bytes = StorageManager::save_to_bytes(&self.ledger, new_password)?;
        self.dirty = false;
        Ok(new_bytes)
    }

    /// Returns `true` if the ledger has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Read-only access to the whole ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ── External sources ────────────────────────────────────────────

    /// Build a ledger from whatever the sources hold.
    ///
    /// Seeds the default categories only if the category source never
    /// stored a list. Budget limits stay unset (and fall back to the seed
    /// limits on first read) only if the settings source has none.
    pub async fn load_from_sources(
        records: &dyn RecordSource,
        categories: &dyn CategorySource,
        settings: &dyn SettingsSource,
    ) -> Result<Self, CoreError> {
        let loaded_records = records.load_records().await?;
        let loaded_categories = categories.load_categories().await?;
        let loaded_limits = settings.load_budget_limits().await?;
        let loaded_settings = settings.load_settings().await?;
        info!(
            records = loaded_records.len(),
            categories = loaded_categories.as_ref().map(Vec::len),
            has_limits = loaded_limits.is_some(),
            record_source = records.name(),
            category_source = categories.name(),
            settings_source = settings.name(),
            "loaded from sources"
        );

        let mut tracker = Self::build(Ledger::default());
        tracker
            .ledger_service
            .replace_all(&mut tracker.ledger, loaded_records)?;
        match loaded_categories {
            Some(list) => tracker
                .category_service
                .replace_all(&mut tracker.ledger, list)?,
            None => {
                tracker.category_service.ensure_defaults(&mut tracker.ledger);
                tracker.dirty = true;
            }
        }
        if let Some(limits) = loaded_limits {
            limits.validate()?;
            tracker.ledger.budget_limits = Some(limits);
        }
        if let Some(loaded) = loaded_settings {
            loaded.validate()?;
            tracker.ledger.settings = loaded;
        }
        Ok(tracker)
    }

    /// Write the full record list back to a source.
    pub async fn push_records(&self, sink: &dyn RecordSource) -> Result<(), CoreError> {
        sink.replace_records(&self.ledger.records).await
    }

    /// Write the full category list back to a source.
    pub async fn push_categories(&self, sink: &dyn CategorySource) -> Result<(), CoreError> {
        sink.replace_categories(&self.ledger.categories).await
    }

    /// Write settings, and budget limits if they have been set or read,
    /// back to a source.
    pub async fn push_settings(&self, sink: &dyn SettingsSource) -> Result<(), CoreError> {
        if let Some(limits) = &self.ledger.budget_limits {
            sink.replace_budget_limits(limits).await?;
        }
        sink.replace_settings(&self.ledger.settings).await
    }

    // ── Record Management ───────────────────────────────────────────

    /// Add a record. Returns its id.
    ///
    /// A category name matching a known category of the same kind is stored
    /// with that category's spelling, so totals group under one key.
    pub fn add_record(&mut self, mut record: FinancialRecord) -> Result<Uuid, CoreError> {
        let id = record.id;
        record.category = self.canonical_category(record.category, record.kind);
        self.ledger_service.add_record(&mut self.ledger, record)?;
        self.dirty = true;
        Ok(id)
    }

    /// Add several records. All are validated first; if any fails, none are
    /// added (all-or-nothing). Returns their ids.
    pub fn add_records(&mut self, records: Vec<FinancialRecord>) -> Result<Vec<Uuid>, CoreError> {
        let mut staged = self.ledger.clone();
        let mut ids = Vec::with_capacity(records.len());
        for mut record in records {
            ids.push(record.id);
            record.category = self.canonical_category(record.category, record.kind);
            self.ledger_service.add_record(&mut staged, record)?;
        }
        self.ledger = staged;
        self.dirty = true;
        Ok(ids)
    }

    /// Replace a record's fields, keeping its id.
    pub fn update_record(&mut self, record_id: Uuid, mut draft: RecordDraft) -> Result<(), CoreError> {
        draft.category = self.canonical_category(draft.category, draft.kind);
        self.ledger_service
            .update_record(&mut self.ledger, record_id, draft)?;
        self.dirty = true;
        Ok(())
    }

    /// Delete a record permanently.
    pub fn remove_record(&mut self, record_id: Uuid) -> Result<(), CoreError> {
        self.ledger_service
            .remove_record(&mut self.ledger, record_id)?;
        self.dirty = true;
        Ok(())
    }

    /// Set or clear a record's description.
    pub fn set_record_description(
        &mut self,
        record_id: Uuid,
        description: Option<String>,
    ) -> Result<(), CoreError> {
        self.ledger_service
            .set_description(&mut self.ledger, record_id, description)?;
        self.dirty = true;
        Ok(())
    }

    /// Get a single record by its id.
    #[must_use]
    pub fn get_record(&self, record_id: Uuid) -> Option<&FinancialRecord> {
        self.ledger.records.iter().find(|r| r.id == record_id)
    }

    /// All records in store (insertion) order.
    #[must_use]
    pub fn records(&self) -> &[FinancialRecord] {
        &self.ledger.records
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.ledger.records.len()
    }

    // ── Undo (Trash) ────────────────────────────────────────────────

    /// Remove a record and keep it in the trash for potential undo.
    pub fn remove_record_to_trash(&mut self, record_id: Uuid) -> Result<FinancialRecord, CoreError> {
        let record = self
            .ledger_service
            .remove_record(&mut self.ledger, record_id)?;
        self.ledger.trash.push(record.clone());
        self.dirty = true;
        Ok(record)
    }

    /// Restore the most recently trashed record.
    /// Returns `None` if the trash is empty.
    pub fn undo_last_removal(&mut self) -> Result<Option<FinancialRecord>, CoreError> {
        let Some(record) = self.ledger.trash.pop() else {
            return Ok(None);
        };
        if let Err(e) = self.ledger_service.add_record(&mut self.ledger, record.clone()) {
            self.ledger.trash.push(record);
            return Err(e);
        }
        self.dirty = true;
        Ok(Some(record))
    }

    #[must_use]
    pub fn get_trash(&self) -> &[FinancialRecord] {
        &self.ledger.trash
    }

    /// Clear all trashed records permanently.
    pub fn clear_trash(&mut self) {
        if !self.ledger.trash.is_empty() {
            self.ledger.trash.clear();
            self.dirty = true;
        }
    }

    // ── Periods & Listing ───────────────────────────────────────────

    /// Records in a calendar month, in store order.
    /// `month_index` is 0-based; anything above 11 is rejected.
    pub fn records_for_month(&self, year: i32, month_index: u32) -> Result<Vec<&FinancialRecord>, CoreError> {
        let period = MonthPeriod::new(year, month_index)?;
        Ok(self.records_in_period(&period))
    }

    /// Records in an already-validated month, in store order.
    #[must_use]
    pub fn records_in_period(&self, period: &MonthPeriod) -> Vec<&FinancialRecord> {
        self.period_filter.filter_month(&self.ledger.records, period)
    }

    /// Records in a month for display: newest date first, same-day records
    /// keep their store order.
    #[must_use]
    pub fn records_in_period_newest_first(&self, period: &MonthPeriod) -> Vec<&FinancialRecord> {
        let mut records = self.records_in_period(period);
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Records within `from..=to`, in store order.
    pub fn records_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<&FinancialRecord>, CoreError> {
        if from > to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        Ok(self.period_filter.filter_range(&self.ledger.records, from, to))
    }

    /// Records sorted by a specific order.
    #[must_use]
    pub fn records_sorted(&self, order: &RecordSortOrder) -> Vec<&FinancialRecord> {
        let mut records: Vec<&FinancialRecord> = self.ledger.records.iter().collect();
        match order {
            RecordSortOrder::DateDesc => records.sort_by(|a, b| b.date.cmp(&a.date)),
            RecordSortOrder::DateAsc => records.sort_by(|a, b| a.date.cmp(&b.date)),
            RecordSortOrder::AmountDesc => records.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            RecordSortOrder::AmountAsc => records.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
            RecordSortOrder::TitleAsc => {
                records.sort_by_key(|r| r.title.to_lowercase());
            }
        }
        records
    }

    /// Records whose title, category or description contains `query`
    /// (case-insensitive).
    #[must_use]
    pub fn search_records(&self, query: &str) -> Vec<&FinancialRecord> {
        let q = query.to_lowercase();
        self.ledger
            .records
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&q)
                    || r.category.to_lowercase().contains(&q)
                    || r.description.as_deref().unwrap_or("").to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Records carrying recurrence metadata.
    #[must_use]
    pub fn recurring_records(&self) -> Vec<&FinancialRecord> {
        self.ledger.records.iter().filter(|r| r.is_recurring()).collect()
    }

    // ── Categories ──────────────────────────────────────────────────

    #[must_use]
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.ledger.categories
    }

    #[must_use]
    pub fn categories_of_kind(&self, kind: RecordKind) -> Vec<&CategoryDefinition> {
        self.category_service
            .categories_of_kind(&self.ledger.categories, kind)
    }

    /// Add a category. Returns its id.
    pub fn add_category(&mut self, category: CategoryDefinition) -> Result<Uuid, CoreError> {
        let id = category.id;
        self.category_service
            .add_category(&mut self.ledger, category)?;
        self.dirty = true;
        Ok(id)
    }

    /// Delete a category definition. Records that use its name are kept.
    pub fn delete_category(&mut self, category_id: Uuid) -> Result<CategoryDefinition, CoreError> {
        let removed = self
            .category_service
            .delete_category(&mut self.ledger, category_id)?;
        let orphans = self
            .ledger
            .records
            .iter()
            .filter(|r| r.category == removed.name)
            .count();
        if orphans > 0 {
            debug!(category = %removed.name, orphans, "category deleted, records keep its name");
        }
        self.dirty = true;
        Ok(removed)
    }

    /// Seed the default categories unless a category list was already set
    /// up (an emptied list stays empty). Returns whether it seeded.
    pub fn ensure_default_categories(&mut self) -> bool {
        let seeded = self.category_service.ensure_defaults(&mut self.ledger);
        if seeded {
            self.dirty = true;
        }
        seeded
    }

    /// Icon and color for a record's category, with the fallback look for
    /// names whose definition was deleted.
    #[must_use]
    pub fn category_display(&self, record: &FinancialRecord) -> CategoryDisplay {
        self.category_service
            .resolve_display(&self.ledger.categories, &record.category, record.kind)
    }

    // ── Aggregation ─────────────────────────────────────────────────

    /// Total of one kind within a month.
    #[must_use]
    pub fn month_total(&self, period: &MonthPeriod, kind: RecordKind) -> f64 {
        self.aggregator.total_by_kind(self.records_in_period(period), kind)
    }

    /// Expense totals per category within a month (sparse).
    #[must_use]
    pub fn month_category_totals(&self, period: &MonthPeriod) -> HashMap<String, f64> {
        self.aggregator
            .totals_by_category(self.records_in_period(period))
    }

    /// Chart slices for every known category, in category order.
    #[must_use]
    pub fn month_category_shares(&self, period: &MonthPeriod) -> Vec<CategoryShare> {
        self.aggregator
            .percentage_breakdown(self.records_in_period(period), &self.ledger.categories)
    }

    /// Dashboard summary for a month.
    #[must_use]
    pub fn month_summary(&self, period: &MonthPeriod) -> PeriodSummary {
        self.aggregator
            .summarize(self.records_in_period(period), *period)
    }

    /// Income minus expenses over all records.
    #[must_use]
    pub fn overall_balance(&self) -> f64 {
        self.aggregator.net_balance(&self.ledger.records)
    }

    // ── Budget ──────────────────────────────────────────────────────

    /// Current budget limits. The seed limits are stored on first read.
    pub fn budget_limits(&mut self) -> BudgetLimits {
        if let Some(limits) = self.ledger.budget_limits {
            return limits;
        }
        let limits = BudgetLimits::default();
        self.ledger.budget_limits = Some(limits);
        self.dirty = true;
        debug!("budget limits initialised with defaults");
        limits
    }

    /// Replace all three budget limits at once.
    pub fn set_budget_limits(&mut self, limits: BudgetLimits) -> Result<(), CoreError> {
        limits.validate()?;
        self.ledger.budget_limits = Some(limits);
        self.dirty = true;
        Ok(())
    }

    /// Daily, weekly and monthly budget bars as of `today`.
    pub fn budget_overview(&mut self, today: NaiveDate) -> BudgetOverview {
        let limits = self.budget_limits();
        let overview = self.budget_service.budget_overview(
            &self.ledger.records,
            &limits,
            today,
            self.ledger.settings.week_start,
        );
        if overview.any_over_budget() {
            warn!(%today, "spending is over budget");
        }
        overview
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Set the symbol shown next to amounts (e.g. "$", "€", "zł").
    pub fn set_currency_symbol(&mut self, symbol: impl Into<String>) -> Result<(), CoreError> {
        let updated = Settings {
            currency_symbol: symbol.into().trim().to_string(),
            ..self.ledger.settings.clone()
        };
        updated.validate()?;
        self.ledger.settings = updated;
        self.dirty = true;
        Ok(())
    }

    pub fn set_week_start(&mut self, week_start: WeekStart) {
        self.ledger.settings.week_start = week_start;
        self.dirty = true;
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all records as a JSON string.
    pub fn export_records_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger.records)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize records to JSON: {e}")))
    }

    /// Import records from a JSON array (all-or-nothing).
    /// Returns the number of records imported.
    pub fn import_records_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let records: Vec<FinancialRecord> = serde_json::from_str(json)?;
        let count = records.len();
        self.add_records(records)?;
        info!(count, "records imported");
        Ok(count)
    }

    /// Export all records as CSV.
    /// Columns: id, title, kind, category, amount, date, recurrence, description
    pub fn export_records_to_csv(&self) -> Result<String, CoreError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id", "title", "kind", "category", "amount", "date", "recurrence", "description",
        ])?;
        for r in &self.ledger.records {
            writer.write_record([
                r.id.to_string(),
                r.title.clone(),
                r.kind.to_string(),
                r.category.clone(),
                r.amount.to_string(),
                r.date.to_string(),
                r.recurrence.map(|rec| rec.to_string()).unwrap_or_default(),
                r.description.clone().unwrap_or_default(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::Serialization(format!("CSV: {e}")))?;
        String::from_utf8(bytes).map_err(|e| CoreError::Serialization(format!("CSV: {e}")))
    }

    /// Unencrypted JSON snapshot of the whole ledger (debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn canonical_category(&self, name: String, kind: RecordKind) -> String {
        match self
            .category_service
            .canonical_name(&self.ledger.categories, &name, kind)
        {
            Some(canonical) if canonical != name => canonical.to_string(),
            _ => name,
        }
    }

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            ledger_service: LedgerService::new(),
            category_service: CategoryService::new(),
            budget_service: BudgetService::new(),
            period_filter: PeriodFilter::new(),
            aggregator: Aggregator::new(),
            dirty: false,
        }
    }
}
