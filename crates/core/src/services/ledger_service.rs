use tracing::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::record::{FinancialRecord, RecordDraft};

/// Manages the record list: add, update, remove, replace.
///
/// This is the input boundary. Amounts, titles and recurrence fields are
/// validated here so the aggregator can assume well-formed numbers.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Append a record after validating it. Store order is insertion order.
    pub fn add_record(&self, ledger: &mut Ledger, record: FinancialRecord) -> Result<(), CoreError> {
        self.validate_record(&record)?;
        if ledger.records.iter().any(|r| r.id == record.id) {
            return Err(CoreError::ValidationError(format!(
                "Record {} already exists",
                record.id
            )));
        }
        debug!(id = %record.id, kind = %record.kind, amount = record.amount, "record added");
        ledger.records.push(record);
        Ok(())
    }

    /// Remove a record by id and return it.
    pub fn remove_record(&self, ledger: &mut Ledger, record_id: Uuid) -> Result<FinancialRecord, CoreError> {
        let idx = Self::position(ledger, record_id)?;
        debug!(id = %record_id, "record removed");
        Ok(ledger.records.remove(idx))
    }

    /// Replace the editable fields of a record, keeping its id and position.
    pub fn update_record(
        &self,
        ledger: &mut Ledger,
        record_id: Uuid,
        draft: RecordDraft,
    ) -> Result<(), CoreError> {
        let idx = Self::position(ledger, record_id)?;
        let updated = draft.into_record(record_id);
        self.validate_record(&updated)?;
        ledger.records[idx] = updated;
        debug!(id = %record_id, "record updated");
        Ok(())
    }

    /// Swap in a whole new record list. Every record is validated first;
    /// if any is invalid the ledger is left untouched.
    pub fn replace_all(&self, ledger: &mut Ledger, records: Vec<FinancialRecord>) -> Result<(), CoreError> {
        for record in &records {
            self.validate_record(record)?;
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            return Err(CoreError::ValidationError(format!(
                "Duplicate record id {} in replacement list",
                dup.id
            )));
        }
        debug!(count = records.len(), "record list replaced");
        ledger.records = records;
        Ok(())
    }

    /// Set or clear the description of an existing record.
    pub fn set_description(
        &self,
        ledger: &mut Ledger,
        record_id: Uuid,
        description: Option<String>,
    ) -> Result<(), CoreError> {
        let record = ledger
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| CoreError::RecordNotFound(record_id.to_string()))?;
        record.description = description;
        Ok(())
    }

    /// Validate a record before it enters the ledger.
    ///
    /// Rules:
    /// - Title must not be blank
    /// - Amount must be finite and non-negative
    /// - Category name must not be blank
    /// - Recurrence fields must be within calendar ranges
    pub fn validate_record(&self, record: &FinancialRecord) -> Result<(), CoreError> {
        if record.title.trim().is_empty() {
            return Err(CoreError::ValidationError("Record title must not be empty".into()));
        }
        if !record.amount.is_finite() || record.amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Record amount must be a non-negative number, got {}",
                record.amount
            )));
        }
        if record.category.trim().is_empty() {
            return Err(CoreError::ValidationError("Record category must not be empty".into()));
        }
        if let Some(recurrence) = &record.recurrence {
            recurrence.validate()?;
        }
        Ok(())
    }

    fn position(ledger: &Ledger, record_id: Uuid) -> Result<usize, CoreError> {
        ledger
            .records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| CoreError::RecordNotFound(record_id.to_string()))
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
