use thiserror::Error;

use crate::models::record::RecordKind;

/// Unified error type for the entire finance-ledger-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Aggregation never fails: empty inputs, zero limits and orphaned category
/// names all resolve to well-defined numbers instead of errors.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: wrong password or corrupted file")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── External collaborators ──────────────────────────────────────
    #[error("Source error ({source_name}): {message}")]
    Source {
        source_name: String,
        message: String,
    },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid month index {0}: expected 0..=11")]
    InvalidPeriod(u32),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Category '{name}' already exists for {kind} records")]
    DuplicateCategory { name: String, kind: RecordKind },
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Serialization(format!("CSV: {e}"))
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
