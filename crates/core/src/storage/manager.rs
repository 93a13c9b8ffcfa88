use std::path::Path;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::encryption::{self, KdfParams};
use super::format::{LedgerFile, CURRENT_VERSION};

/// Save/load a whole ledger to/from encrypted bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Ledger → bincode → AES-256-GCM(Argon2id(password)) → FNLG bytes,
    /// using the default KDF cost.
    pub fn save_to_bytes(ledger: &Ledger, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_to_bytes_with(ledger, password, KdfParams::default())
    }

    /// Same as [`StorageManager::save_to_bytes`] with explicit KDF cost.
    pub fn save_to_bytes_with(
        ledger: &Ledger,
        password: &str,
        kdf_params: KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        let sealed = encryption::seal(&plaintext, password, &kdf_params)?;

        let file = LedgerFile {
            version: CURRENT_VERSION,
            kdf_params,
            sealed,
        };
        debug!(records = ledger.records.len(), "ledger encrypted");
        Ok(file.encode())
    }

    /// FNLG bytes → header → Argon2id(password, salt) → decrypt → bincode → Ledger
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Ledger, CoreError> {
        let file = LedgerFile::decode(data)?;
        let plaintext = encryption::open(&file.sealed, password, &file.kdf_params)?;
        bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))
    }

    /// Save a ledger to an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(ledger: &Ledger, path: impl AsRef<Path>, password: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(ledger, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a ledger from an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<Path>, password: &str) -> Result<Ledger, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
