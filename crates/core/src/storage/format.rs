use crate::errors::CoreError;

use super::encryption::{KdfParams, Sealed, NONCE_LEN, SALT_LEN};

/// Magic bytes identifying a finance ledger file.
pub const MAGIC: &[u8; 4] = b"FNLG";

/// Current file format version.
pub const CURRENT_VERSION: u16 = 1;

/// Fixed header size in bytes:
/// magic(4) + version(2) + kdf(3 × 4) + salt(16) + nonce(12) + ciphertext_len(8)
pub const HEADER_LEN: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// A parsed ledger file.
#[derive(Debug)]
pub struct LedgerFile {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub sealed: Sealed,
}

impl LedgerFile {
    /// Serialize to the on-disk layout (all integers little-endian):
    ///
    /// ```text
    /// FNLG | version u16 | memory_cost u32 | time_cost u32 | parallelism u32
    ///      | salt [16] | nonce [12] | ciphertext_len u64 | ciphertext
    /// ```
    pub fn encode(&self) -> Vec<u8> {
        let ct = &self.sealed.ciphertext;
        let mut out = Vec::with_capacity(HEADER_LEN + ct.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&self.version.to_le_bytes());
        for v in [
            self.kdf_params.memory_cost,
            self.kdf_params.time_cost,
            self.kdf_params.parallelism,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&self.sealed.salt);
        out.extend_from_slice(&self.sealed.nonce);
        out.extend_from_slice(&(ct.len() as u64).to_le_bytes());
        out.extend_from_slice(ct);
        out
    }

    /// Parse and sanity-check a ledger file. Trailing bytes after the
    /// declared ciphertext are ignored.
    pub fn decode(data: &[u8]) -> Result<Self, CoreError> {
        if data.len() < HEADER_LEN {
            return Err(CoreError::InvalidFileFormat(
                "File too small to be a ledger file".into(),
            ));
        }

        let mut reader = Reader { data, pos: 0 };

        if &reader.take::<4>()? != MAGIC {
            return Err(CoreError::InvalidFileFormat(
                "Invalid magic bytes, not a ledger file".into(),
            ));
        }

        let version = u16::from_le_bytes(reader.take()?);
        if version == 0 || version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(version));
        }

        let kdf_params = KdfParams {
            memory_cost: u32::from_le_bytes(reader.take()?),
            time_cost: u32::from_le_bytes(reader.take()?),
            parallelism: u32::from_le_bytes(reader.take()?),
        };
        kdf_params.validate()?;

        let salt = reader.take::<SALT_LEN>()?;
        let nonce = reader.take::<NONCE_LEN>()?;
        let declared = u64::from_le_bytes(reader.take()?);

        let remaining = data.len() - reader.pos;
        let ct_len = usize::try_from(declared)
            .ok()
            .filter(|&n| n <= remaining)
            .ok_or_else(|| {
                CoreError::InvalidFileFormat(format!(
                    "File truncated: header declares {declared} bytes of ciphertext, {remaining} present"
                ))
            })?;
        let ciphertext = data[reader.pos..reader.pos + ct_len].to_vec();

        Ok(Self {
            version,
            kdf_params,
            sealed: Sealed { salt, nonce, ciphertext },
        })
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], CoreError> {
        let end = self.pos + N;
        let bytes: [u8; N] = self
            .data
            .get(self.pos..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| CoreError::InvalidFileFormat("Unexpected end of header".into()))?;
        self.pos = end;
        Ok(bytes)
    }
}
