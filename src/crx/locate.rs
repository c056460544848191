use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::CrxError;

pub const CRX_MAGIC: &[u8; 4] = b"Cr24";
pub const CRX_VERSION: u32 = 3;

/// Byte offset of the embedded ZIP payload within `path`.
///
/// Files without the `Cr24` magic are treated as bare ZIP archives and
/// yield offset 0. Any `Cr24`-prefixed file is read through its generic
/// `version + header_len` prefix, whatever the version claims; only
/// signing and verification insist on version 3. A `Cr24` prefix with
/// fewer than 12 bytes behind it is `TruncatedHeader`.
pub fn locate_zip_offset(path: &Path) -> Result<u64, CrxError> {
    let file = File::open(path)?;

    let mut prefix = Vec::with_capacity(12);
    file.take(12).read_to_end(&mut prefix)?;

    zip_offset(&prefix)
}

/// Same decision over an in-memory prefix (at least the first 12 bytes).
pub fn zip_offset(data: &[u8]) -> Result<u64, CrxError> {
    if data.len() < 4 || &data[..4] != CRX_MAGIC {
        return Ok(0);
    }
    if data.len() < 12 {
        return Err(CrxError::TruncatedHeader);
    }

    let header_len = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
    Ok(12 + u64::from(header_len))
}
