use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::error::CrxError;
use super::header::{self, CrxFileHeader};
use super::locate::{CRX_MAGIC, CRX_VERSION};
use super::{id, sign};

/// A parsed CRX3 container, header decoded and payload located.
#[derive(Debug)]
pub struct CrxContainer {
    pub version: u32,
    pub header: CrxFileHeader,
    pub payload_offset: u64,
}

/// Reads magic, version and header from `file`, leaving it positioned at
/// the first payload byte.
pub fn read_container(file: &mut File) -> Result<CrxContainer, CrxError> {
    let mut prefix = [0u8; 12];
    read_exact_or_truncated(file, &mut prefix)?;

    if &prefix[..4] != CRX_MAGIC {
        return Err(CrxError::NotACrxFile);
    }

    let version = u32::from_le_bytes([prefix[4], prefix[5], prefix[6], prefix[7]]);
    if version != CRX_VERSION {
        return Err(CrxError::UnsupportedVersion(version));
    }

    let header_len = u32::from_le_bytes([prefix[8], prefix[9], prefix[10], prefix[11]]);

    // Sized by what the file actually holds, not by the claimed length.
    let mut header_bytes = Vec::new();
    file.by_ref()
        .take(u64::from(header_len))
        .read_to_end(&mut header_bytes)?;
    if header_bytes.len() != header_len as usize {
        return Err(CrxError::TruncatedHeader);
    }

    let header = header::parse_header(&header_bytes)?;

    Ok(CrxContainer {
        version,
        header,
        payload_offset: 12 + u64::from(header_len),
    })
}

/// Verifies the signature of the CRX3 file at `path`.
///
/// `Ok(true)` as soon as any embedded proof verifies against the streamed
/// payload digest, `Ok(false)` when every proof fails. Structural problems
/// (bad magic, wrong version, malformed header) are errors.
pub fn verify(path: &Path) -> Result<bool, CrxError> {
    let mut file = File::open(path)?;
    let container = read_container(&mut file)?;

    let digest = sign::signed_data_digest(&container.header.signed_header_data, &mut file)?;

    for proof in &container.header.proofs {
        if sign::verify_digest(&proof.public_key, &proof.signature, &digest) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Extension ID of the CRX3 file at `path`, derived from the public key
/// of its first proof.
pub fn get_extension_id(path: &Path) -> Result<String, CrxError> {
    let mut file = File::open(path)?;
    let container = read_container(&mut file)?;

    // parse_header guarantees at least one complete proof.
    let proof = container
        .header
        .proofs
        .first()
        .ok_or(CrxError::MissingProofs)?;

    Ok(id::derive(&proof.public_key))
}

fn read_exact_or_truncated(file: &mut File, buf: &mut [u8]) -> Result<(), CrxError> {
    file.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            CrxError::TruncatedHeader
        } else {
            CrxError::Io(e)
        }
    })
}
