use std::io::Read;

use rsa::pkcs8::DecodePublicKey;
use rsa::sha2::{Digest, Sha256};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};

use super::error::CrxError;

/// Leading bytes of the signed data layout, trailing NUL included.
const SIGNED_DATA_PREFIX: &[u8; 16] = b"CRX3 SignedData\x00";

const HASH_CHUNK_SIZE: usize = 16 * 1024;

/// Computes the SHA-256 digest Chromium signs:
/// `"CRX3 SignedData\0" + u32_LE(len(shd)) + shd + archive`.
///
/// The archive is streamed through the hasher in fixed-size chunks so peak
/// memory stays bounded regardless of payload size.
pub fn signed_data_digest<R: Read>(
    signed_header_data: &[u8],
    mut archive: R,
) -> Result<[u8; 32], CrxError> {
    let mut hasher = Sha256::new();
    hasher.update(SIGNED_DATA_PREFIX);
    hasher.update((signed_header_data.len() as u32).to_le_bytes());
    hasher.update(signed_header_data);

    let mut chunk = [0u8; HASH_CHUNK_SIZE];
    loop {
        let n = archive.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
    }

    Ok(hasher.finalize().into())
}

/// Signs the streamed digest with RSA-2048 PKCS#1 v1.5 / SHA-256.
pub fn sign<R: Read>(
    private_key: &RsaPrivateKey,
    signed_header_data: &[u8],
    archive: R,
) -> Result<Vec<u8>, CrxError> {
    let digest = signed_data_digest(signed_header_data, archive)?;
    let signature = private_key.sign(Pkcs1v15Sign::new::<Sha256>(), &digest)?;
    Ok(signature)
}

/// Verifies one proof against a digest already computed by
/// [`signed_data_digest`].
///
/// Returns `false` for a bad signature or a key that does not parse;
/// a failed verification is an expected outcome, not an error.
pub fn verify_digest(public_key_der: &[u8], signature: &[u8], digest: &[u8; 32]) -> bool {
    let Ok(public_key) = RsaPublicKey::from_public_key_der(public_key_der) else {
        return false;
    };
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), digest, signature)
        .is_ok()
}

/// Streams the archive and verifies a single proof against it.
pub fn verify<R: Read>(
    public_key_der: &[u8],
    signature: &[u8],
    signed_header_data: &[u8],
    archive: R,
) -> Result<bool, CrxError> {
    let digest = signed_data_digest(signed_header_data, archive)?;
    Ok(verify_digest(public_key_der, signature, &digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs8::EncodePublicKey;
    use std::io::Cursor;

    fn test_key() -> RsaPrivateKey {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap()
    }

    #[test]
    fn test_digest_layout() {
        // Digest of the concatenated layout must equal the streamed digest.
        let shd = b"signed-header";
        let archive = b"archive-bytes";

        let mut concat = SIGNED_DATA_PREFIX.to_vec();
        concat.extend_from_slice(&(shd.len() as u32).to_le_bytes());
        concat.extend_from_slice(shd);
        concat.extend_from_slice(archive);
        let expected: [u8; 32] = Sha256::digest(&concat).into();

        let streamed = signed_data_digest(shd, Cursor::new(archive)).unwrap();
        assert_eq!(streamed, expected);
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let key = test_key();
        let der = key.to_public_key().to_public_key_der().unwrap();
        let shd = b"header";
        let archive = b"payload";

        let signature = sign(&key, shd, Cursor::new(archive)).unwrap();
        let ok = verify(der.as_bytes(), &signature, shd, Cursor::new(archive)).unwrap();
        assert!(ok);
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let key = test_key();
        let der = key.to_public_key().to_public_key_der().unwrap();
        let signature = sign(&key, b"header", Cursor::new(b"payload")).unwrap();

        let ok = verify(der.as_bytes(), &signature, b"header", Cursor::new(b"payloae")).unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_verify_bad_key_is_false_not_error() {
        let digest = [0u8; 32];
        assert!(!verify_digest(b"not a der key", b"sig", &digest));
    }
}
