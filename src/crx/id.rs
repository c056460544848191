use rsa::sha2::{Digest, Sha256};

/// Raw 16-byte crx_id: the truncated SHA-256 of a DER-encoded public key.
pub fn raw_id(public_key_der: &[u8]) -> [u8; 16] {
    let digest = Sha256::digest(public_key_der);
    let mut id = [0u8; 16];
    id.copy_from_slice(&digest[..16]);
    id
}

/// Derives the 32-character extension ID from a DER-encoded public key.
///
/// Chromium hex-encodes the truncated hash and then shifts every hex digit
/// into the `a`-`p` alphabet, so IDs never look like ordinary hex.
pub fn derive(public_key_der: &[u8]) -> String {
    transliterate(&hex::encode(raw_id(public_key_der)))
}

/// Maps lowercase hex digits onto `a`-`p`, byte for byte.
pub fn transliterate(hex_id: &str) -> String {
    hex_id
        .chars()
        .map(|c| {
            let digit = c.to_digit(16).unwrap_or(0) as u8;
            (b'a' + digit) as char
        })
        .collect()
}
