use super::error::CrxError;
use super::proto::{self, FieldSet};

/// CRX3 protobuf field numbers.
pub const FIELD_RSA_PROOF: u32 = 10000;
pub const FIELD_SIGNED_HEADER_DATA: u32 = 10001;
pub const FIELD_PROOF_PUBLIC_KEY: u32 = 1;
pub const FIELD_PROOF_SIGNATURE: u32 = 2;
pub const FIELD_CRX_ID: u32 = 1;

/// A `(public key, signature)` pair from the header.
///
/// The public key is DER-encoded SubjectPublicKeyInfo; the signature is
/// PKCS#1 v1.5 over the SHA-256 of the signed data layout.
#[derive(Debug, Clone)]
pub struct AsymmetricKeyProof {
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Parsed CRX3 header: at least one proof plus the serialized `SignedData`.
#[derive(Debug, Clone)]
pub struct CrxFileHeader {
    pub proofs: Vec<AsymmetricKeyProof>,
    pub signed_header_data: Vec<u8>,
}

/// Parses raw header bytes into a `CrxFileHeader`.
///
/// Field #10000 must carry at least one complete proof and field #10001
/// must be present (first value wins if repeated). A proof missing its
/// key or signature is skipped as long as another usable proof remains.
pub fn parse_header(bytes: &[u8]) -> Result<CrxFileHeader, CrxError> {
    let fields = proto::decode(bytes)?;

    let signed_header_data = fields
        .first(FIELD_SIGNED_HEADER_DATA)
        .ok_or(CrxError::MissingSignedHeaderData)?
        .to_vec();

    let raw_proofs = fields.values(FIELD_RSA_PROOF);
    if raw_proofs.is_empty() {
        return Err(CrxError::MissingProofs);
    }

    let mut proofs = Vec::with_capacity(raw_proofs.len());
    for raw in raw_proofs {
        let proof_fields = proto::decode(raw)?;
        let (Some(public_key), Some(signature)) = (
            proof_fields.first(FIELD_PROOF_PUBLIC_KEY),
            proof_fields.first(FIELD_PROOF_SIGNATURE),
        ) else {
            continue;
        };
        proofs.push(AsymmetricKeyProof {
            public_key: public_key.to_vec(),
            signature: signature.to_vec(),
        });
    }

    if proofs.is_empty() {
        return Err(CrxError::MissingProofs);
    }

    Ok(CrxFileHeader {
        proofs,
        signed_header_data,
    })
}

/// Serializes a `CrxFileHeader` from already-encoded proofs.
pub fn build_header(encoded_proofs: &[Vec<u8>], signed_header_data: &[u8]) -> Vec<u8> {
    let mut fields = FieldSet::new();
    for proof in encoded_proofs {
        fields.push(FIELD_RSA_PROOF, proof.clone());
    }
    fields.push(FIELD_SIGNED_HEADER_DATA, signed_header_data.to_vec());
    proto::encode(&fields)
}

/// Serializes one `AsymmetricKeyProof`.
pub fn encode_proof(public_key_der: &[u8], signature: &[u8]) -> Vec<u8> {
    let mut fields = FieldSet::new();
    fields.push(FIELD_PROOF_PUBLIC_KEY, public_key_der.to_vec());
    fields.push(FIELD_PROOF_SIGNATURE, signature.to_vec());
    proto::encode(&fields)
}

/// Serializes the `SignedData` message around a raw 16-byte crx_id.
pub fn encode_signed_data(crx_id: &[u8]) -> Vec<u8> {
    let mut fields = FieldSet::new();
    fields.push(FIELD_CRX_ID, crx_id.to_vec());
    proto::encode(&fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let proof = encode_proof(b"public-key-der", b"signature-bytes");
        let signed_data = encode_signed_data(&[0xab; 16]);
        let header_bytes = build_header(&[proof], &signed_data);

        let header = parse_header(&header_bytes).unwrap();
        assert_eq!(header.proofs.len(), 1);
        assert_eq!(header.proofs[0].public_key, b"public-key-der");
        assert_eq!(header.proofs[0].signature, b"signature-bytes");
        assert_eq!(header.signed_header_data, signed_data);
    }

    #[test]
    fn test_missing_proofs() {
        let header_bytes = {
            let mut fields = FieldSet::new();
            fields.push(FIELD_SIGNED_HEADER_DATA, b"data".to_vec());
            proto::encode(&fields)
        };
        let result = parse_header(&header_bytes);
        assert!(matches!(result, Err(CrxError::MissingProofs)));
    }

    #[test]
    fn test_missing_signed_header_data() {
        let proof = encode_proof(b"key", b"sig");
        let header_bytes = {
            let mut fields = FieldSet::new();
            fields.push(FIELD_RSA_PROOF, proof);
            proto::encode(&fields)
        };
        let result = parse_header(&header_bytes);
        assert!(matches!(result, Err(CrxError::MissingSignedHeaderData)));
    }

    #[test]
    fn test_incomplete_proof_skipped() {
        let incomplete = {
            let mut fields = FieldSet::new();
            fields.push(FIELD_PROOF_PUBLIC_KEY, b"key-only".to_vec());
            proto::encode(&fields)
        };
        let complete = encode_proof(b"key", b"sig");
        let header_bytes = build_header(&[incomplete, complete], b"data");

        let header = parse_header(&header_bytes).unwrap();
        assert_eq!(header.proofs.len(), 1);
        assert_eq!(header.proofs[0].public_key, b"key");
    }

    #[test]
    fn test_all_proofs_incomplete() {
        let incomplete = {
            let mut fields = FieldSet::new();
            fields.push(FIELD_PROOF_SIGNATURE, b"sig-only".to_vec());
            proto::encode(&fields)
        };
        let header_bytes = build_header(&[incomplete], b"data");
        let result = parse_header(&header_bytes);
        assert!(matches!(result, Err(CrxError::MissingProofs)));
    }

    #[test]
    fn test_repeated_signed_header_data_first_wins() {
        let proof = encode_proof(b"key", b"sig");
        let mut fields = FieldSet::new();
        fields.push(FIELD_RSA_PROOF, proof);
        fields.push(FIELD_SIGNED_HEADER_DATA, b"first".to_vec());
        fields.push(FIELD_SIGNED_HEADER_DATA, b"second".to_vec());

        let header = parse_header(&proto::encode(&fields)).unwrap();
        assert_eq!(header.signed_header_data, b"first");
    }

    #[test]
    fn test_garbage_header_is_an_error() {
        let result = parse_header(&[0xff, 0xff, 0xff]);
        assert!(result.is_err());
    }
}
