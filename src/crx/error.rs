use thiserror::Error;

/// Errors surfaced by the CRX3 container engine.
///
/// A signature that fails to verify is *not* an error; `verify` reports
/// that as `Ok(false)`. These variants cover structural problems with the
/// container, key material, and I/O.
#[derive(Debug, Error)]
pub enum CrxError {
    #[error("not a CRX file (bad magic)")]
    NotACrxFile,

    #[error("unsupported CRX version: {0}")]
    UnsupportedVersion(u32),

    #[error("file ends before the CRX header is complete")]
    TruncatedHeader,

    #[error("protobuf message ends mid-field")]
    TruncatedMessage,

    #[error("varint ends before its terminating byte")]
    TruncatedVarint,

    #[error("varint exceeds 64 bits")]
    OversizedVarint,

    #[error("unsupported protobuf wire type: {0}")]
    UnsupportedWireType(u8),

    #[error("header contains no signature proofs")]
    MissingProofs,

    #[error("header contains no signed header data")]
    MissingSignedHeaderData,

    #[error("failed to load signing key: {0}")]
    KeyLoad(String),

    #[error("RSA signing failed: {0}")]
    Signing(#[from] rsa::Error),

    #[error("failed to encode public key: {0}")]
    Spki(#[from] rsa::pkcs8::spki::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
