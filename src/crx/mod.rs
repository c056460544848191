//! CRX3 container engine.
//!
//! A CRX3 file is a small binary header wrapping a ZIP archive:
//! `"Cr24" + u32_LE(version) + u32_LE(header_len) + header + zip`. The
//! header is a Protocol-Buffers message carrying one or more
//! `(public key, signature)` proofs and the serialized `SignedData`
//! message with the extension's raw 16-byte ID. This module reads,
//! verifies and produces that format byte-for-byte the way Chromium does.

pub mod error;
pub mod header;
pub mod id;
pub mod keys;
pub mod locate;
pub mod pack;
pub mod proto;
pub mod sign;
pub mod varint;
pub mod verify;

pub use error::CrxError;
pub use locate::locate_zip_offset;
pub use pack::{pack, pack_with_key};
pub use verify::{get_extension_id, read_container, verify, CrxContainer};
