use super::error::CrxError;
use super::varint::{read_varint, write_varint};

pub const WIRE_VARINT: u8 = 0;
pub const WIRE_FIXED64: u8 = 1;
pub const WIRE_LEN: u8 = 2;
pub const WIRE_FIXED32: u8 = 5;

/// An ordered map from field number to its raw length-delimited values.
///
/// Repeated fields keep their wire order; encoding walks field numbers in
/// insertion order. Only length-delimited values are stored because every
/// field the CRX3 header carries is bytes (keys, signatures, nested
/// messages).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldSet {
    entries: Vec<(u32, Vec<Vec<u8>>)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to `field`, keeping insertion order for new fields.
    pub fn push(&mut self, field: u32, value: Vec<u8>) {
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((field, vec![value])),
        }
    }

    /// First value recorded for `field`, if any.
    pub fn first(&self, field: u32) -> Option<&[u8]> {
        self.values(field).first().map(Vec::as_slice)
    }

    /// All values recorded for `field`, in wire order.
    pub fn values(&self, field: u32) -> &[Vec<u8>] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decodes a protobuf message into its length-delimited fields.
///
/// Wire types 0, 1 and 5 are consumed and discarded; they never appear in
/// CRX3 headers today but malformed or future inputs must not break the
/// decoder. Any other wire type is an error.
pub fn decode(buf: &[u8]) -> Result<FieldSet, CrxError> {
    let mut fields = FieldSet::new();
    let mut pos = 0;

    while pos < buf.len() {
        let (key, next) = read_varint(buf, pos)?;
        pos = next;

        let field = (key >> 3) as u32;
        let wire = (key & 0x07) as u8;

        match wire {
            WIRE_LEN => {
                let (len, next) = read_varint(buf, pos)?;
                pos = next;
                let len = usize::try_from(len).map_err(|_| CrxError::TruncatedMessage)?;
                let end = pos.checked_add(len).ok_or(CrxError::TruncatedMessage)?;
                let value = buf.get(pos..end).ok_or(CrxError::TruncatedMessage)?;
                fields.push(field, value.to_vec());
                pos = end;
            }
            WIRE_VARINT => {
                let (_, next) = read_varint(buf, pos)?;
                pos = next;
            }
            WIRE_FIXED64 => pos = skip(buf, pos, 8)?,
            WIRE_FIXED32 => pos = skip(buf, pos, 4)?,
            other => return Err(CrxError::UnsupportedWireType(other)),
        }
    }

    Ok(fields)
}

fn skip(buf: &[u8], pos: usize, width: usize) -> Result<usize, CrxError> {
    let end = pos.checked_add(width).ok_or(CrxError::TruncatedMessage)?;
    if end > buf.len() {
        return Err(CrxError::TruncatedMessage);
    }
    Ok(end)
}

/// Encodes every field as length-delimited, in insertion order.
pub fn encode(fields: &FieldSet) -> Vec<u8> {
    let mut out = Vec::new();

    for (field, values) in &fields.entries {
        for value in values {
            out.extend_from_slice(&write_varint(u64::from(*field) << 3 | u64::from(WIRE_LEN)));
            out.extend_from_slice(&write_varint(value.len() as u64));
            out.extend_from_slice(value);
        }
    }

    out
}
