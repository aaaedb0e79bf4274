use super::errors::AttributeError;
use crate::definitions::{RADIUS_MAX_ATTR_VALUE_LEN, RADIUS_MIN_ATTR_LEN};

/// A single RADIUS attribute: a Type-Length-Value triple.
///
/// `Attribute` owns its full wire serialization exclusively; `value()`
/// returns a view into that buffer rather than an independently owned
/// copy. Once constructed an attribute's serialization never changes —
/// there is no setter that could desynchronize `Length` from `Value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub(super) bytes: Vec<u8>,
}

impl Attribute {
    /// Wraps `value` into a TLV with the given Type, validating the 253-byte
    /// Value bound.
    pub(super) fn wrap_in_tlv(attr_type: u8, value: &[u8]) -> Result<Self, AttributeError> {
        if value.len() > RADIUS_MAX_ATTR_VALUE_LEN {
            return Err(AttributeError::OutOfRange(format!(
                "attribute value is {} bytes, maximum is {}",
                value.len(),
                RADIUS_MAX_ATTR_VALUE_LEN
            )));
        }

        let mut bytes = Vec::with_capacity(2 + value.len());
        bytes.push(attr_type);
        bytes.push((2 + value.len()) as u8);
        bytes.extend_from_slice(value);

        Ok(Self { bytes })
    }

    /// Reconstructs an `Attribute` from an already-serialized TLV, validating
    /// the `Length == 2 + |Value|` invariant.
    ///
    /// Used by the packet scanner when splitting a received datagram into
    /// its attribute list; `bytes` must be exactly one TLV, no more and no
    /// less.
    pub(crate) fn from_wire(bytes: &[u8]) -> Result<Self, AttributeError> {
        if bytes.len() < RADIUS_MIN_ATTR_LEN {
            return Err(AttributeError::OutOfRange(
                "attribute shorter than the 2-byte TLV header".into(),
            ));
        }

        let declared_len = bytes[1] as usize;
        if declared_len != bytes.len() || declared_len < RADIUS_MIN_ATTR_LEN {
            return Err(AttributeError::OutOfRange(format!(
                "declared attribute length {} does not match {} bytes provided",
                declared_len,
                bytes.len()
            )));
        }

        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// The attribute's Type code.
    pub fn attr_type(&self) -> u8 {
        self.bytes[0]
    }

    /// The attribute's declared Length byte (`2 + value().len()`).
    pub fn declared_len(&self) -> u8 {
        self.bytes[1]
    }

    /// The attribute's Value region, a view into the owned serialization.
    pub fn value(&self) -> &[u8] {
        &self.bytes[2..]
    }

    /// The full TLV wire serialization.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
