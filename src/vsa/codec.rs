use crate::attribute::Attribute;
use crate::definitions::{ATTR_TYPE_VENDOR_SPECIFIC, RADIUS_MAX_ATTR_VALUE_LEN};

use super::dialect::Dialect;
use super::errors::VsaError;

const VENDOR_ID_LEN: usize = 4;

/// A decoded Vendor-Specific sub-attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSubAttribute {
    pub vendor_id: u32,
    pub sub_type: u32,
    pub continuation: Option<u8>,
    pub data: Vec<u8>,
}

fn write_be(width: usize, value: u32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    bytes[4 - width..].to_vec()
}

fn read_be(buf: &[u8]) -> u32 {
    let mut padded = [0u8; 4];
    padded[4 - buf.len()..].copy_from_slice(buf);
    u32::from_be_bytes(padded)
}

/// Builds a Type-26 attribute wrapping a vendor sub-attribute in the given
/// dialect. Fails with `OutOfRange` if `sub_type` does not fit in the
/// dialect's Type-field width, or if `data` would make the outer TLV's
/// Value exceed 253 bytes.
pub fn encode(
    vendor_id: u32,
    dialect: Dialect,
    sub_type: u32,
    continuation: Option<u8>,
    data: &[u8],
) -> Result<Attribute, VsaError> {
    let type_bytes = dialect.type_bytes();
    if type_bytes < 4 && sub_type >= (1u64 << (type_bytes * 8)) as u32 {
        return Err(VsaError::OutOfRange(format!(
            "sub-type {} does not fit in {} bytes",
            sub_type, type_bytes
        )));
    }

    let sub_header_len = dialect.sub_header_len();
    let max_data = RADIUS_MAX_ATTR_VALUE_LEN
        .saturating_sub(VENDOR_ID_LEN)
        .saturating_sub(sub_header_len);
    if data.len() > max_data {
        return Err(VsaError::OutOfRange(format!(
            "vendor sub-attribute data is {} bytes, maximum for this dialect is {}",
            data.len(),
            max_data
        )));
    }

    let mut sub = Vec::with_capacity(sub_header_len + data.len());
    sub.extend_from_slice(&write_be(type_bytes, sub_type));

    if dialect.length_bytes() > 0 {
        let declared = (sub_header_len + data.len()) as u32;
        sub.extend_from_slice(&write_be(dialect.length_bytes(), declared));
    }

    if dialect.has_continuation() {
        sub.push(continuation.unwrap_or(0));
    }

    sub.extend_from_slice(data);

    let mut value = Vec::with_capacity(VENDOR_ID_LEN + sub.len());
    value.extend_from_slice(&vendor_id.to_be_bytes());
    value.extend_from_slice(&sub);

    Attribute::from_bytes(ATTR_TYPE_VENDOR_SPECIFIC, &value).map_err(VsaError::from)
}

/// Parses a Type-26 attribute's Value as a vendor sub-attribute in the given
/// dialect. Fails with `OutOfRange` when the outer buffer is too short for
/// the dialect's sub-header, or when a present Length field disagrees with
/// the outer Length.
pub fn parse(attr: &Attribute, dialect: Dialect) -> Result<VendorSubAttribute, VsaError> {
    let value = attr.value();

    if value.len() < VENDOR_ID_LEN + dialect.sub_header_len() {
        return Err(VsaError::OutOfRange(format!(
            "vendor-specific value is {} bytes, need at least {} for VendorId + {:?} sub-header",
            value.len(),
            VENDOR_ID_LEN + dialect.sub_header_len(),
            dialect
        )));
    }

    let vendor_id = u32::from_be_bytes(value[..VENDOR_ID_LEN].try_into().unwrap());
    let sub = &value[VENDOR_ID_LEN..];

    let type_bytes = dialect.type_bytes();
    let sub_type = read_be(&sub[..type_bytes]);

    let mut offset = type_bytes;
    if dialect.length_bytes() > 0 {
        let declared = read_be(&sub[offset..offset + dialect.length_bytes()]) as usize;
        if declared != sub.len() {
            return Err(VsaError::OutOfRange(format!(
                "sub-attribute declares length {} but {} bytes are present",
                declared,
                sub.len()
            )));
        }
        offset += dialect.length_bytes();
    }

    let continuation = if dialect.has_continuation() {
        let byte = sub[offset];
        offset += 1;
        Some(byte)
    } else {
        None
    };

    Ok(VendorSubAttribute {
        vendor_id,
        sub_type,
        continuation,
        data: sub[offset..].to_vec(),
    })
}
