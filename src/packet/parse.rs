use crate::attribute::Attribute;
use crate::binary::read_u16;
use crate::definitions::{
    RADIUS_HEADER_SIZE, RADIUS_MAX_PACKET_LENGTH, RADIUS_MIN_ATTR_LEN, RADIUS_MIN_PACKET_LENGTH,
};

use super::errors::PacketError;
use super::packet::Packet;

impl Packet {
    /// Parses a received datagram into a `Packet`, running structural
    /// validation once (spec.md §4.4 "Parse"). Never throws: a malformed
    /// buffer yields a packet with `is_valid() == false` and an empty
    /// attribute list, per spec.md §7.
    pub fn parse(bytes: &[u8]) -> Self {
        match Self::try_parse(bytes) {
            Ok(packet) => packet,
            Err(_) => Packet {
                bytes: bytes.to_vec(),
                attributes: Vec::new(),
                valid: false,
            },
        }
    }

    fn try_parse(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < RADIUS_HEADER_SIZE {
            return Err(PacketError::OutOfRange(
                "buffer shorter than the 20-byte header".into(),
            ));
        }

        let declared = read_u16(bytes, 2)? as usize;
        if declared < RADIUS_MIN_PACKET_LENGTH
            || declared > RADIUS_MAX_PACKET_LENGTH
            || declared > bytes.len()
        {
            return Err(PacketError::OutOfRange(format!(
                "declared length {} is outside [{}, {}] or exceeds the {}-byte buffer",
                declared,
                RADIUS_MIN_PACKET_LENGTH,
                RADIUS_MAX_PACKET_LENGTH,
                bytes.len()
            )));
        }

        let mut attributes = Vec::new();
        let mut pos = RADIUS_HEADER_SIZE;
        while pos < declared {
            if pos + RADIUS_MIN_ATTR_LEN > declared {
                return Err(PacketError::OutOfRange(
                    "truncated attribute at end of declared region".into(),
                ));
            }
            let len = bytes[pos + 1] as usize;
            if len < RADIUS_MIN_ATTR_LEN || pos + len > declared {
                return Err(PacketError::OutOfRange(format!(
                    "attribute length {} at offset {} overruns the declared region",
                    len, pos
                )));
            }
            attributes.push(Attribute::from_wire(&bytes[pos..pos + len])?);
            pos += len;
        }

        if pos != declared {
            return Err(PacketError::OutOfRange(
                "attribute region does not exactly fill the declared length".into(),
            ));
        }

        Ok(Packet {
            bytes: bytes[..declared].to_vec(),
            attributes,
            valid: true,
        })
    }

    /// Non-allocating scan for the first attribute of `attr_type`, using the
    /// buffer's own declared Length rather than `bytes.len()` (tolerates
    /// trailing padding from recv-style APIs). Returns the raw TLV slice.
    pub fn find_attribute(bytes: &[u8], attr_type: u8) -> Option<&[u8]> {
        scan(bytes).find(|tlv| tlv[0] == attr_type)
    }

    /// Non-allocating scan collecting every attribute of `attr_type`, in
    /// wire order.
    pub fn find_all_attributes(bytes: &[u8], attr_type: u8) -> Vec<&[u8]> {
        scan(bytes).filter(|tlv| tlv[0] == attr_type).collect()
    }

    /// Scans for the first attribute of `attr_type` and reinterprets its
    /// Value as a big-endian `u32`, if the Value is exactly 4 bytes.
    pub fn try_read_uint32(bytes: &[u8], attr_type: u8) -> Option<u32> {
        let tlv = Self::find_attribute(bytes, attr_type)?;
        let value = &tlv[2..];
        if value.len() != 4 {
            return None;
        }
        Some(u32::from_be_bytes(value.try_into().unwrap()))
    }
}

/// Iterates TLVs in `bytes[20..declared_length]` without allocating, honoring
/// the declared Length at offset 2-3 rather than `bytes.len()`.
fn scan(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let declared = if bytes.len() >= RADIUS_HEADER_SIZE {
        (read_u16(bytes, 2).unwrap_or(0) as usize).min(bytes.len())
    } else {
        0
    };

    let region = if bytes.len() >= RADIUS_HEADER_SIZE && declared >= RADIUS_HEADER_SIZE {
        &bytes[RADIUS_HEADER_SIZE..declared]
    } else {
        &[]
    };

    let mut pos = 0usize;
    std::iter::from_fn(move || {
        if pos + RADIUS_MIN_ATTR_LEN > region.len() {
            return None;
        }
        let len = region[pos + 1] as usize;
        if len < RADIUS_MIN_ATTR_LEN || pos + len > region.len() {
            return None;
        }
        let tlv = &region[pos..pos + len];
        pos += len;
        Some(tlv)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{attr_type, PacketCode};

    #[test]
    fn parse_round_trips_a_well_formed_packet() {
        let mut built = Packet::create(PacketCode::AccountingRequest, Some(9));
        built
            .append(Attribute::from_string(attr_type::USER_NAME, "bob").unwrap())
            .unwrap();

        let parsed = Packet::parse(built.as_bytes());
        assert!(parsed.is_valid());
        assert_eq!(parsed.code(), 4);
        assert_eq!(parsed.identifier(), 9);
        assert_eq!(parsed.attributes().len(), 1);
    }

    #[test]
    fn parse_marks_short_buffer_invalid() {
        let parsed = Packet::parse(&[1, 2, 3]);
        assert!(!parsed.is_valid());
        assert!(parsed.attributes().is_empty());
    }

    #[test]
    fn parse_marks_declared_length_mismatch_invalid() {
        let mut bytes = vec![0u8; 20];
        bytes[0] = 1;
        crate::binary::write_u16(&mut bytes, 2, 19).unwrap();
        let parsed = Packet::parse(&bytes);
        assert!(!parsed.is_valid());
    }

    #[test]
    fn parse_tolerates_trailing_padding_past_declared_length() {
        let mut built = Packet::create(PacketCode::AccessRequest, Some(1));
        built
            .append(Attribute::from_string(attr_type::USER_NAME, "x").unwrap())
            .unwrap();

        let mut padded = built.as_bytes().to_vec();
        padded.extend_from_slice(&[0xAA; 10]);

        let parsed = Packet::parse(&padded);
        assert!(parsed.is_valid());
        assert_eq!(parsed.declared_length() as usize, built.as_bytes().len());
    }

    #[test]
    fn find_attribute_scans_raw_buffer_by_declared_length() {
        let mut built = Packet::create(PacketCode::AccessRequest, Some(1));
        built
            .append(Attribute::from_string(attr_type::USER_NAME, "carol").unwrap())
            .unwrap();
        built
            .append(Attribute::from_u32(attr_type::NAS_PORT, 42).unwrap())
            .unwrap();

        let found = Packet::find_attribute(built.as_bytes(), attr_type::USER_NAME).unwrap();
        assert_eq!(&found[2..], b"carol");

        let port = Packet::try_read_uint32(built.as_bytes(), attr_type::NAS_PORT).unwrap();
        assert_eq!(port, 42);

        assert!(Packet::find_attribute(built.as_bytes(), 200).is_none());
    }
}
