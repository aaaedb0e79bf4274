use crate::attribute::Attribute;
use crate::binary::write_u16;
use crate::definitions::{RADIUS_HEADER_SIZE, RADIUS_MAX_PACKET_LENGTH};
use crate::registry::PacketCode;

use super::errors::PacketError;
use super::packet::Packet;

impl Packet {
    /// Creates a fresh outbound packet: 20-byte header, Identifier random if
    /// omitted, declared Length = 20, Authenticator zeroed, no attributes
    /// (spec.md §4.4 "Create").
    pub fn create(code: PacketCode, identifier: Option<u8>) -> Self {
        let mut bytes = vec![0u8; RADIUS_HEADER_SIZE];
        bytes[0] = code as u8;
        bytes[1] = identifier.unwrap_or_else(|| {
            let mut id = [0u8; 1];
            crate::binary::secure_random(&mut id);
            id[0]
        });
        write_u16(&mut bytes, 2, RADIUS_HEADER_SIZE as u16).expect("header buffer is 20 bytes");

        Packet {
            bytes,
            attributes: Vec::new(),
            valid: true,
        }
    }

    /// Appends an attribute's serialized bytes, updating the declared
    /// Length field and the typed attribute list. Fails with `Overflow` if
    /// the new declared Length would exceed 4096 (spec.md §4.4 "Append").
    pub fn append(&mut self, attribute: Attribute) -> Result<(), PacketError> {
        let new_len = self.bytes.len() + attribute.as_bytes().len();
        if new_len > RADIUS_MAX_PACKET_LENGTH {
            return Err(PacketError::Overflow(format!(
                "appending would bring the packet to {} bytes, maximum is {}",
                new_len, RADIUS_MAX_PACKET_LENGTH
            )));
        }

        self.bytes.extend_from_slice(attribute.as_bytes());
        write_u16(&mut self.bytes, 2, new_len as u16)?;
        self.attributes.push(attribute);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_yields_20_byte_header_and_zeroed_authenticator() {
        let packet = Packet::create(PacketCode::AccessRequest, Some(7));
        assert_eq!(packet.code(), 1);
        assert_eq!(packet.identifier(), 7);
        assert_eq!(packet.declared_length(), 20);
        assert_eq!(packet.authenticator(), &[0u8; 16]);
        assert!(packet.is_valid());
    }

    #[test]
    fn append_updates_declared_length_and_attribute_list() {
        let mut packet = Packet::create(PacketCode::AccessRequest, Some(1));
        let attr = Attribute::from_string(crate::registry::attr_type::USER_NAME, "alice").unwrap();
        packet.append(attr).unwrap();
        assert_eq!(packet.declared_length(), 20 + 7);
        assert_eq!(packet.attributes().len(), 1);
        assert_eq!(packet.as_bytes().len(), 27);
    }

    #[test]
    fn append_at_exactly_4096_succeeds_over_fails() {
        let mut packet = Packet::create(PacketCode::AccessRequest, Some(1));
        let filler = vec![0u8; 251];
        for _ in 0..16 {
            packet
                .append(Attribute::from_bytes(26, &filler).unwrap())
                .unwrap();
        }
        assert_eq!(packet.declared_length() as usize, 20 + 16 * 253);

        let remaining = 4096 - packet.declared_length() as usize;
        let last = Attribute::from_bytes(26, &vec![0u8; remaining - 2]).unwrap();
        packet.append(last).unwrap();
        assert_eq!(packet.declared_length(), 4096);

        let overflow = Attribute::from_bytes(26, &[0u8]).unwrap();
        assert!(matches!(
            packet.append(overflow),
            Err(PacketError::Overflow(_))
        ));
    }
}
