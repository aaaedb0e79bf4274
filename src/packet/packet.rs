use num_traits::FromPrimitive;

use crate::attribute::Attribute;
use crate::binary::read_u16;
use crate::definitions::RADIUS_AUTHENTICATOR_SIZE;
use crate::registry::PacketCode;

use super::errors::PacketError;

/// A RADIUS packet: 20-byte header plus an ordered attribute list (spec.md
/// §3). `bytes` is the single source of truth for the wire serialization;
/// `attributes` is parallel metadata kept in sync with it by every mutating
/// operation (append, `set_message_authenticator`, `set_authenticator`).
#[derive(Debug, Clone)]
pub struct Packet {
    pub(super) bytes: Vec<u8>,
    pub(super) attributes: Vec<Attribute>,
    pub(super) valid: bool,
}

impl Packet {
    /// The packet's Code byte.
    pub fn code(&self) -> u8 {
        self.bytes[0]
    }

    /// The packet's Code, resolved to a named variant if recognized.
    pub fn code_enum(&self) -> Option<PacketCode> {
        PacketCode::from_u8(self.code())
    }

    /// Human-readable Code name, falling back to the raw numeric value for
    /// Codes outside the registry (SPEC_FULL.md §11).
    pub fn code_name(&self) -> String {
        match self.code_enum() {
            Some(code) => code.name().to_string(),
            None => format!("Unknown({})", self.code()),
        }
    }

    /// The packet's Identifier byte.
    pub fn identifier(&self) -> u8 {
        self.bytes[1]
    }

    /// The packet's declared Length field.
    pub fn declared_length(&self) -> u16 {
        read_u16(&self.bytes, 2).expect("header buffer is at least 20 bytes")
    }

    /// The packet's 16-byte Authenticator field.
    pub fn authenticator(&self) -> &[u8] {
        &self.bytes[4..4 + RADIUS_AUTHENTICATOR_SIZE]
    }

    /// Whether this packet passed structural validation. Inbound packets
    /// that fail `parse` carry `valid == false`; no field should be trusted
    /// by callers in that case.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The packet's attributes, in insertion/wire order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The packet's full wire serialization (header + attribute region).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Rebuilds `attributes` from `bytes[20..declared_length]`. Called
    /// after any direct patch of `bytes` (Authenticator or
    /// Message-Authenticator recomputation) to keep the typed attribute
    /// list synchronized with the serialized region, per spec.md §3
    /// ownership invariants.
    pub(super) fn resync_attributes(&mut self) -> Result<(), PacketError> {
        let declared = self.declared_length() as usize;
        let end = declared.min(self.bytes.len());
        let region = &self.bytes[crate::definitions::RADIUS_HEADER_SIZE..end];

        let mut attrs = Vec::new();
        let mut pos = 0;
        while pos < region.len() {
            let len = region[pos + 1] as usize;
            attrs.push(Attribute::from_wire(&region[pos..pos + len])?);
            pos += len;
        }

        self.attributes = attrs;
        Ok(())
    }
}
