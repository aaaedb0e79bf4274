use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use num_traits::FromPrimitive;

/// The decoded, typed interpretation of an attribute's Value.
///
/// Decoding never mutates the attribute's underlying buffer; every variant
/// here either borrows nothing (copies out small fixed-width fields) or
/// owns freshly allocated data (`String`, `Vec<u8>`).
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// UTF-8 string.
    Text(String),
    /// Unsigned 32-bit big-endian integer.
    Integer(u32),
    /// Unsigned 64-bit big-endian integer.
    Integer64(u64),
    /// IPv4 or IPv6 address.
    Address(IpAddr),
    /// 32-bit Unix timestamp.
    Date(u32),
    /// Tagged tunnel value: 1 tag byte + 3-byte big-endian code.
    TaggedTunnel { tag: Option<u8>, code: u32 },
    /// RFC 8044 §3.9 IPv4 prefix.
    Ipv4Prefix { prefix_len: u8, addr: Ipv4Addr },
    /// RFC 3162 §2.3 / RFC 8044 §3.8 IPv6 prefix.
    Ipv6Prefix { prefix_len: u8, addr: Ipv6Addr },
    /// Opaque bytes (hex-dump fallback for unknown/opaque types).
    Octets(Vec<u8>),
}

impl AttributeValue {
    /// Casts an `Integer` value to a named enumeration, if it is one.
    /// Returns `None` for non-`Integer` variants or undefined enum values.
    pub fn as_enum<T: FromPrimitive>(&self) -> Option<T> {
        match self {
            AttributeValue::Integer(v) => T::from_u32(*v),
            _ => None,
        }
    }

    /// Renders any value as a hex dump, the universal fallback rendering for
    /// opaque or unrecognized attribute contents.
    pub fn to_hex(&self) -> String {
        let bytes: Vec<u8> = match self {
            AttributeValue::Octets(b) => b.clone(),
            AttributeValue::Text(s) => s.as_bytes().to_vec(),
            AttributeValue::Integer(v) => v.to_be_bytes().to_vec(),
            AttributeValue::Integer64(v) => v.to_be_bytes().to_vec(),
            AttributeValue::Date(v) => v.to_be_bytes().to_vec(),
            AttributeValue::Address(IpAddr::V4(v)) => v.octets().to_vec(),
            AttributeValue::Address(IpAddr::V6(v)) => v.octets().to_vec(),
            AttributeValue::TaggedTunnel { tag, code } => {
                let mut v = Vec::with_capacity(4);
                if let Some(tag) = tag {
                    v.push(*tag);
                }
                v.extend_from_slice(&code.to_be_bytes()[1..]);
                v
            }
            AttributeValue::Ipv4Prefix { addr, .. } => addr.octets().to_vec(),
            AttributeValue::Ipv6Prefix { addr, .. } => addr.octets().to_vec(),
        };

        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
