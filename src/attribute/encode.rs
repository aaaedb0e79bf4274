use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::SystemTime;

use super::attribute::Attribute;
use super::errors::AttributeError;

impl Attribute {
    /// Builds an opaque-bytes attribute. Fails with `OutOfRange` if `payload`
    /// exceeds 253 bytes. The payload is copied; the caller's buffer is not
    /// retained.
    pub fn from_bytes(attr_type: u8, payload: &[u8]) -> Result<Self, AttributeError> {
        Self::wrap_in_tlv(attr_type, payload)
    }

    /// Builds an attribute from a signed 32-bit integer, encoded as 4
    /// big-endian bytes.
    pub fn from_i32(attr_type: u8, value: i32) -> Result<Self, AttributeError> {
        Self::wrap_in_tlv(attr_type, &(value as u32).to_be_bytes())
    }

    /// Builds an attribute from an unsigned 32-bit integer, encoded as 4
    /// big-endian bytes.
    pub fn from_u32(attr_type: u8, value: u32) -> Result<Self, AttributeError> {
        Self::wrap_in_tlv(attr_type, &value.to_be_bytes())
    }

    /// Builds an attribute from a signed 64-bit integer, encoded as 8
    /// big-endian bytes.
    pub fn from_i64(attr_type: u8, value: i64) -> Result<Self, AttributeError> {
        Self::wrap_in_tlv(attr_type, &(value as u64).to_be_bytes())
    }

    /// Builds an attribute from a UTF-8 string. Fails with `OutOfRange` if
    /// the encoded byte length exceeds 253 bytes.
    pub fn from_string(attr_type: u8, value: &str) -> Result<Self, AttributeError> {
        Self::wrap_in_tlv(attr_type, value.as_bytes())
    }

    /// Builds an attribute from a timestamp, converted to seconds-since-Unix-
    /// epoch. Fails with `OutOfRange` if the value does not fit in `u32`
    /// (before 1970-01-01 UTC or after 2106-02-07 06:28:15 UTC).
    pub fn from_timestamp(attr_type: u8, value: SystemTime) -> Result<Self, AttributeError> {
        let secs = value
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| {
                AttributeError::OutOfRange("timestamp is before the Unix epoch".into())
            })?
            .as_secs();

        let secs_u32 = u32::try_from(secs).map_err(|_| {
            AttributeError::OutOfRange(
                "timestamp does not fit in a 32-bit Unix timestamp".into(),
            )
        })?;

        Self::wrap_in_tlv(attr_type, &secs_u32.to_be_bytes())
    }

    /// Builds an address attribute: 4 bytes for IPv4, 16 bytes for IPv6.
    pub fn from_ip(attr_type: u8, addr: IpAddr) -> Result<Self, AttributeError> {
        match addr {
            IpAddr::V4(v4) => Self::wrap_in_tlv(attr_type, &v4.octets()),
            IpAddr::V6(v6) => Self::wrap_in_tlv(attr_type, &v6.octets()),
        }
    }

    /// Builds an IPv4 prefix attribute (RFC 8044 §3.9): `{reserved(1)=0,
    /// prefix_len(1), masked address(4)}`. Host bits below `prefix_len` are
    /// zeroed before encoding.
    pub fn ipv4_prefix(
        attr_type: u8,
        addr: Ipv4Addr,
        prefix_len: u8,
    ) -> Result<Self, AttributeError> {
        if prefix_len > 32 {
            return Err(AttributeError::OutOfRange(format!(
                "IPv4 prefix length {} exceeds 32",
                prefix_len
            )));
        }

        let mask: u32 = if prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - prefix_len)
        };
        let masked = u32::from(addr) & mask;

        let mut value = Vec::with_capacity(6);
        value.push(0);
        value.push(prefix_len);
        value.extend_from_slice(&masked.to_be_bytes());

        Self::wrap_in_tlv(attr_type, &value)
    }

    /// Builds an IPv6 prefix attribute (RFC 3162 §2.3 / RFC 8044 §3.8):
    /// `{reserved(1)=0, prefix_len(1), ceil(prefix_len/8) masked address
    /// bytes}`. Host bits strictly beyond `prefix_len` are zeroed.
    pub fn ipv6_prefix(
        attr_type: u8,
        addr: Ipv6Addr,
        prefix_len: u8,
    ) -> Result<Self, AttributeError> {
        if prefix_len > 128 {
            return Err(AttributeError::OutOfRange(format!(
                "IPv6 prefix length {} exceeds 128",
                prefix_len
            )));
        }

        let octets = addr.octets();
        let kept_bytes = (prefix_len as usize).div_ceil(8);
        let mut masked = [0u8; 16];
        masked[..kept_bytes].copy_from_slice(&octets[..kept_bytes]);

        // Zero the bits within the last kept byte that lie beyond prefix_len.
        if prefix_len % 8 != 0 && kept_bytes > 0 {
            let remaining_bits = prefix_len % 8;
            let keep_mask: u8 = 0xFFu8 << (8 - remaining_bits);
            masked[kept_bytes - 1] &= keep_mask;
        }

        let mut value = Vec::with_capacity(2 + kept_bytes);
        value.push(0);
        value.push(prefix_len);
        value.extend_from_slice(&masked[..kept_bytes]);

        Self::wrap_in_tlv(attr_type, &value)
    }

    /// Builds a tagged tunnel attribute (RFC 2868 §3.1-3.2): `Tag(1) ‖
    /// Code(3, big-endian)`.
    pub fn tagged_tunnel(attr_type: u8, tag: u8, code: u32) -> Result<Self, AttributeError> {
        if code > 0xFF_FFFF {
            return Err(AttributeError::OutOfRange(format!(
                "tunnel code {} does not fit in 24 bits",
                code
            )));
        }

        let mut value = Vec::with_capacity(4);
        value.push(tag);
        value.extend_from_slice(&code.to_be_bytes()[1..]);

        Self::wrap_in_tlv(attr_type, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_bytes_at_limit_succeeds_over_limit_fails() {
        let ok = Attribute::from_bytes(1, &vec![0u8; 253]);
        assert!(ok.is_ok());
        assert_eq!(ok.unwrap().declared_len(), 255);

        let err = Attribute::from_bytes(1, &vec![0u8; 254]);
        assert!(matches!(err, Err(AttributeError::OutOfRange(_))));
    }

    #[test]
    fn ipv4_prefix_boundaries() {
        let addr = Ipv4Addr::new(192, 168, 1, 1);

        let zero = Attribute::ipv4_prefix(169, addr, 0).unwrap();
        assert_eq!(&zero.value()[2..6], &[0, 0, 0, 0]);

        let full = Attribute::ipv4_prefix(169, addr, 32).unwrap();
        assert_eq!(&full.value()[2..6], &addr.octets());

        assert!(Attribute::ipv4_prefix(169, addr, 33).is_err());
    }

    #[test]
    fn timestamp_out_of_range() {
        let too_early = SystemTime::UNIX_EPOCH - std::time::Duration::from_secs(1);
        assert!(Attribute::from_timestamp(55, too_early).is_err());

        let too_late = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(u32::MAX as u64 + 1);
        assert!(Attribute::from_timestamp(55, too_late).is_err());

        let ok = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        assert!(Attribute::from_timestamp(55, ok).is_ok());
    }
}
