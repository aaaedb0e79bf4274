//! Wire-format constants.

/// Size in bytes of the fixed RADIUS packet header (Code + Identifier + Length + Authenticator).
pub const RADIUS_HEADER_SIZE: usize = 20;
/// Size in bytes of the Authenticator field.
pub const RADIUS_AUTHENTICATOR_SIZE: usize = 16;
/// Minimum legal value of a packet's declared Length field.
pub const RADIUS_MIN_PACKET_LENGTH: usize = RADIUS_HEADER_SIZE;
/// Maximum legal value of a packet's declared Length field.
pub const RADIUS_MAX_PACKET_LENGTH: usize = 4096;
/// Maximum size of an attribute's Value field (255 - 2 byte TLV header).
pub const RADIUS_MAX_ATTR_VALUE_LEN: usize = 253;
/// Minimum size of a complete attribute TLV.
pub const RADIUS_MIN_ATTR_LEN: usize = 2;

/// Attribute Type carrying the Message-Authenticator (RFC 3579).
pub const ATTR_TYPE_MESSAGE_AUTHENTICATOR: u8 = 80;
/// Total TLV length of a Message-Authenticator attribute (2-byte header + 16-byte HMAC).
pub const MESSAGE_AUTHENTICATOR_ATTR_LEN: usize = 18;

/// Attribute Type of the Vendor-Specific Attribute container (RFC 2865 §5.26).
pub const ATTR_TYPE_VENDOR_SPECIFIC: u8 = 26;

/// Default UDP port for authentication/authorization (RFC 2865 §0).
pub const DEFAULT_AUTH_PORT: u16 = 1812;
/// Default UDP port for accounting (RFC 2866 §0).
pub const DEFAULT_ACCT_PORT: u16 = 1813;
