use thiserror::Error;

use crate::attribute::AttributeError;
use crate::binary::BinaryError;

/// Packet construction, signing, and obfuscation errors (spec.md §4.4, §7).
///
/// Structural parse failures are deliberately absent from this enum: per
/// spec.md §7, `Parse` never throws. A malformed inbound buffer instead
/// yields a `Packet` with `is_valid() == false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PacketError {
    /// The caller violated a precondition (missing request authenticator,
    /// empty password, non-ASCII secret).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A field or payload exceeded the protocol bound for its container.
    #[error("value out of range: {0}")]
    OutOfRange(String),
    /// No Authenticator strategy is defined for this packet Code.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// Appending an attribute would push the declared Length past 4096.
    #[error("packet overflow: {0}")]
    Overflow(String),
    /// A width-checked read/write over the packet buffer failed.
    #[error(transparent)]
    Binary(#[from] BinaryError),
    /// Building or wrapping an attribute TLV failed.
    #[error(transparent)]
    Attribute(#[from] AttributeError),
}
