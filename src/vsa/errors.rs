use thiserror::Error;

use crate::attribute::AttributeError;
use crate::binary::BinaryError;

/// Vendor-Specific Attribute construction/parsing errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VsaError {
    /// A field or buffer length violated the dialect's wire contract.
    #[error("value out of range: {0}")]
    OutOfRange(String),
    /// A width-checked read/write over the sub-attribute buffer failed.
    #[error(transparent)]
    Binary(#[from] BinaryError),
    /// Wrapping the assembled sub-attribute in the outer Type-26 TLV failed.
    #[error(transparent)]
    Attribute(#[from] AttributeError),
}
