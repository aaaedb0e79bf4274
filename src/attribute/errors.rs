use thiserror::Error;

use crate::binary::BinaryError;

/// Attribute construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributeError {
    /// A field or payload exceeded the protocol bound for its container.
    #[error("value out of range: {0}")]
    OutOfRange(String),
    /// No defined wire representation exists for the requested input.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// The caller violated a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A width-checked read/write over the attribute's own bytes failed.
    #[error(transparent)]
    Binary(#[from] BinaryError),
}
