use thiserror::Error;

use crate::attribute::AttributeError;
use crate::packet::PacketError;
use crate::transport::TransportError;
use crate::vsa::VsaError;

/// Crate-level error, unifying every layer's error enum for callers who
/// don't need to match on a specific layer.
#[derive(Error, Debug)]
pub enum RadiusError {
    #[error(transparent)]
    Attribute(#[from] AttributeError),
    #[error(transparent)]
    Vsa(#[from] VsaError),
    #[error(transparent)]
    Packet(#[from] PacketError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
