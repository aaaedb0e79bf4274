use thiserror::Error;

use crate::packet::PacketError;

/// Transport correlator errors.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The caller violated a precondition (non-ASCII secret, zero
    /// `max_attempts`, mismatched local/server address families).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A non-timeout socket failure (bind, connect, send, or receive).
    #[error("network error: {0}")]
    NetworkError(#[from] std::io::Error),
    /// The caller's cancellation token fired before a reply was matched.
    #[error("cancelled")]
    Cancelled,
    /// Building the outbound packet failed.
    #[error(transparent)]
    Packet(#[from] PacketError),
}
