//! A client-side RADIUS protocol encoder, decoder, and UDP transport.
//!
//! Implements the wire format and cryptographic primitives of RFC 2865
//! (Authentication), RFC 2866 (Accounting), RFC 2868 (Tunnel attributes),
//! RFC 3579 (EAP Message-Authenticator), RFC 5176 (Dynamic Authorization:
//! CoA/Disconnect) and RFC 5997 (Status-Server).

mod binary;
mod crypto;
mod definitions;
mod error;
mod registry;

pub mod attribute;
pub mod packet;
pub mod transport;
pub mod vsa;

pub use binary::{constant_time_eq, secure_random, secure_zero, BinaryError};
pub use error::RadiusError;
pub use registry::{
    attr_type, category_for_type, AcctStatusType, AcctTerminateCause, ErrorCause, NasPortType,
    PacketCode, ServiceType, TunnelMediumType, TunnelType, ValueCategory,
};
