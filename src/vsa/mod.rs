//! The Vendor-Specific Attribute (Type 26) codec.

mod codec;
mod dialect;
mod errors;

pub use codec::{encode, parse, VendorSubAttribute};
pub use dialect::Dialect;
pub use errors::VsaError;
