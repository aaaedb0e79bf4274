use crate::attribute::Attribute;
use crate::binary::{constant_time_eq, secure_random, secure_zero};
use crate::crypto::{hmac_md5, md5};
use crate::definitions::{
    ATTR_TYPE_MESSAGE_AUTHENTICATOR, MESSAGE_AUTHENTICATOR_ATTR_LEN, RADIUS_AUTHENTICATOR_SIZE,
};
use crate::registry::PacketCode;

use super::errors::PacketError;
use super::packet::Packet;

/// Locates the byte offset, within a packet's declared attribute region, of
/// a Type-80 (Message-Authenticator) TLV of the expected 18-byte length.
fn locate_message_authenticator(bytes: &[u8]) -> Option<usize> {
    let declared = crate::binary::read_u16(bytes, 2).ok()? as usize;
    let mut pos = crate::definitions::RADIUS_HEADER_SIZE;
    while pos + 2 <= declared {
        let len = bytes[pos + 1] as usize;
        if len < 2 || pos + len > declared {
            return None;
        }
        if bytes[pos] == ATTR_TYPE_MESSAGE_AUTHENTICATOR && len == MESSAGE_AUTHENTICATOR_ATTR_LEN {
            return Some(pos);
        }
        pos += len;
    }
    None
}

impl Packet {
    /// Appends a Type-80 Message-Authenticator attribute with a zeroed
    /// value region, then computes HMAC-MD5 over the packet (with that
    /// region still zero) and patches the digest into place (spec.md §4.4
    /// "SetMessageAuthenticator"). Must be called **before**
    /// `set_authenticator` when both are used.
    pub fn set_message_authenticator(&mut self, secret: &[u8]) -> Result<(), PacketError> {
        let placeholder =
            Attribute::from_bytes(ATTR_TYPE_MESSAGE_AUTHENTICATOR, &[0u8; RADIUS_AUTHENTICATOR_SIZE])?;
        self.append(placeholder)?;

        let offset = self.bytes.len() - MESSAGE_AUTHENTICATOR_ATTR_LEN;
        let digest = hmac_md5(secret, &self.bytes);
        self.bytes[offset + 2..offset + 2 + RADIUS_AUTHENTICATOR_SIZE].copy_from_slice(&digest);

        self.resync_attributes()
    }

    /// Recomputes an already-present Message-Authenticator after the header
    /// Authenticator has changed (spec.md §4.4: "the HMAC covers the full
    /// header", so it must be redone once the final Authenticator is
    /// written). A no-op if no Message-Authenticator attribute is present.
    fn recompute_message_authenticator(&mut self, secret: &[u8]) -> Result<(), PacketError> {
        let Some(offset) = locate_message_authenticator(&self.bytes) else {
            return Ok(());
        };

        let value_start = offset + 2;
        let value_end = value_start + RADIUS_AUTHENTICATOR_SIZE;
        self.bytes[value_start..value_end].fill(0);
        let digest = hmac_md5(secret, &self.bytes);
        self.bytes[value_start..value_end].copy_from_slice(&digest);

        self.resync_attributes()
    }

    /// Computes and writes the 16-byte Authenticator, dispatching on Code
    /// (spec.md §4.4 "Authenticator strategies"). If this packet is an
    /// Access-Request or Status-Server and already carries a
    /// Message-Authenticator, that HMAC is recomputed afterward since it
    /// covers the just-written Authenticator.
    pub fn set_authenticator(
        &mut self,
        secret: &[u8],
        request_authenticator: Option<[u8; RADIUS_AUTHENTICATOR_SIZE]>,
    ) -> Result<(), PacketError> {
        use PacketCode::*;

        match self.code_enum() {
            Some(AccessRequest) | Some(StatusServer) => {
                let mut random16 = [0u8; RADIUS_AUTHENTICATOR_SIZE];
                secure_random(&mut random16);
                let digest = md5(&[&random16, secret]);
                secure_zero(&mut random16);
                self.bytes[4..4 + RADIUS_AUTHENTICATOR_SIZE].copy_from_slice(&digest);

                self.recompute_message_authenticator(secret)?;
            }

            Some(AccessAccept)
            | Some(AccessReject)
            | Some(AccessChallenge)
            | Some(AccountingResponse)
            | Some(DisconnectAck)
            | Some(DisconnectNak)
            | Some(CoaAck)
            | Some(CoaNak) => {
                let request_authenticator = request_authenticator.ok_or_else(|| {
                    PacketError::InvalidArgument(
                        "this Code requires the original request Authenticator".into(),
                    )
                })?;

                self.bytes[4..4 + RADIUS_AUTHENTICATOR_SIZE]
                    .copy_from_slice(&request_authenticator);

                let digest = md5(&[&self.bytes, secret]);
                self.bytes[4..4 + RADIUS_AUTHENTICATOR_SIZE].copy_from_slice(&digest);
            }

            Some(AccountingRequest) | Some(CoaRequest) | Some(DisconnectRequest) => {
                let mut working = self.bytes.clone();
                working[4..4 + RADIUS_AUTHENTICATOR_SIZE].fill(0);
                let digest = md5(&[&working, secret]);
                secure_zero(&mut working);
                self.bytes[4..4 + RADIUS_AUTHENTICATOR_SIZE].copy_from_slice(&digest);
            }

            _ => {
                return Err(PacketError::Unsupported(format!(
                    "no Authenticator strategy defined for Code {}",
                    self.code()
                )))
            }
        }

        Ok(())
    }

    /// Verifies a response Authenticator (spec.md §4.4 "Verification"):
    /// recomputes `MD5(Code ‖ Id ‖ Length ‖ requestAuthenticator ‖ Attrs ‖
    /// secret)` with the original request Authenticator substituted in a
    /// working copy, then constant-time compares against the Authenticator
    /// this (response) packet actually carries. Never throws; mismatches,
    /// including an unrecognized Code, surface as `false`.
    pub fn verify_response_authenticator(
        &self,
        request_authenticator: &[u8],
        secret: &[u8],
    ) -> bool {
        if request_authenticator.len() != RADIUS_AUTHENTICATOR_SIZE {
            return false;
        }

        let mut working = self.bytes.clone();
        working[4..4 + RADIUS_AUTHENTICATOR_SIZE].copy_from_slice(request_authenticator);
        let expected = md5(&[&working, secret]);
        secure_zero(&mut working);

        constant_time_eq(&expected, self.authenticator())
    }

    /// Verifies an Accounting-Request / CoA-Request / Disconnect-Request
    /// Authenticator: same computation as the request-signing strategy,
    /// with the 16 Authenticator bytes zeroed in a working copy.
    pub fn verify_request_authenticator(&self, secret: &[u8]) -> bool {
        let mut working = self.bytes.clone();
        working[4..4 + RADIUS_AUTHENTICATOR_SIZE].fill(0);
        let expected = md5(&[&working, secret]);
        secure_zero(&mut working);

        constant_time_eq(&expected, self.authenticator())
    }

    /// Verifies this packet's Message-Authenticator attribute, if present.
    /// Returns `false` (never throws) if the attribute is absent — spec.md
    /// §7 treats an absent Message-Authenticator as unverifiable rather
    /// than an error.
    pub fn verify_message_authenticator(&self, secret: &[u8]) -> bool {
        let Some(offset) = locate_message_authenticator(&self.bytes) else {
            return false;
        };

        let value_start = offset + 2;
        let value_end = value_start + RADIUS_AUTHENTICATOR_SIZE;
        let received = self.bytes[value_start..value_end].to_vec();

        let mut working = self.bytes.clone();
        working[value_start..value_end].fill(0);
        let expected = hmac_md5(secret, &working);
        secure_zero(&mut working);

        constant_time_eq(&expected, &received)
    }
}
