//! MD5 and HMAC-MD5 primitives.
//!
//! RADIUS leans on MD5 throughout (RFC 2865 Authenticator, RFC 3579
//! Message-Authenticator, RFC 2865/2868 password obfuscation) despite MD5
//! being broken as a general-purpose hash; this is a protocol requirement,
//! not a design choice made here.

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};

/// Computes the MD5 digest of the concatenation of `parts`.
///
/// Concatenation is expressed as a slice of slices so callers (the
/// Authenticator state machine in particular) never need to allocate a
/// single contiguous buffer just to hash it.
pub fn md5(parts: &[&[u8]]) -> [u8; 16] {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Computes HMAC-MD5(key, data), as used by Message-Authenticator (RFC 3579 §3.2).
pub fn hmac_md5(key: &[u8], data: &[u8]) -> [u8; 16] {
    let mut mac =
        Hmac::<Md5>::new_from_slice(key).expect("HMAC-MD5 accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_of_empty_matches_known_vector() {
        let digest = md5(&[b""]);
        assert_eq!(
            hex(&digest),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn md5_concatenates_parts() {
        let whole = md5(&[b"hello"]);
        let split = md5(&[b"hel", b"lo"]);
        assert_eq!(whole, split);
    }

    #[test]
    fn hmac_md5_known_vector() {
        // RFC 2202 test case 1
        let key = [0x0bu8; 16];
        let data = b"Hi There";
        let digest = hmac_md5(&key, data);
        assert_eq!(hex(&digest), "9294727a3638bb1c13f48ef8158bfc9d");
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
