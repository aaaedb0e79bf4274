use crate::binary::secure_zero;
use crate::crypto::md5;

use super::errors::PacketError;

const BLOCK_LEN: usize = 16;

fn pad_to_block(input: &[u8]) -> Vec<u8> {
    let padded_len = input.len().div_ceil(BLOCK_LEN) * BLOCK_LEN;
    let mut padded = vec![0u8; padded_len];
    padded[..input.len()].copy_from_slice(input);
    padded
}

/// XORs each 16-byte block of `plaintext_blocks` against `MD5(secret ‖
/// prev)`, where `prev` starts as `first_chain` and becomes the
/// **ciphertext** block just produced (RFC 2865 §5.2 / RFC 2868 §3.5: the
/// chaining input is always the ciphertext, never the plaintext).
fn xor_chain_encrypt(plaintext_blocks: &[u8], secret: &[u8], first_chain: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(plaintext_blocks.len());
    let mut prev = first_chain.to_vec();

    for block in plaintext_blocks.chunks(BLOCK_LEN) {
        let key_stream = md5(&[secret, &prev]);
        let cipher_block: Vec<u8> = block
            .iter()
            .zip(key_stream.iter())
            .map(|(p, k)| p ^ k)
            .collect();
        out.extend_from_slice(&cipher_block);
        prev = cipher_block;
    }

    out
}

/// Inverse of `xor_chain_encrypt`: recovers plaintext blocks from
/// `ciphertext_blocks`, chaining on the ciphertext itself.
fn xor_chain_decrypt(ciphertext_blocks: &[u8], secret: &[u8], first_chain: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ciphertext_blocks.len());
    let mut prev = first_chain.to_vec();

    for block in ciphertext_blocks.chunks(BLOCK_LEN) {
        let key_stream = md5(&[secret, &prev]);
        let plain_block: Vec<u8> = block
            .iter()
            .zip(key_stream.iter())
            .map(|(c, k)| c ^ k)
            .collect();
        out.extend_from_slice(&plain_block);
        prev = block.to_vec();
    }

    out
}

/// PAP User-Password obfuscation (RFC 2865 §5.2). `plaintext` must be 1-128
/// bytes. Output is zero-padded plaintext XORed against an MD5 key stream
/// chained from the Request Authenticator.
pub fn pap_encode(
    plaintext: &[u8],
    request_authenticator: &[u8; 16],
    secret: &[u8],
) -> Result<Vec<u8>, PacketError> {
    if plaintext.is_empty() || plaintext.len() > 128 {
        return Err(PacketError::OutOfRange(format!(
            "PAP plaintext is {} bytes, must be 1-128",
            plaintext.len()
        )));
    }

    let mut padded = pad_to_block(plaintext);
    let ciphertext = xor_chain_encrypt(&padded, secret, request_authenticator);
    secure_zero(&mut padded);

    Ok(ciphertext)
}

/// Inverse of `pap_encode`. Trailing zero bytes in the recovered plaintext
/// are stripped — an irreversible ambiguity inherent to RFC 2865 §5.2 that
/// this implementation accepts rather than works around (spec.md §9 Open
/// Questions).
pub fn pap_decode(
    ciphertext: &[u8],
    request_authenticator: &[u8; 16],
    secret: &[u8],
) -> Result<Vec<u8>, PacketError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(PacketError::OutOfRange(format!(
            "PAP ciphertext is {} bytes, must be a positive multiple of 16",
            ciphertext.len()
        )));
    }

    let mut padded = xor_chain_decrypt(ciphertext, secret, request_authenticator);
    let trimmed_len = padded
        .iter()
        .rposition(|&b| b != 0)
        .map(|last_nonzero| last_nonzero + 1)
        .unwrap_or(0);
    let result = padded[..trimmed_len].to_vec();
    secure_zero(&mut padded);

    Ok(result)
}

/// CHAP response (RFC 1994 §3, RFC 2865 §5.3): `ChapId ‖ MD5(ChapId ‖
/// Password ‖ Challenge)`, 17 bytes total.
pub fn chap_response(
    chap_id: u8,
    password: &[u8],
    challenge: &[u8],
) -> Result<[u8; 17], PacketError> {
    if password.is_empty() {
        return Err(PacketError::InvalidArgument(
            "CHAP password must not be empty".into(),
        ));
    }
    if challenge.is_empty() {
        return Err(PacketError::InvalidArgument(
            "CHAP challenge must not be empty".into(),
        ));
    }

    let digest = md5(&[&[chap_id], password, challenge]);

    let mut out = [0u8; 17];
    out[0] = chap_id;
    out[1..].copy_from_slice(&digest);
    Ok(out)
}

/// Tunnel-Password obfuscation (RFC 2868 §3.5). `plaintext` must be 1-240
/// bytes. A 2-byte random salt with the top bit of its first byte set is
/// generated; the wire value is `salt ‖ ciphertext`.
pub fn tunnel_password_encode(
    plaintext: &[u8],
    request_authenticator: &[u8; 16],
    secret: &[u8],
) -> Result<Vec<u8>, PacketError> {
    if plaintext.is_empty() || plaintext.len() > 240 {
        return Err(PacketError::OutOfRange(format!(
            "Tunnel-Password plaintext is {} bytes, must be 1-240",
            plaintext.len()
        )));
    }

    let mut salt = [0u8; 2];
    crate::binary::secure_random(&mut salt);
    salt[0] |= 0x80;

    let mut plaintext_block = Vec::with_capacity(1 + plaintext.len());
    plaintext_block.push(plaintext.len() as u8);
    plaintext_block.extend_from_slice(plaintext);
    let mut padded = pad_to_block(&plaintext_block);

    let mut first_chain = Vec::with_capacity(16 + 2);
    first_chain.extend_from_slice(request_authenticator);
    first_chain.extend_from_slice(&salt);

    let ciphertext = xor_chain_encrypt(&padded, secret, &first_chain);
    secure_zero(&mut padded);
    secure_zero(&mut first_chain);

    let mut wire = Vec::with_capacity(2 + ciphertext.len());
    wire.extend_from_slice(&salt);
    wire.extend_from_slice(&ciphertext);
    Ok(wire)
}

/// Inverse of `tunnel_password_encode`. The recovered length byte is
/// clamped to the available plaintext if it overstates it (defensive
/// against a corrupted or malicious peer), per spec.md §4.4.
pub fn tunnel_password_decode(
    value: &[u8],
    request_authenticator: &[u8; 16],
    secret: &[u8],
) -> Result<Vec<u8>, PacketError> {
    if value.len() < 2 || (value.len() - 2) == 0 || (value.len() - 2) % BLOCK_LEN != 0 {
        return Err(PacketError::OutOfRange(format!(
            "Tunnel-Password value is {} bytes, must be 2 + a positive multiple of 16",
            value.len()
        )));
    }

    let salt = &value[..2];
    let ciphertext = &value[2..];

    let mut first_chain = Vec::with_capacity(18);
    first_chain.extend_from_slice(request_authenticator);
    first_chain.extend_from_slice(salt);

    let mut padded = xor_chain_decrypt(ciphertext, secret, &first_chain);
    secure_zero(&mut first_chain);

    let declared_len = padded[0] as usize;
    let available = padded.len() - 1;
    let clamped_len = declared_len.min(available);
    let result = padded[1..1 + clamped_len].to_vec();
    secure_zero(&mut padded);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pap_round_trip_strips_only_padding_zeros() {
        let auth = [0x11u8; 16];
        let secret = b"testing123";
        let plaintext = b"password";

        let cipher = pap_encode(plaintext, &auth, secret).unwrap();
        assert_eq!(cipher.len(), 16);

        let recovered = pap_decode(&cipher, &auth, secret).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn pap_16_byte_plaintext_produces_16_byte_ciphertext() {
        let auth = [0u8; 16];
        let plaintext = [b'x'; 16];
        let cipher = pap_encode(&plaintext, &auth, b"secret").unwrap();
        assert_eq!(cipher.len(), 16);
    }

    #[test]
    fn pap_rejects_out_of_range_lengths() {
        let auth = [0u8; 16];
        assert!(pap_encode(&[], &auth, b"s").is_err());
        assert!(pap_encode(&[0u8; 129], &auth, b"s").is_err());
    }

    #[test]
    fn chap_response_is_17_bytes_with_id_prefix() {
        let resp = chap_response(5, b"password", b"challenge-bytes").unwrap();
        assert_eq!(resp.len(), 17);
        assert_eq!(resp[0], 5);
    }

    #[test]
    fn chap_rejects_empty_password_or_challenge() {
        assert!(chap_response(1, b"", b"c").is_err());
        assert!(chap_response(1, b"p", b"").is_err());
    }

    #[test]
    fn tunnel_password_round_trip_matches_spec_scenario() {
        let auth = [0u8; 16];
        let secret = b"xyzzy";
        let plaintext = b"tunnel-pwd";

        let wire = tunnel_password_encode(plaintext, &auth, secret).unwrap();
        assert_eq!(wire.len(), 18);
        assert_ne!(wire[0] & 0x80, 0);

        let recovered = tunnel_password_decode(&wire, &auth, secret).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn tunnel_password_decode_clamps_corrupted_length_byte() {
        let auth = [0u8; 16];
        let secret = b"xyzzy";
        let mut wire = tunnel_password_encode(b"short", &auth, secret).unwrap();

        // Re-encrypt a forged oversized length byte through the same key
        // stream so decode reaches the clamp rather than failing earlier.
        let salt = [wire[0], wire[1]];
        let mut first_chain = Vec::new();
        first_chain.extend_from_slice(&auth);
        first_chain.extend_from_slice(&salt);
        let forged_plain = {
            let mut p = vec![0u8; 16];
            p[0] = 255;
            p
        };
        let forged_cipher = xor_chain_encrypt(&forged_plain, secret, &first_chain);
        wire[2..18].copy_from_slice(&forged_cipher);

        let recovered = tunnel_password_decode(&wire, &auth, secret).unwrap();
        assert_eq!(recovered.len(), 15); // clamped to available plaintext (16 - 1 length byte)
    }

    proptest::proptest! {
        #[test]
        fn pap_round_trip_modulo_trailing_zero_stripping(
            plaintext in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..=128),
            auth in proptest::array::uniform16(proptest::prelude::any::<u8>()),
            secret in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..=32),
        ) {
            let cipher = pap_encode(&plaintext, &auth, &secret).unwrap();
            let recovered = pap_decode(&cipher, &auth, &secret).unwrap();

            let trimmed_len = plaintext.iter().rposition(|&b| b != 0).map(|i| i + 1).unwrap_or(0);
            proptest::prop_assert_eq!(recovered, plaintext[..trimmed_len].to_vec());
        }

        #[test]
        fn tunnel_password_round_trips_exactly(
            plaintext in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..=240),
            auth in proptest::array::uniform16(proptest::prelude::any::<u8>()),
            secret in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..=32),
        ) {
            let wire = tunnel_password_encode(&plaintext, &auth, &secret).unwrap();
            let recovered = tunnel_password_decode(&wire, &auth, &secret).unwrap();
            proptest::prop_assert_eq!(recovered, plaintext);
        }
    }
}
