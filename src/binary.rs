//! Big-endian binary helpers shared by every codec layer.
//!
//! These are pure functions over byte slices: no allocation beyond what the
//! caller already owns, no I/O, and no panics on malformed input — every
//! width-checked read returns `Err(OutOfBounds)` instead.

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

/// Binary helper errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryError {
    /// The slice was too short to hold the requested field.
    #[error("buffer too short: need {needed} bytes at offset {offset}, have {available}")]
    OutOfBounds {
        /// Offset the read/write was attempted at.
        offset: usize,
        /// Number of bytes required.
        needed: usize,
        /// Number of bytes actually available from `offset`.
        available: usize,
    },
}

fn check(buf_len: usize, offset: usize, needed: usize) -> Result<(), BinaryError> {
    let available = buf_len.saturating_sub(offset);
    if available < needed {
        Err(BinaryError::OutOfBounds {
            offset,
            needed,
            available,
        })
    } else {
        Ok(())
    }
}

/// Reads a big-endian `u16` at `offset`.
pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16, BinaryError> {
    check(buf.len(), offset, 2)?;
    Ok(BigEndian::read_u16(&buf[offset..offset + 2]))
}

/// Writes a big-endian `u16` at `offset`.
pub fn write_u16(buf: &mut [u8], offset: usize, value: u16) -> Result<(), BinaryError> {
    check(buf.len(), offset, 2)?;
    BigEndian::write_u16(&mut buf[offset..offset + 2], value);
    Ok(())
}

/// Reads a big-endian 24-bit (3-byte) unsigned integer at `offset`.
///
/// Used only by tagged tunnel attributes (RFC 2868 §3.1-3.2), whose Value
/// field carries a 1-byte Tag followed by a 3-byte Tunnel-Type/Medium code.
pub fn read_u24(buf: &[u8], offset: usize) -> Result<u32, BinaryError> {
    check(buf.len(), offset, 3)?;
    Ok(BigEndian::read_u24(&buf[offset..offset + 3]))
}

/// Writes a big-endian 24-bit (3-byte) unsigned integer at `offset`.
///
/// The top 8 bits of `value` are silently dropped, matching the wire width;
/// callers are expected to have validated `value <= 0xFF_FFFF` beforehand.
pub fn write_u24(buf: &mut [u8], offset: usize, value: u32) -> Result<(), BinaryError> {
    check(buf.len(), offset, 3)?;
    BigEndian::write_u24(&mut buf[offset..offset + 3], value);
    Ok(())
}

/// Reads a big-endian `u32` at `offset`.
pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32, BinaryError> {
    check(buf.len(), offset, 4)?;
    Ok(BigEndian::read_u32(&buf[offset..offset + 4]))
}

/// Writes a big-endian `u32` at `offset`.
pub fn write_u32(buf: &mut [u8], offset: usize, value: u32) -> Result<(), BinaryError> {
    check(buf.len(), offset, 4)?;
    BigEndian::write_u32(&mut buf[offset..offset + 4], value);
    Ok(())
}

/// Reads a big-endian `u64` at `offset`.
pub fn read_u64(buf: &[u8], offset: usize) -> Result<u64, BinaryError> {
    check(buf.len(), offset, 8)?;
    Ok(BigEndian::read_u64(&buf[offset..offset + 8]))
}

/// Writes a big-endian `u64` at `offset`.
pub fn write_u64(buf: &mut [u8], offset: usize, value: u64) -> Result<(), BinaryError> {
    check(buf.len(), offset, 8)?;
    BigEndian::write_u64(&mut buf[offset..offset + 8], value);
    Ok(())
}

/// Compares two equal-length slices in constant time.
///
/// Unlike `==`, this never short-circuits on the first mismatching byte: it
/// always performs exactly `a.len()` byte comparisons, folding the result
/// with bitwise-OR so that execution time does not leak the position of a
/// difference. Slices of different length are never equal and are rejected
/// up front (a length check is not secret-dependent, so it is safe to branch
/// on).
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }

    diff == 0
}

/// Fills `buf` with cryptographically secure random bytes.
pub fn secure_random(buf: &mut [u8]) {
    use rand::RngCore;
    rand::thread_rng().fill_bytes(buf);
}

/// Zeroes `buf` in place.
///
/// Used at every exit path (success, error, or panic-unwind-adjacent early
/// return) that has populated a buffer with plaintext password material, an
/// HMAC key, or a packet working copy during authenticator recomputation.
pub fn secure_zero(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        unsafe { std::ptr::write_volatile(b, 0) };
    }
    std::sync::atomic::fence(std::sync::atomic::Ordering::SeqCst);
}
