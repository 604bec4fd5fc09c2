//! Frame check algorithms.
//!
//! Two independent checks are in use:
//!
//! - an additive 16-bit sum, stored little-endian after the outer TLV frame;
//! - CRC-16 (reflected polynomial 0xA001, init 0xFFFF) on the LoRa envelopes.
//!
//! The LoRa check is verified as a residue: running the CRC over the whole
//! received frame, trailing check bytes included, must leave a zero register.

use crc::{Crc, CRC_16_MODBUS};

use crate::error::{CodecError, Result};

/// CRC-16 with polynomial 0x8005 reflected (0xA001), init 0xFFFF, no final xor.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

// ============================================================================
// Additive sum-check
// ============================================================================

/// Additive byte sum, modulo 65536.
pub fn sum16(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |sum, &b| sum.wrapping_add(u16::from(b)))
}

/// Verify the sum-check over the first `length` bytes of `frame`.
///
/// The last two of those bytes hold the little-endian check value.
pub fn sum_check(frame: &[u8], length: usize) -> bool {
    verify_sum_check(frame, length).is_ok()
}

/// Like [`sum_check`], but reports what was expected and found.
pub fn verify_sum_check(frame: &[u8], length: usize) -> Result<()> {
    if length < 2 || frame.len() < length {
        return Err(CodecError::truncated(0, length, frame.len()));
    }

    let expected = u16::from_le_bytes([frame[length - 2], frame[length - 1]]);
    let actual = sum16(&frame[..length - 2]);
    if expected != actual {
        return Err(CodecError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

/// Append the little-endian sum-check of everything already in `buf`.
pub fn append_sum_check(buf: &mut Vec<u8>) {
    let sum = sum16(buf);
    buf.extend_from_slice(&sum.to_le_bytes());
}

// ============================================================================
// CRC-16
// ============================================================================

/// CRC register after feeding `data`.
pub fn crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// Verify a LoRa frame that ends in its own CRC.
pub fn crc16_arc(frame: &[u8]) -> bool {
    verify_crc16(frame).is_ok()
}

/// Like [`crc16_arc`], but returns the non-zero residue on failure.
pub fn verify_crc16(frame: &[u8]) -> Result<()> {
    let residue = crc16(frame).swap_bytes();
    if residue != 0 {
        return Err(CodecError::CrcMismatch { residue });
    }
    Ok(())
}

/// Append the CRC of `buf` so that [`crc16_arc`] accepts the result.
pub fn append_crc16(buf: &mut Vec<u8>) {
    let crc = crc16(buf);
    buf.extend_from_slice(&crc.to_le_bytes());
}
