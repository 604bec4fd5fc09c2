//! Bounds-checked fixed-width field reads.
//!
//! Every read names its offset so a short buffer surfaces as
//! [`CodecError::BufferUnderrun`] instead of a slice panic.

use crate::error::{CodecError, Result};

/// Borrow `len` bytes starting at `offset`.
pub(crate) fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    data.get(offset..offset + len)
        .ok_or_else(|| CodecError::underrun(offset, len, data.len()))
}

/// Copy `N` bytes starting at `offset`.
pub(crate) fn array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice(data, offset, N)?);
    Ok(out)
}

pub(crate) fn u8_at(data: &[u8], offset: usize) -> Result<u8> {
    data.get(offset)
        .copied()
        .ok_or_else(|| CodecError::underrun(offset, 1, data.len()))
}

pub(crate) fn i8_at(data: &[u8], offset: usize) -> Result<i8> {
    Ok(u8_at(data, offset)? as i8)
}

pub(crate) fn u16_le(data: &[u8], offset: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(array(data, offset)?))
}

pub(crate) fn u16_be(data: &[u8], offset: usize) -> Result<u16> {
    Ok(u16::from_be_bytes(array(data, offset)?))
}

pub(crate) fn i16_le(data: &[u8], offset: usize) -> Result<i16> {
    Ok(i16::from_le_bytes(array(data, offset)?))
}

pub(crate) fn u32_le(data: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(array(data, offset)?))
}

pub(crate) fn u32_be(data: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_be_bytes(array(data, offset)?))
}

pub(crate) fn i32_le(data: &[u8], offset: usize) -> Result<i32> {
    Ok(i32::from_le_bytes(array(data, offset)?))
}

/// Little-endian unsigned integer of whatever width the record carries.
pub(crate) fn le_uint(data: &[u8]) -> u64 {
    data.iter()
        .take(8)
        .enumerate()
        .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i)))
}
