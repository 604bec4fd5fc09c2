//! Outer frame and sub-record layout.
//!
//! ```text
//! +------+------+-----+--------+-------------------+--------+
//! | 0x43 | 0x47 | cmd | len LE | payload[0..len]   | sum LE |
//! +------+------+-----+--------+-------------------+--------+
//! ```
//!
//! The payload is a run of sub-records:
//!
//! ```text
//! +-----+--------+-----------------+
//! | tag | len LE | value[0..len]   |
//! +-----+--------+-----------------+
//! ```

use bytes::BufMut;

use crate::checksum;
use crate::error::{CodecError, Result};
use crate::field;

/// Start of packet.
pub const SOP: [u8; 2] = [0x43, 0x47];

/// SOP, command and length.
pub const HEADER_LEN: usize = 5;

/// Trailing sum-check.
pub const CHECK_LEN: usize = 2;

/// Tag and length of a sub-record.
pub const RECORD_HEADER_LEN: usize = 3;

/// Command used when a downlink does not name one.
pub const DEFAULT_COMMAND: u8 = 0x32;

/// Largest payload the length field can describe.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// A verified outer frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub command: u8,
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Walk the payload's sub-records.
    pub fn records(&self) -> Records<'a> {
        Records::new(self.payload)
    }
}

/// Parse and verify an outer frame.
///
/// The sum-check covers the declared length plus header and check bytes;
/// anything after that is ignored.
pub fn parse_frame(data: &[u8]) -> Result<Frame<'_>> {
    if data.len() < HEADER_LEN + CHECK_LEN {
        return Err(CodecError::truncated(0, HEADER_LEN + CHECK_LEN, data.len()));
    }

    let command = field::u8_at(data, 2)?;
    let len = usize::from(field::u16_le(data, 3)?);
    let total = HEADER_LEN + len + CHECK_LEN;
    if data.len() < total {
        return Err(CodecError::truncated(0, total, data.len()));
    }

    checksum::verify_sum_check(data, total)?;

    Ok(Frame {
        command,
        payload: &data[HEADER_LEN..HEADER_LEN + len],
    })
}

/// One sub-record, borrowed from its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub tag: u8,
    pub value: &'a [u8],
}

/// Iterator over the sub-records of a payload.
///
/// Yields an error, then stops, when a record header or body runs past the
/// end of the payload.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Records<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Records { data, offset: 0 }
    }

    fn next_record(&mut self) -> Result<Record<'a>> {
        let rest = &self.data[self.offset..];
        if rest.len() < RECORD_HEADER_LEN {
            return Err(CodecError::truncated(
                self.offset,
                RECORD_HEADER_LEN,
                rest.len(),
            ));
        }

        let tag = rest[0];
        let len = usize::from(u16::from_le_bytes([rest[1], rest[2]]));
        let value = rest
            .get(RECORD_HEADER_LEN..RECORD_HEADER_LEN + len)
            .ok_or_else(|| {
                CodecError::truncated(self.offset, len, rest.len() - RECORD_HEADER_LEN)
            })?;

        self.offset += RECORD_HEADER_LEN + len;
        Ok(Record { tag, value })
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.data.len() {
            return None;
        }
        let record = self.next_record();
        if record.is_err() {
            self.offset = self.data.len();
        }
        Some(record)
    }
}

/// Append one sub-record to `buf`.
pub fn put_record(buf: &mut Vec<u8>, tag: u8, value: &[u8]) -> Result<()> {
    if value.len() > MAX_PAYLOAD {
        return Err(CodecError::TooLarge {
            size: value.len(),
            max: MAX_PAYLOAD,
        });
    }
    buf.put_u8(tag);
    buf.put_u16_le(value.len() as u16);
    buf.extend_from_slice(value);
    Ok(())
}

/// Wrap a payload in the outer frame and append its sum-check.
pub fn assemble_frame(command: u8, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD {
        return Err(CodecError::TooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }

    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len() + CHECK_LEN);
    buf.extend_from_slice(&SOP);
    buf.put_u8(command);
    buf.put_u16_le(payload.len() as u16);
    buf.extend_from_slice(payload);
    checksum::append_sum_check(&mut buf);
    Ok(buf)
}
