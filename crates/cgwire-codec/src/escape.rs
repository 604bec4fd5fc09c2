//! Frame unescaping and fragment reassembly.
//!
//! Devices avoid three reserved byte values on the air link by substituting
//! them and announcing the substitution inline:
//!
//! ```text
//! 27 03 00 | s0 s1 s2            substitution map: s0 -> 1A, s1 -> 1B, s2 -> 08
//! 26 03 00 | total seq len | ..   fragment header, then `len` content bytes
//! ```
//!
//! A map byte of `0x43` means "no substitution for this code". In a fragmented
//! frame each fragment is unescaped with the map carried at the tail of the
//! fragment before it.

use crate::error::{CodecError, Result};
use crate::field;

/// Announces a 3-byte substitution map.
pub const ESCAPE_MARK: [u8; 3] = [0x27, 0x03, 0x00];

/// Starts a fragment.
pub const SPLIT_MARK: [u8; 3] = [0x26, 0x03, 0x00];

/// Reserved codes, in the order the map bytes name them.
pub const STUFFED_CODES: [u8; 3] = [0x1A, 0x1B, 0x08];

/// Map byte meaning "leave this code alone".
const UNMAPPED: u8 = 0x43;

/// Fragment header: total, sequence number, content length.
const FRAGMENT_HEADER_LEN: usize = 3;

/// Byte substitution table built from one escape map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMap {
    table: [Option<u8>; 256],
}

impl SubstitutionMap {
    /// A map that changes nothing.
    pub fn identity() -> Self {
        SubstitutionMap { table: [None; 256] }
    }

    /// Build from the three bytes following [`ESCAPE_MARK`].
    pub fn from_key(key: [u8; 3]) -> Self {
        let mut map = Self::identity();
        for (&wire, &code) in key.iter().zip(STUFFED_CODES.iter()) {
            if wire != UNMAPPED {
                map.table[usize::from(wire)] = Some(code);
            }
        }
        map
    }

    /// Substitute in place.
    pub fn apply(&self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            if let Some(code) = self.table[usize::from(*b)] {
                *b = code;
            }
        }
    }
}

/// Position of the first occurrence of `needle`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Split on every occurrence of `mark`, like `bytes.Split`.
fn split_on<'a>(data: &'a [u8], mark: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut rest = data;
    while let Some(pos) = find(rest, mark) {
        parts.push(&rest[..pos]);
        rest = &rest[pos + mark.len()..];
    }
    parts.push(rest);
    parts
}

/// Offset of the map key inside `data`, if it carries an escape mark.
fn escape_key(data: &[u8]) -> Result<Option<(usize, [u8; 3])>> {
    match find(data, &ESCAPE_MARK) {
        Some(pos) => {
            let key_at = pos + ESCAPE_MARK.len();
            Ok(Some((key_at, field::array::<3>(data, key_at)?)))
        }
        None => Ok(None),
    }
}

/// Reconstruct a logical frame from a physical one.
///
/// Returns the input unchanged when it carries neither marker.
pub fn unescape(raw: &[u8]) -> Result<Vec<u8>> {
    let raw = if raw.starts_with(&[0x27, 0x27]) {
        &raw[1..]
    } else {
        raw
    };

    let parts = split_on(raw, &SPLIT_MARK);
    if parts.len() == 1 {
        return unescape_single(raw);
    }

    log::trace!("reassembling {} fragments", parts.len() - 1);

    let mut frame = Vec::with_capacity(raw.len());
    for (i, pair) in parts.windows(2).enumerate() {
        let (previous, fragment) = (pair[0], pair[1]);

        let map = match escape_key(previous)? {
            Some((_, key)) => SubstitutionMap::from_key(key),
            None => SubstitutionMap::identity(),
        };

        let len = usize::from(field::u8_at(fragment, 2)?);
        let content = fragment
            .get(FRAGMENT_HEADER_LEN..FRAGMENT_HEADER_LEN + len)
            .ok_or_else(|| {
                let available = fragment.len().saturating_sub(FRAGMENT_HEADER_LEN);
                CodecError::truncated(i + 1, len, available)
            })?;

        let start = frame.len();
        frame.extend_from_slice(content);
        map.apply(&mut frame[start..]);
    }
    Ok(frame)
}

fn unescape_single(raw: &[u8]) -> Result<Vec<u8>> {
    match escape_key(raw)? {
        Some((key_at, key)) => {
            let mut out = raw[key_at + key.len()..].to_vec();
            SubstitutionMap::from_key(key).apply(&mut out);
            Ok(out)
        }
        None => Ok(raw.to_vec()),
    }
}
