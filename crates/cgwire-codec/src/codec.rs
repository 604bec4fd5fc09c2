//! Frame encoding and decoding.
//!
//! Uplink path:
//!
//! ```text
//! raw ── unescape ── [decrypt] ── parse_frame
//!     ── records ── decode_record ── MessagePod
//! ```
//!
//! Decryption is skipped when the unescaped frame already starts with the
//! plaintext SOP. Every error aborts the whole frame; a partially filled
//! pod is never returned.
//!
//! Downlink path:
//!
//! ```text
//! MessagePod ── encode_records ── encode_value ── put_record ── assemble_frame
//! ```

use crate::cipher;
use crate::dispatch::{self, DecodeContext};
use crate::encode;
use crate::error::Result;
use crate::escape;
use crate::keys::KeyLookup;
use crate::pod::MessagePod;
use crate::tags;
use crate::tlv::{self, DEFAULT_COMMAND};

// ============================================================================
// Decoding
// ============================================================================

/// Decode one physical uplink frame.
///
/// `mac` identifies the sender when the transport knows it; it is only used
/// to pick the cipher key.
pub fn decode_frame<K>(raw: &[u8], mac: Option<&str>, keys: &K) -> Result<MessagePod>
where
    K: KeyLookup + ?Sized,
{
    let frame = escape::unescape(raw)?;

    let plain = if cipher::needs_decryption(&frame) {
        let mac = mac.unwrap_or_default();
        log::debug!("decrypting {} byte frame for {:?}", frame.len(), mac);
        cipher::decrypt(&frame, &keys.key_for(mac))?
    } else {
        frame
    };

    decode_tlv(&plain)
}

/// Decode an unescaped plaintext TLV frame.
pub fn decode_tlv(plain: &[u8]) -> Result<MessagePod> {
    let frame = tlv::parse_frame(plain)?;
    let mut pod = MessagePod::with_command(frame.command);

    for record in frame.records() {
        let record = record?;
        // Product id may arrive mid-frame; later records see it.
        let ctx = DecodeContext {
            command: frame.command,
            family: pod.family(),
        };
        log::trace!("tag {:#04x} len {}", record.tag, record.value.len());
        for update in dispatch::decode_record(record.tag, record.value, &ctx)? {
            pod.apply(update);
        }
    }

    pod.normalize();
    Ok(pod)
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode the downlink settings of `pod` as a plaintext frame.
///
/// The command defaults to [`DEFAULT_COMMAND`].
pub fn encode_frame(pod: &MessagePod) -> Result<Vec<u8>> {
    let command = pod.command.unwrap_or(DEFAULT_COMMAND);

    let mut payload = Vec::new();
    for (tag, value) in encode::encode_records(pod)? {
        tlv::put_record(&mut payload, tag, &tags::encode_value(tag, &value)?)?;
    }

    tlv::assemble_frame(command, &payload)
}

/// Encrypt a plaintext frame the way a device would before sending it.
pub fn encrypt_frame(frame: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    cipher::encrypt(frame, key)
}
