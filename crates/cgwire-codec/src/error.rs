//! Error types for cgwire-codec.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while decoding or encoding frames.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Additive sum-check over the outer TLV frame failed.
    #[error("Checksum mismatch: expected {expected:#06x}, got {actual:#06x}")]
    ChecksumMismatch {
        /// Check value carried by the frame.
        expected: u16,
        /// Check value computed over the frame.
        actual: u16,
    },

    /// CRC16 over a LoRa frame (including its own check bytes) did not reduce to zero.
    #[error("CRC16 mismatch: residue {residue:#06x}")]
    CrcMismatch {
        /// Byte-swapped CRC register after the whole frame.
        residue: u16,
    },

    /// Cipher unpadding saw an out-of-range pad length.
    #[error("Invalid padding: pad length {pad_len} for {len} bytes")]
    PaddingInvalid {
        /// Pad length read from the final byte.
        pad_len: usize,
        /// Length of the decrypted buffer.
        len: usize,
    },

    /// A TLV sub-record or frame declared more bytes than remain.
    #[error("Truncated record at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedRecord {
        /// Offset of the record header.
        offset: usize,
        /// Bytes the record declared.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// A fixed-width field read ran past the end of its buffer.
    #[error("Buffer underrun at offset {offset}: need {needed} bytes, have {available}")]
    BufferUnderrun {
        /// Offset of the field.
        offset: usize,
        /// Width of the field.
        needed: usize,
        /// Length of the buffer.
        available: usize,
    },

    /// No encoder is registered for this tag.
    #[error("No encoder registered for tag {0:#04x}")]
    UnsupportedTag(u8),

    /// A populated aggregate field has no wire representation.
    #[error("Unsupported field: {0}")]
    UnsupportedField(String),

    /// Payload shape does not match any known layout.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Key material unusable for the block cipher.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Encoded payload does not fit its length field.
    #[error("Payload too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },
}

impl CodecError {
    /// Create a buffer underrun error for a field read.
    pub fn underrun(offset: usize, needed: usize, available: usize) -> Self {
        CodecError::BufferUnderrun {
            offset,
            needed,
            available,
        }
    }

    /// Create a truncated record error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        CodecError::TruncatedRecord {
            offset,
            needed,
            available,
        }
    }

    /// Create a malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        CodecError::MalformedInput(message.into())
    }

    /// True for both the sum-check and CRC16 rejections.
    pub fn is_checksum_failure(&self) -> bool {
        matches!(
            self,
            CodecError::ChecksumMismatch { .. } | CodecError::CrcMismatch { .. }
        )
    }
}
