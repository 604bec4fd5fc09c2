//! Frame encryption and decryption.
//!
//! Encrypted uplinks are AES-128 applied one 16-byte block at a time with a
//! single device key. Padding follows the device firmware rather than PKCS#7:
//! the pad run is all zero except its last byte, which holds the pad length.
//!
//! ```text
//! data (13 bytes) | 00 00 03
//! data (16 bytes) | 00 00 .. 00 10
//! ```

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::error::{CodecError, Result};

/// Cipher block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// First two bytes of a frame that was sent in the clear.
pub const PLAINTEXT_MARKER: [u8; 2] = [0x43, 0x47];

// ============================================================================
// Padding
// ============================================================================

/// Pad `data` to a whole number of blocks.
///
/// Always appends between 1 and [`BLOCK_SIZE`] bytes.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len - 1, 0);
    out.push(pad_len as u8);
    out
}

/// Strip padding, trusting only the final byte's count.
pub fn unpad(data: &[u8]) -> Result<&[u8]> {
    let Some(&last) = data.last() else {
        return Err(CodecError::PaddingInvalid { pad_len: 0, len: 0 });
    };

    let pad_len = usize::from(last);
    if pad_len >= data.len() {
        return Err(CodecError::PaddingInvalid {
            pad_len,
            len: data.len(),
        });
    }
    Ok(&data[..data.len() - pad_len])
}

// ============================================================================
// Block cipher
// ============================================================================

fn cipher_for(key: &[u8]) -> Result<Aes128> {
    if key.len() < BLOCK_SIZE {
        return Err(CodecError::InvalidKey(format!(
            "key is {} bytes, need at least {}",
            key.len(),
            BLOCK_SIZE
        )));
    }
    Aes128::new_from_slice(&key[..BLOCK_SIZE])
        .map_err(|e| CodecError::InvalidKey(e.to_string()))
}

fn check_block_multiple(len: usize) -> Result<()> {
    if len % BLOCK_SIZE != 0 {
        return Err(CodecError::malformed(format!(
            "cipher input of {} bytes is not a multiple of {}",
            len, BLOCK_SIZE
        )));
    }
    Ok(())
}

/// Encrypt whole blocks in place order, without padding.
pub fn encrypt_blocks(plain: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    check_block_multiple(plain.len())?;
    let cipher = cipher_for(key)?;

    let mut out = plain.to_vec();
    for chunk in out.chunks_mut(BLOCK_SIZE) {
        cipher.encrypt_block(chunk.into());
    }
    Ok(out)
}

/// Decrypt whole blocks, without unpadding.
pub fn decrypt_blocks(cipher_text: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    check_block_multiple(cipher_text.len())?;
    let cipher = cipher_for(key)?;

    let mut out = cipher_text.to_vec();
    for chunk in out.chunks_mut(BLOCK_SIZE) {
        cipher.decrypt_block(chunk.into());
    }
    Ok(out)
}

/// Pad and encrypt.
pub fn encrypt(plain: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    encrypt_blocks(&pad(plain), key)
}

/// Decrypt and unpad.
pub fn decrypt(cipher_text: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let plain = decrypt_blocks(cipher_text, key)?;
    Ok(unpad(&plain)?.to_vec())
}

/// True when the frame must be decrypted before parsing.
pub fn needs_decryption(frame: &[u8]) -> bool {
    !frame.starts_with(&PLAINTEXT_MARKER)
}

// ============================================================================
// Tests
// ============================================================================
