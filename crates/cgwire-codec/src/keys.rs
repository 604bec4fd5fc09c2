//! Device key lookup.
//!
//! Decoding an encrypted frame needs the key for the sending device. The
//! codec only ever asks for it through [`KeyLookup`]:
//! - [`DefaultKey`] - the fixed single-tenant key
//! - [`KeyTable`] - per-MAC keys loaded from YAML, with a default fallback
//! - any `Fn(&str) -> Vec<u8>` closure
//!
//! ## YAML shape
//!
//! ```yaml
//! default_key: CF64060BDCF33F15A4E9166F7778CFE4
//! devices:
//!   "AABBCCDDEEFF": 00112233445566778899AABBCCDDEEFF
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cipher::BLOCK_SIZE;
use crate::error::CodecError;

/// Hex form of the key shared by single-tenant deployments.
pub const DEFAULT_KEY_HEX: &str = "CF64060BDCF33F15A4E9166F7778CFE4";

/// Source of per-device cipher keys.
pub trait KeyLookup {
    /// Raw key bytes for the device with this MAC.
    fn key_for(&self, mac: &str) -> Vec<u8>;
}

impl<F> KeyLookup for F
where
    F: Fn(&str) -> Vec<u8>,
{
    fn key_for(&self, mac: &str) -> Vec<u8> {
        self(mac)
    }
}

/// Returns [`DEFAULT_KEY_HEX`] for every device.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKey;

impl KeyLookup for DefaultKey {
    fn key_for(&self, _mac: &str) -> Vec<u8> {
        DeviceKey::default().0
    }
}

// ============================================================================
// DeviceKey
// ============================================================================

/// A 16-byte cipher key, written as 32 hex characters in configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceKey(Vec<u8>);

impl DeviceKey {
    /// Parse a key from hex. Case and surrounding whitespace are ignored.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let s = s.trim();
        if s.len() != BLOCK_SIZE * 2 {
            return Err(CodecError::InvalidKey(format!(
                "key must be {} hex characters, got {}",
                BLOCK_SIZE * 2,
                s.len()
            )));
        }
        let bytes =
            hex::decode(s).map_err(|e| CodecError::InvalidKey(format!("invalid hex: {}", e)))?;
        Ok(DeviceKey(bytes))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for DeviceKey {
    fn default() -> Self {
        DeviceKey(hex::decode(DEFAULT_KEY_HEX).unwrap_or_default())
    }
}

impl fmt::Debug for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keys stay out of logs.
        write!(f, "DeviceKey(..)")
    }
}

impl Serialize for DeviceKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode_upper(&self.0))
    }
}

impl<'de> Deserialize<'de> for DeviceKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DeviceKey::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// KeyTable
// ============================================================================

/// Per-device keys with a fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyTable {
    /// Key used for devices without an entry.
    #[serde(default)]
    pub default_key: DeviceKey,
    /// Keys by MAC. Lookups are case-insensitive.
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceKey>,
}

impl KeyTable {
    /// Parse a table from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        let mut table: KeyTable = serde_yaml::from_str(text)?;
        table.devices = std::mem::take(&mut table.devices)
            .into_iter()
            .map(|(mac, key)| (normalize_mac(&mac), key))
            .collect();
        Ok(table)
    }

    /// Add or replace one device's key.
    pub fn insert(&mut self, mac: &str, key: DeviceKey) {
        self.devices.insert(normalize_mac(mac), key);
    }
}

impl KeyLookup for KeyTable {
    fn key_for(&self, mac: &str) -> Vec<u8> {
        match self.devices.get(&normalize_mac(mac)) {
            Some(key) => key.as_bytes().to_vec(),
            None => {
                log::trace!("no key for {:?}, using default", mac);
                self.default_key.as_bytes().to_vec()
            }
        }
    }
}

/// Upper-case hex with separators removed.
fn normalize_mac(mac: &str) -> String {
    mac.chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
