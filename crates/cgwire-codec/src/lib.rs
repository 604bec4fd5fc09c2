//! # cgwire-codec
//!
//! Codec for the binary telemetry protocol spoken by indoor air and probe
//! sensors.
//!
//! Uplinks arrive either as TLV frames (optionally escaped, fragmented and
//! AES encrypted) or as compact LoRa envelopes. Both decode into a
//! [`MessagePod`]. Downlink settings go the other way through
//! [`encode_frame`].
//!
//! ## Features
//!
//! - **Framing**: escape removal and fragment reassembly ([`escape`]),
//!   sum-checked TLV frames ([`tlv`]), CRC-16 LoRa envelopes ([`lora`])
//! - **Records**: per-tag decoders ([`dispatch`]) and reading layouts for
//!   each sensor family ([`sensor`])
//! - **Keys**: per-device AES keys through [`KeyLookup`], loadable from YAML
//!
//! ## Example
//!
//! ```
//! use cgwire_codec::{decode_tlv, encode_frame, MessagePod};
//!
//! let pod = MessagePod {
//!     debug: Some(1),
//!     ..Default::default()
//! };
//! let frame = encode_frame(&pod).unwrap();
//! assert_eq!(decode_tlv(&frame).unwrap().debug, Some(1));
//! ```

pub mod checksum;
pub mod cipher;
pub mod codec;
pub mod dispatch;
pub mod encode;
pub mod error;
pub mod escape;
pub mod keys;
pub mod lora;
pub mod pod;
pub mod sensor;
pub mod tags;
pub mod tlv;

mod field;

pub use codec::{decode_frame, decode_tlv, encode_frame, encrypt_frame};
pub use error::{CodecError, Result};
pub use keys::{DefaultKey, DeviceKey, KeyLookup, KeyTable};
pub use lora::{decode_lora_co2, decode_lora_full};
pub use pod::{FieldUpdate, MessagePod, Metric, Operator, SensorReading};
