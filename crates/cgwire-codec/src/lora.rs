//! LoRa uplink decoders.
//!
//! Both LoRa product lines share one envelope, checked with CRC-16:
//!
//! ```text
//! +------+-----+-----+-----------------+--------+
//! | (..) | cmd | len | payload[0..len] | crc16  |
//! +------+-----+-----+-----------------+--------+
//! ```
//!
//! A data payload (`cmd` 0x41) starts with a flag byte:
//!
//! ```text
//! 1  realtime   ts(4, BE) unit [extras]
//! 0  history    base ts(4, BE) interval(2, BE) unit unit ...
//! ```
//!
//! Units are 6 bytes on PheasantCo2 devices and 20 bytes on Robb devices,
//! all fields big-endian.

use crate::checksum;
use crate::error::{CodecError, Result};
use crate::field;
use crate::pod::{FieldUpdate, MessagePod, SensorReading};
use crate::sensor::TempHumidity;

/// Sensor data upload.
pub const LORA_DATA: u8 = 0x41;

const FLAG_HISTORY: u8 = 0;
const FLAG_REALTIME: u8 = 1;

/// Envelope bytes before the payload.
const ENVELOPE_HEADER_LEN: usize = 3;

/// Trailing CRC.
const CRC_LEN: usize = 2;

/// One LoRa product line's unit layout.
struct Layout {
    unit_len: usize,
    decode_unit: fn(&[u8]) -> Result<SensorReading>,
    realtime_extras: fn(&[u8], &mut MessagePod),
}

const PHEASANT_CO2: Layout = Layout {
    unit_len: 6,
    decode_unit: pheasant_unit,
    realtime_extras: pheasant_extras,
};

const ROBB: Layout = Layout {
    unit_len: 20,
    decode_unit: robb_unit,
    realtime_extras: robb_extras,
};

/// Decode a PheasantCo2 LoRa uplink.
pub fn decode_lora_co2(raw: &[u8]) -> Result<MessagePod> {
    decode_envelope(raw, &PHEASANT_CO2)
}

/// Decode a Robb LoRa uplink.
pub fn decode_lora_full(raw: &[u8]) -> Result<MessagePod> {
    decode_envelope(raw, &ROBB)
}

fn decode_envelope(raw: &[u8], layout: &Layout) -> Result<MessagePod> {
    checksum::verify_crc16(raw)?;

    let command = field::u8_at(raw, 1)?;
    let len = usize::from(field::u8_at(raw, 2)?);
    let available = raw.len().saturating_sub(ENVELOPE_HEADER_LEN + CRC_LEN);
    if len > available {
        return Err(CodecError::truncated(0, len, available));
    }
    let payload = &raw[ENVELOPE_HEADER_LEN..ENVELOPE_HEADER_LEN + len];

    let mut pod = MessagePod::with_command(command);
    if command != LORA_DATA {
        log::debug!("lora command {:#04x} carries no readings", command);
        return Ok(pod);
    }

    match field::u8_at(payload, 0)? {
        FLAG_REALTIME => {
            let timestamp = i64::from(field::u32_be(payload, 1)?);
            let unit = field::slice(payload, 5, layout.unit_len)?;
            pod.realtime = Some((layout.decode_unit)(unit)?.at(timestamp));
            (layout.realtime_extras)(payload, &mut pod);
        }
        FLAG_HISTORY => {
            let base = i64::from(field::u32_be(payload, 1)?);
            let interval = i64::from(field::u16_be(payload, 5)?);
            let units = &payload[7..];
            if units.len() % layout.unit_len != 0 {
                return Err(CodecError::truncated(
                    7 + units.len() / layout.unit_len * layout.unit_len,
                    layout.unit_len,
                    units.len() % layout.unit_len,
                ));
            }
            pod.history = units
                .chunks_exact(layout.unit_len)
                .enumerate()
                .map(|(i, unit)| Ok((layout.decode_unit)(unit)?.at(base + i as i64 * interval)))
                .collect::<Result<_>>()?;
        }
        flag => log::debug!("lora data flag {} not understood", flag),
    }
    Ok(pod)
}

fn decode_th(unit: &[u8], reading: &mut SensorReading) -> Result<()> {
    let th = TempHumidity::from_be_bytes(field::array(unit, 0)?);
    reading.temperature = Some(th.temperature());
    reading.humidity = Some(th.humidity());
    Ok(())
}

/// temp/hum(3) co2(2) battery(1)
fn pheasant_unit(unit: &[u8]) -> Result<SensorReading> {
    let mut reading = SensorReading::default();
    decode_th(unit, &mut reading)?;
    reading.co2 = Some(f64::from(field::u16_be(unit, 3)?));
    reading.battery = Some(i64::from(field::u8_at(unit, 5)?));
    Ok(reading)
}

fn pheasant_extras(payload: &[u8], pod: &mut MessagePod) {
    if let Some(version) = payload.get(11..).filter(|v| !v.is_empty()) {
        pod.apply(FieldUpdate::FirmwareVersion(
            String::from_utf8_lossy(version).into_owned(),
        ));
    }
}

/// temp/hum(3) pressure(2, unused) co2 pm25 pm10 tvoc noise(2 each)
/// lumen(4) battery(1)
fn robb_unit(unit: &[u8]) -> Result<SensorReading> {
    let mut reading = SensorReading::default();
    decode_th(unit, &mut reading)?;
    reading.co2 = Some(f64::from(field::u16_be(unit, 5)?));
    reading.pm25 = Some(f64::from(field::u16_be(unit, 7)?));
    reading.pm10 = Some(f64::from(field::u16_be(unit, 9)?));
    reading.tvoc = Some(f64::from(field::u16_be(unit, 11)?));
    reading.noise = Some(f64::from(field::u16_be(unit, 13)?));
    reading.lumen = Some(f64::from(field::u32_be(unit, 15)?));
    reading.battery = Some(i64::from(field::u8_at(unit, 19)?));
    Ok(reading)
}

/// usb(1) at 25, PM sensor serial(4) at 26, firmware(5) at 31.
fn robb_extras(payload: &[u8], pod: &mut MessagePod) {
    if let Some(&usb) = payload.get(25) {
        pod.apply(FieldUpdate::UsbPlugin(u64::from(usb)));
    }
    if let Some(sn) = payload.get(26..30) {
        pod.apply(FieldUpdate::PmSn(hex::encode_upper(sn)));
    }
    if let Some(version) = payload.get(31..36) {
        pod.apply(FieldUpdate::FirmwareVersion(
            String::from_utf8_lossy(version).into_owned(),
        ));
    }
}
