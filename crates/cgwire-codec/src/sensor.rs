//! Sensor reading layouts.
//!
//! Readings come in three shapes, told apart by length and, for the Frog
//! probe loggers, a discriminator byte:
//!
//! | Length | Family  | Notes |
//! |--------|---------|-------|
//! | 6-8    | generic | pressure or probe temperature, optional probe humidity |
//! | 9-15   | Frog    | byte 3 selects the probe channel layout |
//! | 18-22  | Robb    | air quality channels, lumen width depends on length |
//!
//! All three start with the same 3-byte temperature/humidity pack, see
//! [`TempHumidity`].

use crate::error::{CodecError, Result};
use crate::field;
use crate::pod::SensorReading;

// ============================================================================
// Temperature / humidity pack
// ============================================================================

/// 24-bit joint temperature/humidity value.
///
/// ```text
/// bits 23..12  temperature, (t + 50.0) * 10
/// bits 11..0   humidity, h * 10
/// ```
///
/// TLV readings store it little-endian, LoRa readings big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempHumidity(u32);

impl TempHumidity {
    const MASK: u32 = 0x0FFF;

    /// Wrap a raw value; bits above 24 are dropped.
    pub fn from_raw(raw: u32) -> Self {
        TempHumidity(raw & 0x00FF_FFFF)
    }

    pub fn from_le_bytes(b: [u8; 3]) -> Self {
        TempHumidity(u32::from(b[0]) | u32::from(b[1]) << 8 | u32::from(b[2]) << 16)
    }

    pub fn from_be_bytes(b: [u8; 3]) -> Self {
        TempHumidity(u32::from(b[0]) << 16 | u32::from(b[1]) << 8 | u32::from(b[2]))
    }

    /// Pack degrees Celsius and percent, rounding to tenths.
    pub fn from_values(temperature: f64, humidity: f64) -> Result<Self> {
        let t = (temperature * 10.0 + 500.0).round();
        let h = (humidity * 10.0).round();
        let range = 0.0..=f64::from(Self::MASK);
        if !range.contains(&t) || !range.contains(&h) {
            return Err(CodecError::malformed(format!(
                "temperature {} / humidity {} out of packable range",
                temperature, humidity
            )));
        }
        Ok(TempHumidity((t as u32) << 12 | h as u32))
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn temperature(&self) -> f64 {
        (f64::from(self.0 >> 12) - 500.0) / 10.0
    }

    pub fn humidity(&self) -> f64 {
        f64::from(self.0 & Self::MASK) / 10.0
    }

    pub fn to_le_bytes(&self) -> [u8; 3] {
        let b = self.0.to_le_bytes();
        [b[0], b[1], b[2]]
    }

    pub fn to_be_bytes(&self) -> [u8; 3] {
        let b = self.0.to_be_bytes();
        [b[1], b[2], b[3]]
    }

    fn fill(&self, reading: &mut SensorReading) {
        reading.temperature = Some(self.temperature());
        reading.humidity = Some(self.humidity());
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Probe channel layout of a Frog reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrogProbe {
    /// Discriminator 1: CO2 percent in bytes 4..8.
    Co2Percent,
    /// Discriminators 2 and 3: probe temperature in bytes 4..8.
    Temperature,
    /// Discriminators 4 and 6: CO2 percent, plus a probe pair in 8..12 on
    /// 13/15-byte readings.
    Co2WithPair,
    /// Discriminator 5: probe pair in bytes 4..8.
    Pair,
    /// No probe channel.
    None(u8),
}

impl FrogProbe {
    pub fn from_discriminator(d: u8) -> Self {
        match d {
            1 => FrogProbe::Co2Percent,
            2 | 3 => FrogProbe::Temperature,
            4 | 6 => FrogProbe::Co2WithPair,
            5 => FrogProbe::Pair,
            other => FrogProbe::None(other),
        }
    }

    /// Byte written when encoding.
    pub fn discriminator(&self) -> u8 {
        match self {
            FrogProbe::Co2Percent => 1,
            FrogProbe::Temperature => 2,
            FrogProbe::Co2WithPair => 4,
            FrogProbe::Pair => 5,
            FrogProbe::None(d) => *d,
        }
    }
}

/// Reading layout family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFamily {
    Generic,
    Frog(FrogProbe),
    Robb,
}

/// Select the layout for a reading of `len` bytes whose fourth byte is
/// `discriminator`.
pub fn classify_family(len: usize, discriminator: u8) -> Result<SensorFamily> {
    match len {
        6..=8 => Ok(SensorFamily::Generic),
        9..=15 => Ok(SensorFamily::Frog(FrogProbe::from_discriminator(
            discriminator,
        ))),
        18..=22 => Ok(SensorFamily::Robb),
        _ => Err(CodecError::malformed(format!(
            "no reading layout is {} bytes long",
            len
        ))),
    }
}

/// Whether a reading is current or back-filled. Robb readings lay out
/// their tail differently for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingKind {
    Realtime,
    History,
}

// ============================================================================
// Decoders
// ============================================================================

fn tenths_i(raw: i32) -> f64 {
    f64::from(raw) / 10.0
}

fn tenths(raw: u16) -> f64 {
    f64::from(raw) / 10.0
}

/// Decode one reading, without its timestamp.
pub fn decode_reading(data: &[u8], kind: ReadingKind) -> Result<SensorReading> {
    let discriminator = data.get(3).copied().unwrap_or_default();
    match classify_family(data.len(), discriminator)? {
        SensorFamily::Generic => decode_generic(data),
        SensorFamily::Frog(probe) => decode_frog(data, probe),
        SensorFamily::Robb => decode_robb(data, kind),
    }
}

/// 6 to 8 bytes.
///
/// ```text
/// 0..3  temperature/humidity (LE)
/// 3..5  pressure * 100, or probe temperature when byte 4 is 0xF_
/// 5     battery
/// 6..8  probe humidity * 10, 0xFFFF when absent
/// ```
pub fn decode_generic(data: &[u8]) -> Result<SensorReading> {
    let mut reading = SensorReading::default();
    TempHumidity::from_le_bytes(field::array(data, 0)?).fill(&mut reading);

    let flag = field::u8_at(data, 4)?;
    if flag & 0xF0 == 0xF0 {
        let probe = u16::from(flag & 0x0F) << 8 | u16::from(field::u8_at(data, 3)?);
        if probe != 0x0FFF {
            reading.prob_temperature = Some((f64::from(probe) - 500.0) / 10.0);
        }
    } else {
        reading.pressure = Some(f64::from(field::u16_le(data, 3)?) / 100.0);
    }

    reading.battery = Some(i64::from(field::u8_at(data, 5)?));

    if data.len() == 8 {
        let humidity = field::u16_le(data, 6)?;
        if humidity != 0xFFFF {
            reading.prob_humidity = Some(tenths(humidity));
        }
    }
    Ok(reading)
}

/// 9 to 15 bytes.
///
/// ```text
/// 0..3   temperature/humidity (LE)
/// 3      probe discriminator
/// 4..8   probe value, i32 * 10 (or a probe pair, see FrogProbe)
/// 8      battery (9-12 byte readings)
/// 8..12  probe pair (13/15 byte readings)
/// 12     battery (13+ byte readings)
/// 9, 13  RSSI on 11 and 15 byte readings
/// ```
pub fn decode_frog(data: &[u8], probe: FrogProbe) -> Result<SensorReading> {
    let len = data.len();
    let mut reading = SensorReading::default();
    TempHumidity::from_le_bytes(field::array(data, 0)?).fill(&mut reading);

    let value = field::i32_le(data, 4)?;
    match probe {
        FrogProbe::Co2Percent => reading.co2_percent = Some(tenths_i(value)),
        FrogProbe::Temperature => reading.prob_temperature = Some(tenths_i(value)),
        FrogProbe::Co2WithPair => {
            reading.co2_percent = Some(tenths_i(value));
            if len == 13 || len == 15 {
                reading.prob_temperature = Some(tenths_i(field::i16_le(data, 8)?.into()));
                reading.prob_humidity = Some(tenths(field::u16_le(data, 10)?));
            } else {
                // Older firmware reports the probe in the onboard slots.
                reading.prob_temperature = reading.temperature.take();
                reading.prob_humidity = reading.humidity.take();
            }
        }
        FrogProbe::Pair => {
            reading.prob_temperature = Some(tenths_i(field::i16_le(data, 4)?.into()));
            reading.prob_humidity = Some(tenths(field::u16_le(data, 6)?));
        }
        FrogProbe::None(d) => log::trace!("frog reading without probe (discriminator {})", d),
    }

    let battery_at = if len >= 13 { 12 } else { 8 };
    reading.battery = Some(i64::from(field::u8_at(data, battery_at)?));

    let rssi_at = match len {
        11 => Some(9),
        15 => Some(13),
        _ => None,
    };
    if let Some(at) = rssi_at {
        reading.rssi = Some(i32::from(field::i8_at(data, at)?));
    }
    Ok(reading)
}

/// 18 to 22 bytes.
///
/// ```text
/// 0..3    temperature/humidity (LE)
/// 3..5    pressure * 100
/// 5..15   CO2, PM2.5, PM10, TVOC, noise (u16 LE each)
/// 15..    lumen, battery, RSSI (realtime only)
/// ```
///
/// Lumen is 16-bit in 18-byte history and 20-byte realtime readings and
/// 32-bit otherwise.
pub fn decode_robb(data: &[u8], kind: ReadingKind) -> Result<SensorReading> {
    let mut reading = SensorReading::default();
    TempHumidity::from_le_bytes(field::array(data, 0)?).fill(&mut reading);

    reading.pressure = Some(f64::from(field::u16_le(data, 3)?) / 100.0);
    reading.co2 = Some(f64::from(field::u16_le(data, 5)?));
    reading.pm25 = Some(f64::from(field::u16_le(data, 7)?));
    reading.pm10 = Some(f64::from(field::u16_le(data, 9)?));
    reading.tvoc = Some(f64::from(field::u16_le(data, 11)?));
    reading.noise = Some(f64::from(field::u16_le(data, 13)?));

    let short_len = match kind {
        ReadingKind::History => 18,
        ReadingKind::Realtime => 20,
    };
    let battery_at = if data.len() == short_len {
        reading.lumen = Some(f64::from(field::u16_le(data, 15)?));
        17
    } else {
        reading.lumen = Some(f64::from(field::u32_le(data, 15)?));
        19
    };
    reading.battery = Some(i64::from(field::u8_at(data, battery_at)?));

    if kind == ReadingKind::Realtime {
        reading.rssi = Some(i32::from(field::i8_at(data, battery_at + 1)?));
    }
    Ok(reading)
}

/// Decode a realtime record body: a u32 LE timestamp, then a reading.
///
/// The body length picks the reading's extent:
/// - 15, 19, 24, 26: everything after the timestamp
/// - otherwise: a 6-byte generic reading, RSSI at byte 10 when
///   `with_rssi` is set, and probe humidity at 12..14 on 14-byte bodies
pub fn decode_realtime(value: &[u8], with_rssi: bool) -> Result<SensorReading> {
    let timestamp = i64::from(field::u32_le(value, 0)?);
    let len = value.len();

    let mut reading = match len {
        15 | 19 | 24 | 26 => decode_reading(&value[4..], ReadingKind::Realtime)?,
        _ => {
            let mut reading = decode_generic(field::slice(value, 4, 6)?)?;
            if with_rssi {
                if let Some(&rssi) = value.get(10) {
                    reading.rssi = Some(i32::from(rssi as i8));
                }
            }
            reading
        }
    };

    if len == 14 {
        let humidity = field::u16_le(value, 12)?;
        if humidity != 0xFFFF {
            reading.prob_humidity = Some(tenths(humidity));
        }
    }

    Ok(reading.at(timestamp))
}

/// Decode a history record body.
///
/// ```text
/// 0..4  base timestamp (u32 LE)
/// 4..6  interval seconds (u16 LE)
/// 6..   readings of `unit_len` bytes
/// ```
///
/// Reading `i` is stamped `base + i * interval`. A trailing partial unit is
/// dropped.
pub fn decode_history(value: &[u8], unit_len: usize) -> Result<Vec<SensorReading>> {
    if unit_len == 0 {
        return Err(CodecError::malformed("history unit length is zero"));
    }
    let base = i64::from(field::u32_le(value, 0)?);
    let interval = i64::from(field::u16_le(value, 4)?);

    let units = value[6..].chunks_exact(unit_len);
    if !units.remainder().is_empty() {
        log::debug!(
            "ignoring {} trailing history bytes (unit {})",
            units.remainder().len(),
            unit_len
        );
    }

    units
        .enumerate()
        .map(|(i, unit)| {
            let reading = decode_reading(unit, ReadingKind::History)?;
            Ok(reading.at(base + i as i64 * interval))
        })
        .collect()
}

// ============================================================================
// Encoders
// ============================================================================

fn required(value: Option<f64>, name: &str) -> Result<f64> {
    value.ok_or_else(|| CodecError::malformed(format!("reading has no {}", name)))
}

fn scaled_u16(value: f64, scale: f64, name: &str) -> Result<u16> {
    let raw = (value * scale).round();
    if !(0.0..=f64::from(u16::MAX)).contains(&raw) {
        return Err(CodecError::malformed(format!("{} {} out of range", name, value)));
    }
    Ok(raw as u16)
}

fn scaled_i16(value: f64, scale: f64, name: &str) -> Result<i16> {
    let raw = (value * scale).round();
    if !(f64::from(i16::MIN)..=f64::from(i16::MAX)).contains(&raw) {
        return Err(CodecError::malformed(format!("{} {} out of range", name, value)));
    }
    Ok(raw as i16)
}

fn scaled_i32(value: f64, scale: f64, name: &str) -> Result<i32> {
    let raw = (value * scale).round();
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&raw) {
        return Err(CodecError::malformed(format!("{} {} out of range", name, value)));
    }
    Ok(raw as i32)
}

fn battery_byte(reading: &SensorReading) -> Result<u8> {
    let battery = reading
        .battery
        .ok_or_else(|| CodecError::malformed("reading has no battery"))?;
    u8::try_from(battery)
        .map_err(|_| CodecError::malformed(format!("battery {} out of range", battery)))
}

fn th_of(reading: &SensorReading) -> Result<TempHumidity> {
    TempHumidity::from_values(
        required(reading.temperature, "temperature")?,
        required(reading.humidity, "humidity")?,
    )
}

/// Inverse of [`decode_generic`]. Probe humidity selects the 8-byte form.
pub fn encode_generic(reading: &SensorReading) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(8);
    out.extend_from_slice(&th_of(reading)?.to_le_bytes());

    match (reading.prob_temperature, reading.pressure) {
        (Some(t), _) => {
            let raw = scaled_u16(t + 50.0, 10.0, "probe temperature")?;
            if raw >= 0x0FFF {
                return Err(CodecError::malformed(format!("probe temperature {} out of range", t)));
            }
            out.push((raw & 0xFF) as u8);
            out.push(0xF0 | (raw >> 8) as u8);
        }
        (None, Some(p)) => {
            let raw = scaled_u16(p, 100.0, "pressure")?;
            if raw >> 12 == 0xF {
                return Err(CodecError::malformed(format!(
                    "pressure {} collides with probe flag",
                    p
                )));
            }
            out.extend_from_slice(&raw.to_le_bytes());
        }
        (None, None) => out.extend_from_slice(&[0xFF, 0xFF]),
    }

    out.push(battery_byte(reading)?);

    if let Some(h) = reading.prob_humidity {
        out.extend_from_slice(&scaled_u16(h, 10.0, "probe humidity")?.to_le_bytes());
    }
    Ok(out)
}

/// Inverse of [`decode_frog`] in the 13-byte layout, or 15 bytes when the
/// reading has an RSSI.
pub fn encode_frog(reading: &SensorReading, probe: FrogProbe) -> Result<Vec<u8>> {
    let mut out = vec![0u8; 13];
    out[..3].copy_from_slice(&th_of(reading)?.to_le_bytes());
    out[3] = probe.discriminator();

    match probe {
        FrogProbe::Co2Percent => {
            let v = scaled_i32(required(reading.co2_percent, "co2 percent")?, 10.0, "co2 percent")?;
            out[4..8].copy_from_slice(&v.to_le_bytes());
        }
        FrogProbe::Temperature => {
            let v = required(reading.prob_temperature, "probe temperature")?;
            out[4..8].copy_from_slice(&scaled_i32(v, 10.0, "probe temperature")?.to_le_bytes());
        }
        FrogProbe::Co2WithPair => {
            let v = scaled_i32(required(reading.co2_percent, "co2 percent")?, 10.0, "co2 percent")?;
            out[4..8].copy_from_slice(&v.to_le_bytes());
            let t = required(reading.prob_temperature, "probe temperature")?;
            let h = required(reading.prob_humidity, "probe humidity")?;
            out[8..10].copy_from_slice(&scaled_i16(t, 10.0, "probe temperature")?.to_le_bytes());
            out[10..12].copy_from_slice(&scaled_u16(h, 10.0, "probe humidity")?.to_le_bytes());
        }
        FrogProbe::Pair => {
            let t = required(reading.prob_temperature, "probe temperature")?;
            let h = required(reading.prob_humidity, "probe humidity")?;
            out[4..6].copy_from_slice(&scaled_i16(t, 10.0, "probe temperature")?.to_le_bytes());
            out[6..8].copy_from_slice(&scaled_u16(h, 10.0, "probe humidity")?.to_le_bytes());
        }
        FrogProbe::None(_) => {}
    }

    out[12] = battery_byte(reading)?;
    if let Some(rssi) = reading.rssi {
        let rssi = i8::try_from(rssi)
            .map_err(|_| CodecError::malformed(format!("rssi {} out of range", rssi)))?;
        out.push(rssi as u8);
        out.push(0);
    }
    Ok(out)
}

/// Inverse of [`decode_robb`] with a 32-bit lumen: 20 bytes for history,
/// 21 for realtime.
pub fn encode_robb(reading: &SensorReading, kind: ReadingKind) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(21);
    out.extend_from_slice(&th_of(reading)?.to_le_bytes());
    let pressure = required(reading.pressure, "pressure")?;
    out.extend_from_slice(&scaled_u16(pressure, 100.0, "pressure")?.to_le_bytes());
    for (value, name) in [
        (reading.co2, "co2"),
        (reading.pm25, "pm25"),
        (reading.pm10, "pm10"),
        (reading.tvoc, "tvoc"),
        (reading.noise, "noise"),
    ] {
        out.extend_from_slice(&scaled_u16(required(value, name)?, 1.0, name)?.to_le_bytes());
    }

    let lumen = required(reading.lumen, "lumen")?.round();
    if !(0.0..=f64::from(u32::MAX)).contains(&lumen) {
        return Err(CodecError::malformed(format!("lumen {} out of range", lumen)));
    }
    out.extend_from_slice(&(lumen as u32).to_le_bytes());
    out.push(battery_byte(reading)?);

    if kind == ReadingKind::Realtime {
        let rssi = reading.rssi.unwrap_or_default();
        let rssi = i8::try_from(rssi)
            .map_err(|_| CodecError::malformed(format!("rssi {} out of range", rssi)))?;
        out.push(rssi as u8);
    }
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_th_pack_le_and_be() {
        let th = TempHumidity::from_le_bytes([0x07, 0x33, 0x2E]);
        assert_abs_diff_eq!(th.temperature(), 23.9, epsilon = 1e-9);
        assert_abs_diff_eq!(th.humidity(), 77.5, epsilon = 1e-9);

        let th = TempHumidity::from_be_bytes([0x2F, 0xF2, 0xF5]);
        assert_abs_diff_eq!(th.temperature(), 26.7, epsilon = 1e-9);
        assert_abs_diff_eq!(th.humidity(), 75.7, epsilon = 1e-9);
        assert_eq!(th.to_be_bytes(), [0x2F, 0xF2, 0xF5]);
        assert_eq!(TempHumidity::from_le_bytes(th.to_le_bytes()), th);
    }

    #[test]
    fn test_th_pack_edges() {
        let th = TempHumidity::from_raw(0);
        assert_eq!(th.temperature(), -50.0);
        assert_eq!(th.humidity(), 0.0);

        let th = TempHumidity::from_raw(0xFF_FFFF);
        assert_abs_diff_eq!(th.temperature(), 359.5, epsilon = 1e-9);
        assert_abs_diff_eq!(th.humidity(), 409.5, epsilon = 1e-9);

        assert!(TempHumidity::from_values(-50.1, 10.0).is_err());
        assert!(TempHumidity::from_values(20.0, 409.6).is_err());
        assert_eq!(TempHumidity::from_values(-50.0, 0.0).unwrap().raw(), 0);
    }

    #[test]
    fn test_classify_family() {
        assert_eq!(classify_family(6, 0).unwrap(), SensorFamily::Generic);
        assert_eq!(classify_family(8, 0).unwrap(), SensorFamily::Generic);
        assert_eq!(
            classify_family(13, 4).unwrap(),
            SensorFamily::Frog(FrogProbe::Co2WithPair)
        );
        assert_eq!(
            classify_family(9, 3).unwrap(),
            SensorFamily::Frog(FrogProbe::Temperature)
        );
        assert_eq!(classify_family(20, 0).unwrap(), SensorFamily::Robb);
        for len in [0, 5, 16, 17, 23] {
            assert!(matches!(
                classify_family(len, 0),
                Err(CodecError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn test_generic_pressure() {
        // Pressure raw 0x2710 = 100.00
        let data = [0x07, 0x33, 0x2E, 0x10, 0x27, 0x5A];
        let reading = decode_generic(&data).unwrap();
        assert_abs_diff_eq!(reading.pressure.unwrap(), 100.0, epsilon = 1e-9);
        assert_eq!(reading.battery, Some(90));
        assert_eq!(reading.prob_temperature, None);
        assert_eq!(reading.prob_humidity, None);
    }

    #[test]
    fn test_generic_probe_temperature() {
        // Probe raw 0x2E7 = 743 -> 24.3
        let data = [0x07, 0x33, 0x2E, 0xE7, 0xF2, 0x64, 0x5E, 0x01];
        let reading = decode_generic(&data).unwrap();
        assert_abs_diff_eq!(reading.prob_temperature.unwrap(), 24.3, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.prob_humidity.unwrap(), 35.0, epsilon = 1e-9);
        assert_eq!(reading.pressure, None);

        // 0xFFF means no probe attached.
        let data = [0x07, 0x33, 0x2E, 0xFF, 0xFF, 0x64, 0xFF, 0xFF];
        let reading = decode_generic(&data).unwrap();
        assert_eq!(reading.prob_temperature, None);
        assert_eq!(reading.pressure, None);
        assert_eq!(reading.prob_humidity, None);
    }

    #[test]
    fn test_frog_new_firmware() {
        let data = hex::decode("49e22f041c0000003202090100cf00").unwrap();
        let reading = decode_reading(&data, ReadingKind::Realtime).unwrap();
        assert_abs_diff_eq!(reading.temperature.unwrap(), 26.6, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.co2_percent.unwrap(), 2.8, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.prob_temperature.unwrap(), 56.2, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.prob_humidity.unwrap(), 26.5, epsilon = 1e-9);
        assert_eq!(reading.battery, Some(0));
        assert_eq!(reading.rssi, Some(-49));
    }

    #[test]
    fn test_frog_old_firmware_moves_onboard() {
        let data = [0x07, 0x33, 0x2E, 0x06, 0x0A, 0x00, 0x00, 0x00, 0x50, 0xC4, 0x00];
        let reading = decode_reading(&data, ReadingKind::History).unwrap();
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.humidity, None);
        assert_abs_diff_eq!(reading.prob_temperature.unwrap(), 23.9, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.prob_humidity.unwrap(), 77.5, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.co2_percent.unwrap(), 1.0, epsilon = 1e-9);
        assert_eq!(reading.battery, Some(80));
        assert_eq!(reading.rssi, Some(-60));
    }

    #[test]
    fn test_frog_pair_negative_probe() {
        let mut data = vec![0x07, 0x33, 0x2E, 0x05];
        data.extend_from_slice(&(-125i16).to_le_bytes());
        data.extend_from_slice(&456u16.to_le_bytes());
        data.push(77);
        let reading = decode_reading(&data, ReadingKind::History).unwrap();
        assert_abs_diff_eq!(reading.prob_temperature.unwrap(), -12.5, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.prob_humidity.unwrap(), 45.6, epsilon = 1e-9);
        assert_eq!(reading.battery, Some(77));
        assert_eq!(reading.rssi, None);
    }

    #[test]
    fn test_robb_lumen_width() {
        let reading = SensorReading {
            temperature: Some(21.5),
            humidity: Some(40.0),
            pressure: Some(101.3),
            co2: Some(650.0),
            pm25: Some(12.0),
            pm10: Some(20.0),
            tvoc: Some(80.0),
            noise: Some(35.0),
            lumen: Some(70000.0),
            battery: Some(255),
            rssi: Some(-70),
            ..Default::default()
        };

        let realtime = encode_robb(&reading, ReadingKind::Realtime).unwrap();
        assert_eq!(realtime.len(), 21);
        assert_eq!(decode_robb(&realtime, ReadingKind::Realtime).unwrap(), reading);

        let history = encode_robb(&reading, ReadingKind::History).unwrap();
        assert_eq!(history.len(), 20);
        let decoded = decode_robb(&history, ReadingKind::History).unwrap();
        assert_eq!(decoded.lumen, Some(70000.0));
        assert_eq!(decoded.rssi, None);

        // 18-byte history and 20-byte realtime carry a 16-bit lumen.
        let mut short = history[..15].to_vec();
        short.extend_from_slice(&[0x10, 0x27, 0x32]);
        let decoded = decode_robb(&short, ReadingKind::History).unwrap();
        assert_eq!(decoded.lumen, Some(10000.0));
        assert_eq!(decoded.battery, Some(50));

        short.extend_from_slice(&[0xC4, 0x00]);
        let decoded = decode_robb(&short, ReadingKind::Realtime).unwrap();
        assert_eq!(decoded.lumen, Some(10000.0));
        assert_eq!(decoded.rssi, Some(-60));
    }

    #[test]
    fn test_realtime_tlv_body() {
        let value = hex::decode("a82b0f6707332e00003ae600").unwrap();
        let reading = decode_realtime(&value, true).unwrap();
        assert_eq!(reading.timestamp, 1729047464);
        assert_abs_diff_eq!(reading.temperature.unwrap(), 23.9, epsilon = 1e-9);
        assert_eq!(reading.pressure, Some(0.0));
        assert_eq!(reading.battery, Some(58));
        assert_eq!(reading.rssi, Some(-26));

        let reading = decode_realtime(&value, false).unwrap();
        assert_eq!(reading.rssi, None);
    }

    #[test]
    fn test_realtime_probe_humidity_tail() {
        let mut value = hex::decode("a82b0f6707332e00003ae600").unwrap();
        value.extend_from_slice(&612u16.to_le_bytes());
        let reading = decode_realtime(&value, true).unwrap();
        assert_abs_diff_eq!(reading.prob_humidity.unwrap(), 61.2, epsilon = 1e-9);

        value[12] = 0xFF;
        value[13] = 0xFF;
        assert_eq!(decode_realtime(&value, true).unwrap().prob_humidity, None);
    }

    #[test]
    fn test_history_timestamps() {
        let unit = encode_generic(&SensorReading {
            temperature: Some(20.0),
            humidity: Some(50.0),
            pressure: Some(101.3),
            battery: Some(99),
            ..Default::default()
        })
        .unwrap();

        let mut value = 1_700_000_000u32.to_le_bytes().to_vec();
        value.extend_from_slice(&600u16.to_le_bytes());
        for _ in 0..3 {
            value.extend_from_slice(&unit);
        }
        value.extend_from_slice(&[0x01, 0x02]);

        let readings = decode_history(&value, 6).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].timestamp, 1_700_000_000);
        assert_eq!(readings[2].timestamp, 1_700_001_200);
        assert_eq!(readings[2].time, "2023-11-14 22:33:20");
        assert_abs_diff_eq!(readings[1].pressure.unwrap(), 101.3, epsilon = 1e-9);
    }

    #[test]
    fn test_generic_encode_roundtrip() {
        let reading = SensorReading {
            temperature: Some(-5.5),
            humidity: Some(12.3),
            prob_temperature: Some(-20.1),
            prob_humidity: Some(88.8),
            battery: Some(42),
            ..Default::default()
        };
        let data = encode_generic(&reading).unwrap();
        assert_eq!(data.len(), 8);
        let decoded = decode_generic(&data).unwrap();
        assert_abs_diff_eq!(decoded.temperature.unwrap(), -5.5, epsilon = 1e-9);
        assert_abs_diff_eq!(decoded.prob_temperature.unwrap(), -20.1, epsilon = 1e-9);
        assert_abs_diff_eq!(decoded.prob_humidity.unwrap(), 88.8, epsilon = 1e-9);
        assert_eq!(decoded.battery, Some(42));
    }

    #[test]
    fn test_frog_encode_roundtrip() {
        let reading = SensorReading {
            temperature: Some(22.0),
            humidity: Some(45.0),
            co2_percent: Some(3.4),
            prob_temperature: Some(37.5),
            prob_humidity: Some(90.1),
            battery: Some(64),
            rssi: Some(-88),
            ..Default::default()
        };
        let data = encode_frog(&reading, FrogProbe::Co2WithPair).unwrap();
        assert_eq!(data.len(), 15);
        let decoded = decode_reading(&data, ReadingKind::Realtime).unwrap();
        assert_abs_diff_eq!(decoded.co2_percent.unwrap(), 3.4, epsilon = 1e-9);
        assert_abs_diff_eq!(decoded.prob_temperature.unwrap(), 37.5, epsilon = 1e-9);
        assert_abs_diff_eq!(decoded.prob_humidity.unwrap(), 90.1, epsilon = 1e-9);
        assert_eq!(decoded.battery, Some(64));
        assert_eq!(decoded.rssi, Some(-88));
    }

    #[test]
    fn test_short_reading_errors() {
        assert!(decode_generic(&[0x00; 5]).is_err());
        assert!(matches!(
            decode_reading(&[0x00; 17], ReadingKind::History),
            Err(CodecError::MalformedInput(_))
        ));
        assert!(matches!(
            decode_robb(&[0x00; 19], ReadingKind::Realtime),
            Err(CodecError::BufferUnderrun { .. })
        ));
    }
}
