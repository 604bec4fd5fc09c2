//! Sub-record tags and the fixed tables built on them.
//!
//! All tables here are `match` expressions, so they are immutable and need
//! no initialisation.

use crate::error::{CodecError, Result};
use crate::pod::{Metric, Operator};

// ============================================================================
// Tag values
// ============================================================================

/// Device id (MAC).
pub const DEVICE_ID: u8 = 0x01;
/// Device serial number.
pub const DEVICE_SN: u8 = 0x02;
/// History readings.
pub const HISTORY: u8 = 0x03;
/// Report interval, minutes.
pub const REPORT_INTERVAL: u8 = 0x04;
/// Collect interval, seconds.
pub const COLLECT_INTERVAL: u8 = 0x05;
/// BLE advertising interval.
pub const BLE_INTERVAL: u8 = 0x06;
pub const ALERT_TEMPERATURE_GT: u8 = 0x07;
pub const ALERT_TEMPERATURE_LT: u8 = 0x08;
pub const ALERT_HUMIDITY_GT: u8 = 0x0A;
pub const ALERT_HUMIDITY_LT: u8 = 0x0B;
pub const ALERT_PRESSURE_GT: u8 = 0x0D;
pub const ALERT_PRESSURE_LT: u8 = 0x0E;
/// Firmware version string.
pub const FIRMWARE_VERSION: u8 = 0x11;
/// Firmware download URL.
pub const FIRMWARE_URL: u8 = 0x12;
/// Realtime reading.
pub const REALTIME: u8 = 0x14;
/// Device clock.
pub const TIMESTAMP: u8 = 0x15;
/// SIM card number.
pub const SIM: u8 = 0x16;
pub const ALERT_BATTERY_LT: u8 = 0x17;
/// Temperature display unit.
pub const TEMPERATURE_UNIT: u8 = 0x19;
pub const HARDWARE_VERSION: u8 = 0x1A;
/// Alert repeat duration.
pub const ALERT_DURATION: u8 = 0x1B;
/// Session end marker.
pub const END_FLAG: u8 = 0x1D;
/// Wi-Fi credentials.
pub const WIFI: u8 = 0x20;
pub const DEBUG: u8 = 0x21;
/// MQTT connection string.
pub const MQTT: u8 = 0x25;
/// Data encryption certificate.
pub const SECRET_KEY: u8 = 0x28;
pub const ALERT_PROB_TEMPERATURE_GT: u8 = 0x29;
pub const ALERT_PROB_TEMPERATURE_LT: u8 = 0x2A;
/// USB power state.
pub const USB_PLUGIN: u8 = 0x2C;
/// Temperature and humidity offsets.
pub const TH_OFFSET: u8 = 0x2F;
pub const PROBE_OFFSET: u8 = 0x30;
pub const PRESSURE_OFFSET: u8 = 0x31;
pub const PROBE: u8 = 0x32;
/// History readings with probe humidity.
pub const HISTORY_WITH_PROBE: u8 = 0x33;
pub const MODULE_VERSION: u8 = 0x34;
pub const MCU_VERSION: u8 = 0x35;
pub const BLE_NAME: u8 = 0x36;
pub const PRODUCT_ID: u8 = 0x38;
pub const ALERT_CO2_GT: u8 = 0x39;
pub const ALERT_CO2_LT: u8 = 0x3A;
/// CO2 sensor sampling interval, minutes.
pub const CO2_COLLECT_INTERVAL: u8 = 0x3B;
pub const DATA_LEVEL_CO2: u8 = 0x3C;
/// Shutdown delay on battery, minutes.
pub const BATTERY_SHUTDOWN: u8 = 0x3D;
pub const CO2_OFFSET: u8 = 0x3F;
/// CO2 automatic baseline calibration.
pub const CO2_ASC: u8 = 0x40;
/// CO2 manual calibration.
pub const CO2_RESET: u8 = 0x41;
pub const REALTIME_DATA_DURATION: u8 = 0x42;
pub const NTP_HOST: u8 = 0x43;
pub const NTP_ENABLE: u8 = 0x44;
pub const CO2_OFFSET_VALUE: u8 = 0x45;
pub const TEMPERATURE_OFFSET_VALUE: u8 = 0x46;
pub const TEMPERATURE_OFFSET_PERCENT: u8 = 0x47;
pub const HUMIDITY_OFFSET_VALUE: u8 = 0x48;
pub const HUMIDITY_OFFSET_PERCENT: u8 = 0x49;
pub const CO2_STATUS: u8 = 0x4A;
pub const DATA_LEVEL_TEMPERATURE: u8 = 0x4F;
pub const DATA_LEVEL_HUMIDITY: u8 = 0x50;
pub const DATA_LEVEL_PM25: u8 = 0x51;
pub const DATA_LEVEL_PM10: u8 = 0x52;
pub const DATA_LEVEL_TVOC: u8 = 0x53;
pub const DATA_LEVEL_NOISE: u8 = 0x54;
pub const DATA_LEVEL_LUMEN: u8 = 0x55;
pub const DATA_LEVEL_PRESSURE: u8 = 0x56;
pub const ALERT_TVOC_GT: u8 = 0x57;
pub const ALERT_TVOC_LT: u8 = 0x58;
pub const ALERT_PM25_GT: u8 = 0x59;
pub const ALERT_PM25_LT: u8 = 0x5A;
pub const ALERT_PM10_GT: u8 = 0x5B;
pub const ALERT_PM10_LT: u8 = 0x5C;
pub const ALERT_NOISE_GT: u8 = 0x5D;
pub const ALERT_NOISE_LT: u8 = 0x5E;
pub const ALERT_LUMEN_GT: u8 = 0x5F;
pub const ALERT_LUMEN_LT: u8 = 0x60;
/// Particulate sensor serial.
pub const PM_SN: u8 = 0x61;
/// TVOC display unit.
pub const TVOC_UNIT: u8 = 0x62;
/// Backlight level.
pub const LIGHT: u8 = 0x63;
/// Frogs-format alert, above threshold.
pub const FROGS_ALERT_GT: u8 = 0x68;
/// Frogs-format alert, below threshold.
pub const FROGS_ALERT_LT: u8 = 0x69;
pub const NEED_ACK: u8 = 0x6A;

/// Command byte of a frame reporting an alert event.
pub const COMMAND_ALERT_EVENT: u8 = 0x34;

// ============================================================================
// Alerts
// ============================================================================

/// Metric and direction of a threshold alert tag.
pub fn alert_for_tag(tag: u8) -> Option<(Metric, Operator)> {
    use Metric::*;
    use Operator::*;

    let entry = match tag {
        ALERT_TEMPERATURE_GT => (Temperature, Gt),
        ALERT_TEMPERATURE_LT => (Temperature, Lt),
        ALERT_HUMIDITY_GT => (Humidity, Gt),
        ALERT_HUMIDITY_LT => (Humidity, Lt),
        ALERT_PRESSURE_GT => (Pressure, Gt),
        ALERT_PRESSURE_LT => (Pressure, Lt),
        ALERT_PROB_TEMPERATURE_GT => (ProbTemperature, Gt),
        ALERT_PROB_TEMPERATURE_LT => (ProbTemperature, Lt),
        ALERT_CO2_GT => (Co2, Gt),
        ALERT_CO2_LT => (Co2, Lt),
        ALERT_TVOC_GT => (Tvoc, Gt),
        ALERT_TVOC_LT => (Tvoc, Lt),
        ALERT_PM25_GT => (Pm25, Gt),
        ALERT_PM25_LT => (Pm25, Lt),
        ALERT_PM10_GT => (Pm10, Gt),
        ALERT_PM10_LT => (Pm10, Lt),
        ALERT_NOISE_GT => (Noise, Gt),
        ALERT_NOISE_LT => (Noise, Lt),
        ALERT_LUMEN_GT => (Lumen, Gt),
        ALERT_LUMEN_LT => (Lumen, Lt),
        ALERT_BATTERY_LT => (Battery, Lt),
        _ => return None,
    };
    Some(entry)
}

/// Inverse of [`alert_for_tag`].
pub fn tag_for_alert(metric: Metric, operator: Operator) -> Option<u8> {
    use Metric::*;
    use Operator::*;

    let tag = match (metric, operator) {
        (Temperature, Gt) => ALERT_TEMPERATURE_GT,
        (Temperature, Lt) => ALERT_TEMPERATURE_LT,
        (Humidity, Gt) => ALERT_HUMIDITY_GT,
        (Humidity, Lt) => ALERT_HUMIDITY_LT,
        (Pressure, Gt) => ALERT_PRESSURE_GT,
        (Pressure, Lt) => ALERT_PRESSURE_LT,
        (ProbTemperature, Gt) => ALERT_PROB_TEMPERATURE_GT,
        (ProbTemperature, Lt) => ALERT_PROB_TEMPERATURE_LT,
        (Co2, Gt) => ALERT_CO2_GT,
        (Co2, Lt) => ALERT_CO2_LT,
        (Tvoc, Gt) => ALERT_TVOC_GT,
        (Tvoc, Lt) => ALERT_TVOC_LT,
        (Pm25, Gt) => ALERT_PM25_GT,
        (Pm25, Lt) => ALERT_PM25_LT,
        (Pm10, Gt) => ALERT_PM10_GT,
        (Pm10, Lt) => ALERT_PM10_LT,
        (Noise, Gt) => ALERT_NOISE_GT,
        (Noise, Lt) => ALERT_NOISE_LT,
        (Lumen, Gt) => ALERT_LUMEN_GT,
        (Lumen, Lt) => ALERT_LUMEN_LT,
        (Battery, Lt) => ALERT_BATTERY_LT,
        _ => return None,
    };
    Some(tag)
}

/// Frogs sensor selector: (probe flag, sensor type).
pub fn frogs_sensor(metric: Metric) -> Option<(u8, u8)> {
    match metric {
        Metric::Temperature => Some((0, 0x01)),
        Metric::Humidity => Some((0, 0x02)),
        Metric::ProbTemperature => Some((1, 0x01)),
        Metric::ProbHumidity => Some((1, 0x02)),
        Metric::Co2Percent => Some((1, 0x0B)),
        Metric::Battery => Some((0, 0x14)),
        _ => None,
    }
}

/// Inverse of [`frogs_sensor`]. The probe flag is ignored for battery.
pub fn frogs_metric(probe: u8, sensor_type: u8) -> Option<Metric> {
    match (sensor_type, probe == 1) {
        (0x01, false) => Some(Metric::Temperature),
        (0x01, true) => Some(Metric::ProbTemperature),
        (0x02, false) => Some(Metric::Humidity),
        (0x02, true) => Some(Metric::ProbHumidity),
        (0x0B, true) => Some(Metric::Co2Percent),
        (0x14, _) => Some(Metric::Battery),
        _ => None,
    }
}

/// Operator of a Frogs alert tag.
pub fn frogs_operator(tag: u8) -> Operator {
    if tag == FROGS_ALERT_LT {
        Operator::Lt
    } else {
        Operator::Gt
    }
}

// ============================================================================
// Threshold scaling
// ============================================================================

/// Decode a 16-bit threshold or level value.
///
/// `offset` adds the +50 degree bias used by alert thresholds.
pub fn scale_from_wire(metric: Metric, raw: u16, offset: bool) -> f64 {
    let v = f64::from(raw);
    match metric {
        Metric::Temperature | Metric::ProbTemperature if offset => (v - 500.0) / 10.0,
        Metric::Temperature | Metric::ProbTemperature | Metric::Humidity => v / 10.0,
        Metric::Pressure => v / 100.0,
        _ => v,
    }
}

/// Inverse of [`scale_from_wire`], rounding to the nearest step.
pub fn scale_to_wire(metric: Metric, value: f64, offset: bool) -> Result<u16> {
    let raw = match metric {
        Metric::Temperature | Metric::ProbTemperature if offset => value * 10.0 + 500.0,
        Metric::Temperature | Metric::ProbTemperature | Metric::Humidity => value * 10.0,
        Metric::Pressure => value * 100.0,
        _ => value,
    }
    .round();

    if !(0.0..=f64::from(u16::MAX)).contains(&raw) {
        return Err(CodecError::malformed(format!(
            "{} value {} does not fit the wire field",
            metric, value
        )));
    }
    Ok(raw as u16)
}

// ============================================================================
// Data levels
// ============================================================================

/// Metric whose level boundaries a tag carries.
pub fn data_level_metric(tag: u8) -> Option<Metric> {
    match tag {
        DATA_LEVEL_CO2 => Some(Metric::Co2),
        DATA_LEVEL_TEMPERATURE => Some(Metric::Temperature),
        DATA_LEVEL_HUMIDITY => Some(Metric::Humidity),
        DATA_LEVEL_PM25 => Some(Metric::Pm25),
        DATA_LEVEL_PM10 => Some(Metric::Pm10),
        DATA_LEVEL_TVOC => Some(Metric::Tvoc),
        DATA_LEVEL_NOISE => Some(Metric::Noise),
        DATA_LEVEL_LUMEN => Some(Metric::Lumen),
        DATA_LEVEL_PRESSURE => Some(Metric::Pressure),
        _ => None,
    }
}

/// Inverse of [`data_level_metric`]. Light has its own tag.
pub fn data_level_tag(metric: Metric) -> Option<u8> {
    match metric {
        Metric::Co2 => Some(DATA_LEVEL_CO2),
        Metric::Temperature => Some(DATA_LEVEL_TEMPERATURE),
        Metric::Humidity => Some(DATA_LEVEL_HUMIDITY),
        Metric::Pm25 => Some(DATA_LEVEL_PM25),
        Metric::Pm10 => Some(DATA_LEVEL_PM10),
        Metric::Tvoc => Some(DATA_LEVEL_TVOC),
        Metric::Noise => Some(DATA_LEVEL_NOISE),
        Metric::Lumen => Some(DATA_LEVEL_LUMEN),
        Metric::Pressure => Some(DATA_LEVEL_PRESSURE),
        Metric::Light => Some(LIGHT),
        _ => None,
    }
}

// ============================================================================
// Catch-all labels
// ============================================================================

/// Key under which an uninterpreted record is stored.
pub fn label(tag: u8) -> String {
    match label_suffix(tag) {
        Some(suffix) => format!("{:#x}-{}", tag, suffix),
        None => format!("{:#x}", tag),
    }
}

fn label_suffix(tag: u8) -> Option<&'static str> {
    let suffix = match tag {
        DEVICE_SN => "sn",
        FIRMWARE_URL => "firmware",
        TIMESTAMP => "timestamp",
        SIM => "sim",
        TEMPERATURE_UNIT => "temperatureUnit",
        HARDWARE_VERSION => "hardwareVersion",
        ALERT_DURATION => "alertDuration",
        SECRET_KEY => "cert",
        PROBE_OFFSET => "probeOffset",
        PRESSURE_OFFSET => "pressureOffset",
        PROBE => "probe",
        CO2_OFFSET_VALUE => "co2Offset",
        TEMPERATURE_OFFSET_VALUE => "temperatureOffset",
        TEMPERATURE_OFFSET_PERCENT => "temperatureOffsetPercent",
        HUMIDITY_OFFSET_VALUE => "humidityOffset",
        HUMIDITY_OFFSET_PERCENT => "humidityOffsetPercent",
        CO2_STATUS => "co2Status",
        TVOC_UNIT => "tvocUnit",
        _ => return None,
    };
    Some(suffix)
}

// ============================================================================
// Encoder registry
// ============================================================================

/// Wire shape of an encodable tag's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    U8,
    U16,
    I16,
    I16Pair,
    U16List,
    Text,
    Bytes,
}

/// A value ready to be written under some tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    I16(i16),
    I16Pair(i16, i16),
    U16List(Vec<u16>),
    Text(String),
    Bytes(Vec<u8>),
}

impl FieldValue {
    fn encoding(&self) -> Encoding {
        match self {
            FieldValue::U8(_) => Encoding::U8,
            FieldValue::U16(_) => Encoding::U16,
            FieldValue::I16(_) => Encoding::I16,
            FieldValue::I16Pair(..) => Encoding::I16Pair,
            FieldValue::U16List(_) => Encoding::U16List,
            FieldValue::Text(_) => Encoding::Text,
            FieldValue::Bytes(_) => Encoding::Bytes,
        }
    }
}

/// Registered encoding for a tag, or `None` if the tag cannot be sent.
pub fn encoding_for(tag: u8) -> Option<Encoding> {
    let encoding = match tag {
        TEMPERATURE_UNIT | END_FLAG | DEBUG | CO2_ASC | CO2_RESET | NTP_ENABLE | TVOC_UNIT
        | LIGHT | NEED_ACK => Encoding::U8,
        REPORT_INTERVAL | COLLECT_INTERVAL | BLE_INTERVAL | PRODUCT_ID | CO2_COLLECT_INTERVAL
        | BATTERY_SHUTDOWN | REALTIME_DATA_DURATION => Encoding::U16,
        CO2_OFFSET => Encoding::I16,
        TH_OFFSET => Encoding::I16Pair,
        DATA_LEVEL_CO2 | DATA_LEVEL_TEMPERATURE..=DATA_LEVEL_PRESSURE => Encoding::U16List,
        WIFI | MQTT | SECRET_KEY | BLE_NAME | NTP_HOST => Encoding::Text,
        FROGS_ALERT_GT | FROGS_ALERT_LT => Encoding::Bytes,
        t if alert_for_tag(t).is_some() => Encoding::Bytes,
        _ => return None,
    };
    Some(encoding)
}

/// Serialize `value` as the body of a `tag` record.
pub fn encode_value(tag: u8, value: &FieldValue) -> Result<Vec<u8>> {
    let expected = encoding_for(tag).ok_or(CodecError::UnsupportedTag(tag))?;
    if value.encoding() != expected {
        return Err(CodecError::malformed(format!(
            "tag {:#04x} takes {:?}, got {:?}",
            tag,
            expected,
            value.encoding()
        )));
    }

    let out = match value {
        FieldValue::U8(v) => vec![*v],
        FieldValue::U16(v) => v.to_le_bytes().to_vec(),
        FieldValue::I16(v) => v.to_le_bytes().to_vec(),
        FieldValue::I16Pair(a, b) => [a.to_le_bytes(), b.to_le_bytes()].concat(),
        FieldValue::U16List(values) => values.iter().flat_map(|v| v.to_le_bytes()).collect(),
        FieldValue::Text(s) => s.as_bytes().to_vec(),
        FieldValue::Bytes(b) => b.clone(),
    };
    Ok(out)
}
