//! The decoded message aggregate and its settings types.
//!
//! [`MessagePod`] is what a decode produces and what an encode consumes.
//! Every channel and setting is an `Option`: a field that is `None` was not
//! reported, and a field that is `Some(0)` was reported as zero.
//!
//! Decoders never touch a pod directly. They return [`FieldUpdate`] values
//! and the dispatcher applies them in record order.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of [`SensorReading::time`].
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Vocabulary
// ============================================================================

/// Measured quantity, as used by alerts and data levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    ProbTemperature,
    Humidity,
    ProbHumidity,
    Pressure,
    Co2,
    Co2Percent,
    Pm25,
    Pm10,
    Tvoc,
    Noise,
    Lumen,
    Battery,
    /// Display backlight level. Only appears in data levels.
    Light,
}

impl Metric {
    /// Wire name of the metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::ProbTemperature => "prob_temperature",
            Metric::Humidity => "humidity",
            Metric::ProbHumidity => "prob_humidity",
            Metric::Pressure => "pressure",
            Metric::Co2 => "co2",
            Metric::Co2Percent => "co2_percent",
            Metric::Pm25 => "pm25",
            Metric::Pm10 => "pm10",
            Metric::Tvoc => "tvoc",
            Metric::Noise => "noise",
            Metric::Lumen => "lumen",
            Metric::Battery => "battery",
            Metric::Light => "light",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Fires above the threshold.
    #[serde(rename = "GT")]
    Gt,
    /// Fires below the threshold.
    #[serde(rename = "LT")]
    Lt,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Gt => f.write_str("GT"),
            Operator::Lt => f.write_str("LT"),
        }
    }
}

/// Device product line, derived from the product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFamily {
    /// Multi-sensor air quality monitors.
    Robb,
    /// Probe loggers with the Frogs alert format.
    FrogS,
    /// CO2 monitors that carry CO2 in the pressure slot.
    PheasantCo2,
    /// Everything else.
    Generic,
}

impl ProductFamily {
    /// Family for a product id.
    pub fn of(product_id: u16) -> Self {
        match product_id {
            0x34 | 0x35 | 0x3A | 0x3B => ProductFamily::Robb,
            0x3C..=0x3E => ProductFamily::FrogS,
            0x33 | 0x36 | 0x37 => ProductFamily::PheasantCo2,
            _ => ProductFamily::Generic,
        }
    }
}

// ============================================================================
// Readings
// ============================================================================

/// One timestamped sensor reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Epoch seconds.
    pub timestamp: i64,
    /// `timestamp` rendered in UTC.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob_humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvoc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lumen: Option<f64>,
    /// Percent, or 255 on external power.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i32>,
}

impl SensorReading {
    /// Stamp the reading and render its time string.
    pub fn at(mut self, timestamp: i64) -> Self {
        self.set_timestamp(timestamp);
        self
    }

    /// Set the timestamp and its rendered form.
    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
        self.time = format_time(timestamp);
    }

    /// Reinterpret the pressure slot as CO2 in ppm.
    pub fn pressure_to_co2(&mut self) {
        if let Some(pressure) = self.pressure.take() {
            self.co2 = Some((pressure * 100.0).round());
        }
    }
}

/// Render epoch seconds as UTC `YYYY-MM-DD HH:MM:SS`.
pub fn format_time(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

// ============================================================================
// Settings
// ============================================================================

/// Alert threshold for one metric and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSetting {
    pub metric: Metric,
    pub operator: Operator,
    pub value: f64,
    /// Daily window in which the alert is armed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_window: Option<ActiveWindow>,
    /// Buzzer duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_time: Option<u16>,
}

impl AlertSetting {
    /// Alert with no window and no buzzer time.
    pub fn new(metric: Metric, operator: Operator, value: f64) -> Self {
        AlertSetting {
            metric,
            operator,
            value,
            active_window: None,
            work_time: None,
        }
    }
}

/// Start and end of an alert window, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWindow {
    pub start: u32,
    pub end: u32,
}

/// Intervals, all in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSetting {
    /// Upload interval. Carried on the wire in whole minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_interval: Option<u32>,
    /// Sampling interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_interval: Option<u32>,
    /// BLE advertising interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ble_interval: Option<u32>,
}

/// MQTT broker connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_topic: Option<String>,
    /// The string as carried on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl MqttSetting {
    /// Number of space-separated fields in the wire string.
    pub const FIELD_COUNT: usize = 7;

    /// Parse the wire string. Structured fields are filled only when it has
    /// exactly [`Self::FIELD_COUNT`] fields.
    pub fn parse(raw: &str) -> Self {
        let mut setting = MqttSetting {
            raw: Some(raw.to_string()),
            ..Default::default()
        };

        let fields: Vec<&str> = raw.split(' ').collect();
        if let [host, port, user, password, client_id, down_topic, up_topic] = fields[..] {
            setting.host = Some(host.to_string());
            setting.port = Some(port.to_string());
            setting.user = Some(user.to_string());
            setting.password = Some(password.to_string());
            setting.client_id = Some(client_id.to_string());
            setting.down_topic = Some(down_topic.to_string());
            setting.up_topic = Some(up_topic.to_string());
        }
        setting
    }

    fn has_fields(&self) -> bool {
        [
            &self.host,
            &self.port,
            &self.user,
            &self.password,
            &self.client_id,
            &self.down_topic,
            &self.up_topic,
        ]
        .iter()
        .any(|f| f.is_some())
    }

    /// Wire string: the structured fields when any is set, else `raw`.
    pub fn to_wire(&self) -> Option<String> {
        if !self.has_fields() {
            return self.raw.clone();
        }
        let field = |f: &Option<String>| f.clone().unwrap_or_default();
        Some(
            [
                field(&self.host),
                field(&self.port),
                field(&self.user),
                field(&self.password),
                field(&self.client_id),
                field(&self.down_topic),
                field(&self.up_topic),
            ]
            .join(" "),
        )
    }
}

/// Firmware versions reported by the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcu_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_version: Option<String>,
}

/// Inclusive range for a level setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataLevelRange {
    pub min: f64,
    pub max: f64,
}

/// CO2 sensor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Co2Setting {
    /// Sensor sampling interval in seconds. Carried in whole minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_level: Option<DataLevelRange>,
    /// Automatic baseline calibration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asc_open: Option<bool>,
    /// Manual calibration request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset: Option<bool>,
}

/// Battery configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterySetting {
    /// Seconds on battery before auto shutdown. Carried in whole minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_shutdown_time: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    C,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TvocUnit {
    #[serde(rename = "index")]
    Index,
    #[serde(rename = "mg/m³")]
    MgPerCubicMeter,
    #[serde(rename = "ppb")]
    Ppb,
}

/// Display units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvoc: Option<TvocUnit>,
}

/// Calibration offsets applied on the device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingOffsetSetting {
    /// Degrees added to temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Points added to relative humidity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Percent applied to CO2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_percent: Option<f64>,
}

/// Wi-Fi credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Wire string with quotes removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl WifiInfo {
    /// Parse `"ssid","password"`.
    pub fn parse(raw: &str) -> Self {
        let mut info = WifiInfo {
            desc: Some(raw.replace('"', "")),
            ..Default::default()
        };
        if let Some(inner) = raw
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
        {
            if let Some((ssid, password)) = inner.split_once("\",\"") {
                info.ssid = Some(ssid.to_string());
                info.password = Some(password.to_string());
            }
        }
        info
    }

    /// Wire string, if an SSID is set.
    pub fn to_wire(&self) -> Option<String> {
        let ssid = self.ssid.as_deref()?;
        Some(format!(
            "\"{}\",\"{}\"",
            ssid,
            self.password.as_deref().unwrap_or_default()
        ))
    }
}

/// Time sync configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NtpSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

// ============================================================================
// MessagePod
// ============================================================================

/// One decoded frame, or the contents of one downlink to encode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePod {
    /// Outer frame command byte.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u16>,
    /// Alerts carry a buzzer work time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_buzzer: Option<bool>,
    /// The device expects the server to acknowledge this upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_ack: Option<u8>,
    /// Last frame of a session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_flag: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usb_plugin: Option<u64>,
    /// Particulate sensor serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_sn: Option<String>,
    /// Seconds of temporary fast reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime_data_duration: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ble_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime: Option<SensorReading>,
    /// Oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<SensorReading>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alert_settings: Vec<AlertSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_setting: Option<IntervalSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_setting: Option<MqttSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_info: Option<WifiInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_info: Option<FirmwareInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_setting: Option<Co2Setting>,
    /// Level boundaries per metric.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sensor_data_level: BTreeMap<Metric, Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_setting: Option<BatterySetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_setting: Option<UnitSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_offset_setting: Option<ReadingOffsetSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ntp_setting: Option<NtpSetting>,
    /// Records with no structured home, keyed by tag label.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, String>,
}

impl MessagePod {
    /// Empty pod for a command.
    pub fn with_command(command: u8) -> Self {
        MessagePod {
            command: Some(command),
            ..Default::default()
        }
    }

    /// Family of the reported product, if one was reported.
    pub fn family(&self) -> ProductFamily {
        self.product_id
            .map(ProductFamily::of)
            .unwrap_or(ProductFamily::Generic)
    }

    /// Apply one decoder patch.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Mac(mac) => self.mac = Some(mac),
            FieldUpdate::ProductId(id) => self.product_id = Some(id),
            FieldUpdate::HasBuzzer(b) => self.has_buzzer = Some(b),
            FieldUpdate::NeedAck(v) => self.need_ack = Some(v),
            FieldUpdate::EndFlag(v) => self.end_flag = Some(v),
            FieldUpdate::Debug(v) => self.debug = Some(v),
            FieldUpdate::UsbPlugin(v) => self.usb_plugin = Some(v),
            FieldUpdate::PmSn(sn) => self.pm_sn = Some(sn),
            FieldUpdate::RealtimeDataDuration(v) => self.realtime_data_duration = Some(v),
            FieldUpdate::BleName(name) => self.ble_name = Some(name),
            FieldUpdate::Realtime(reading) => self.realtime = Some(reading),
            FieldUpdate::History(readings) => self.history = readings,
            FieldUpdate::Alert(alert) => self.alert_settings.push(alert),
            FieldUpdate::ReportInterval(v) => self.intervals().report_interval = Some(v),
            FieldUpdate::CollectInterval(v) => self.intervals().collect_interval = Some(v),
            FieldUpdate::BleInterval(v) => self.intervals().ble_interval = Some(v),
            FieldUpdate::Mqtt(setting) => self.mqtt_setting = Some(setting),
            FieldUpdate::Wifi(info) => self.wifi_info = Some(info),
            FieldUpdate::FirmwareVersion(v) => self.firmware().version = Some(v),
            FieldUpdate::ModuleVersion(v) => self.firmware().module_version = Some(v),
            FieldUpdate::McuVersion(v) => self.firmware().mcu_version = Some(v),
            FieldUpdate::Co2CollectInterval(v) => self.co2().collect_interval = Some(v),
            FieldUpdate::Co2AscOpen(b) => self.co2().asc_open = Some(b),
            FieldUpdate::Co2Reset => self.co2().reset = Some(true),
            FieldUpdate::DataLevel(metric, values) => {
                self.sensor_data_level.insert(metric, values);
            }
            FieldUpdate::ShutdownTime(v) => {
                self.battery_setting
                    .get_or_insert_with(Default::default)
                    .discharge_shutdown_time = Some(v)
            }
            FieldUpdate::TemperatureUnit(u) => {
                self.unit_setting
                    .get_or_insert_with(Default::default)
                    .temperature = Some(u)
            }
            FieldUpdate::TvocUnit(u) => {
                self.unit_setting.get_or_insert_with(Default::default).tvoc = Some(u)
            }
            FieldUpdate::ThOffset {
                temperature,
                humidity,
            } => {
                let offsets = self.offsets();
                offsets.temperature = Some(temperature);
                offsets.humidity = Some(humidity);
            }
            FieldUpdate::Co2Offset(v) => self.offsets().co2_percent = Some(v),
            FieldUpdate::NtpHost(host) => self.ntp().host = Some(host),
            FieldUpdate::NtpEnabled(b) => self.ntp().enabled = Some(b),
            FieldUpdate::Other { label, value } => {
                self.other.insert(label, value);
            }
        }
    }

    fn intervals(&mut self) -> &mut IntervalSetting {
        self.interval_setting.get_or_insert_with(Default::default)
    }

    fn firmware(&mut self) -> &mut FirmwareInfo {
        self.firmware_info.get_or_insert_with(Default::default)
    }

    fn co2(&mut self) -> &mut Co2Setting {
        self.co2_setting.get_or_insert_with(Default::default)
    }

    fn offsets(&mut self) -> &mut ReadingOffsetSetting {
        self.reading_offset_setting
            .get_or_insert_with(Default::default)
    }

    fn ntp(&mut self) -> &mut NtpSetting {
        self.ntp_setting.get_or_insert_with(Default::default)
    }

    /// Fix-ups that depend on the whole frame.
    ///
    /// PheasantCo2 devices report CO2/100 in the pressure slot; their CO2
    /// data level is mirrored into [`Co2Setting::data_level`].
    pub fn normalize(&mut self) {
        if self.family() != ProductFamily::PheasantCo2 {
            return;
        }

        if let Some(reading) = self.realtime.as_mut() {
            reading.pressure_to_co2();
        }
        for reading in &mut self.history {
            reading.pressure_to_co2();
        }

        let co2_level = self
            .sensor_data_level
            .get(&Metric::Co2)
            .and_then(|values| match values[..] {
                [min, max, ..] => Some(DataLevelRange { min, max }),
                _ => None,
            });
        if let Some(range) = co2_level {
            self.co2().data_level = Some(range);
        }
    }
}

// ============================================================================
// FieldUpdate
// ============================================================================

/// A change to one part of a [`MessagePod`], produced by a record decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Mac(String),
    ProductId(u16),
    HasBuzzer(bool),
    NeedAck(u8),
    EndFlag(u64),
    Debug(u8),
    UsbPlugin(u64),
    PmSn(String),
    RealtimeDataDuration(u16),
    BleName(String),
    Realtime(SensorReading),
    /// Replaces any earlier history.
    History(Vec<SensorReading>),
    Alert(AlertSetting),
    ReportInterval(u32),
    CollectInterval(u32),
    BleInterval(u32),
    Mqtt(MqttSetting),
    Wifi(WifiInfo),
    FirmwareVersion(String),
    ModuleVersion(String),
    McuVersion(String),
    Co2CollectInterval(u32),
    Co2AscOpen(bool),
    Co2Reset,
    DataLevel(Metric, Vec<f64>),
    ShutdownTime(u32),
    TemperatureUnit(TemperatureUnit),
    TvocUnit(TvocUnit),
    ThOffset { temperature: f64, humidity: f64 },
    Co2Offset(f64),
    NtpHost(String),
    NtpEnabled(bool),
    /// Catch-all entry.
    Other { label: String, value: String },
}
