//! Per-tag sub-record decoders.
//!
//! Each decoder reads one record body and returns the changes it implies as
//! [`FieldUpdate`]s; the caller applies them to its [`MessagePod`] in order.
//! Records whose tag has no structured meaning come back as
//! [`FieldUpdate::Other`] keyed by [`tags::label`].
//!
//! [`MessagePod`]: crate::pod::MessagePod

use crate::error::Result;
use crate::field;
use crate::pod::{
    ActiveWindow, AlertSetting, FieldUpdate, Metric, MqttSetting, ProductFamily,
    TemperatureUnit, TvocUnit, WifiInfo,
};
use crate::sensor::{self, ReadingKind};
use crate::tags::{self, *};

/// What a record decoder may depend on besides its own bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    /// Command byte of the enclosing frame.
    pub command: u8,
    /// Family of the product id seen so far in the frame.
    pub family: ProductFamily,
}

impl DecodeContext {
    fn is_alert_event(&self) -> bool {
        self.command == COMMAND_ALERT_EVENT
    }
}

/// Decode one sub-record.
pub fn decode_record(tag: u8, value: &[u8], ctx: &DecodeContext) -> Result<Vec<FieldUpdate>> {
    let update = match tag {
        DEVICE_ID => FieldUpdate::Mac(hex::encode_upper(value)),
        HISTORY => {
            let unit_len = history_unit_len(ctx.family, value.len());
            FieldUpdate::History(sensor::decode_history(value, unit_len)?)
        }
        HISTORY_WITH_PROBE => FieldUpdate::History(sensor::decode_history(value, 8)?),
        REALTIME => FieldUpdate::Realtime(sensor::decode_realtime(value, true)?),

        REPORT_INTERVAL => FieldUpdate::ReportInterval(minutes(value)?),
        COLLECT_INTERVAL => FieldUpdate::CollectInterval(u32::from(field::u16_le(value, 0)?)),
        BLE_INTERVAL => FieldUpdate::BleInterval(u32::from(field::u16_le(value, 0)?)),

        t if alert_for_tag(t).is_some() => return decode_alert(t, value, ctx),
        FROGS_ALERT_GT | FROGS_ALERT_LT => return decode_frogs_alert(tag, value, ctx),

        FIRMWARE_VERSION => FieldUpdate::FirmwareVersion(text(value)),
        MODULE_VERSION => FieldUpdate::ModuleVersion(text(value)),
        MCU_VERSION => FieldUpdate::McuVersion(text(value)),
        PRODUCT_ID => FieldUpdate::ProductId(field::u16_le(value, 0)?),
        BLE_NAME => FieldUpdate::BleName(text(value)),
        PM_SN => FieldUpdate::PmSn(text(value)),

        END_FLAG => FieldUpdate::EndFlag(field::le_uint(value)),
        USB_PLUGIN => FieldUpdate::UsbPlugin(field::le_uint(value)),
        DEBUG => FieldUpdate::Debug(field::u8_at(value, 0)?),
        NEED_ACK => FieldUpdate::NeedAck(field::u8_at(value, 0)?),
        REALTIME_DATA_DURATION => FieldUpdate::RealtimeDataDuration(field::u16_le(value, 0)?),

        MQTT => FieldUpdate::Mqtt(MqttSetting::parse(&text(value))),
        WIFI => FieldUpdate::Wifi(WifiInfo::parse(&text(value))),
        NTP_HOST => FieldUpdate::NtpHost(text(value)),
        NTP_ENABLE => FieldUpdate::NtpEnabled(field::u8_at(value, 0)? > 0),

        TEMPERATURE_UNIT => match field::u8_at(value, 0)? {
            0 => FieldUpdate::TemperatureUnit(TemperatureUnit::C),
            1 => FieldUpdate::TemperatureUnit(TemperatureUnit::F),
            _ => other_hex(tag, value),
        },
        TVOC_UNIT => match field::u8_at(value, 0)? {
            1 => FieldUpdate::TvocUnit(TvocUnit::Index),
            3 => FieldUpdate::TvocUnit(TvocUnit::MgPerCubicMeter),
            4 => FieldUpdate::TvocUnit(TvocUnit::Ppb),
            _ => other_hex(tag, value),
        },

        TH_OFFSET => FieldUpdate::ThOffset {
            temperature: f64::from(field::i16_le(value, 0)?) / 10.0,
            humidity: f64::from(field::i16_le(value, 2)?) / 10.0,
        },
        CO2_OFFSET => FieldUpdate::Co2Offset(f64::from(field::i16_le(value, 0)?) / 10.0),

        CO2_COLLECT_INTERVAL => FieldUpdate::Co2CollectInterval(minutes(value)?),
        CO2_ASC => FieldUpdate::Co2AscOpen(field::u8_at(value, 0)? > 0),
        CO2_RESET => FieldUpdate::Co2Reset,
        BATTERY_SHUTDOWN => FieldUpdate::ShutdownTime(minutes(value)?),

        t if data_level_metric(t).is_some() => return decode_data_level(t, value),
        LIGHT => FieldUpdate::DataLevel(Metric::Light, vec![f64::from(field::u8_at(value, 0)?)]),

        FIRMWARE_URL => other(tag, text(value)),
        TIMESTAMP => other(tag, field::le_uint(value).to_string()),
        ALERT_DURATION | CO2_OFFSET_VALUE => other(tag, field::u16_le(value, 0)?.to_string()),
        CO2_STATUS => other(tag, field::u8_at(value, 0)?.to_string()),
        TEMPERATURE_OFFSET_VALUE => other(
            tag,
            format!("{:.1}", f64::from(field::i16_le(value, 0)?) / 10.0),
        ),
        HUMIDITY_OFFSET_VALUE => other(
            tag,
            format!("{:.1}", f64::from(field::u16_le(value, 0)?) / 10.0),
        ),
        TEMPERATURE_OFFSET_PERCENT | HUMIDITY_OFFSET_PERCENT => other(
            tag,
            format!("{:.1}%", f64::from(field::u16_le(value, 0)?) / 10.0),
        ),

        _ => {
            log::debug!("keeping record {:#04x} ({} bytes) uninterpreted", tag, value.len());
            other_hex(tag, value)
        }
    };
    Ok(vec![update])
}

/// Reading width of a plain history record for this family.
pub fn history_unit_len(family: ProductFamily, len: usize) -> usize {
    let units = len.saturating_sub(6);
    match family {
        ProductFamily::Robb if units % 20 == 0 => 20,
        ProductFamily::Robb => 18,
        ProductFamily::FrogS if units % 13 == 0 => 13,
        ProductFamily::FrogS => 9,
        _ => 6,
    }
}

fn minutes(value: &[u8]) -> Result<u32> {
    Ok(u32::from(field::u16_le(value, 0)?) * 60)
}

fn text(value: &[u8]) -> String {
    String::from_utf8_lossy(value).into_owned()
}

fn other(tag: u8, value: String) -> FieldUpdate {
    FieldUpdate::Other {
        label: tags::label(tag),
        value,
    }
}

fn other_hex(tag: u8, value: &[u8]) -> FieldUpdate {
    other(tag, hex::encode(value))
}

// ============================================================================
// Alerts
// ============================================================================

/// Threshold alert.
///
/// ```text
/// 11 bytes   repeat(1) start(4) end(4) threshold(2)
/// 13 bytes   as 11, then buzzer work time(2)
/// 12 bytes   threshold at 10..12
/// 24, 26     threshold in the last 2 bytes
/// ```
///
/// In an alert event frame the record also carries the reading that
/// tripped the alert.
fn decode_alert(tag: u8, value: &[u8], ctx: &DecodeContext) -> Result<Vec<FieldUpdate>> {
    let mut updates = Vec::with_capacity(3);

    if let Some((metric, operator)) = alert_for_tag(tag) {
        let threshold_at = match value.len() {
            11 | 13 => Some(9),
            12 => Some(10),
            24 => Some(22),
            26 => Some(24),
            _ => None,
        };

        match threshold_at {
            Some(at) => {
                let raw = field::u16_le(value, at)?;
                let mut alert =
                    AlertSetting::new(metric, operator, scale_from_wire(metric, raw, true));

                if value.len() == 13 {
                    alert.work_time = Some(field::u16_le(value, 11)?);
                    updates.push(FieldUpdate::HasBuzzer(true));
                }
                if at == 9 && !ctx.is_alert_event() {
                    alert.active_window = active_window(value)?;
                }
                updates.push(FieldUpdate::Alert(alert));
            }
            None => log::debug!(
                "alert record {:#04x} has unknown length {}",
                tag,
                value.len()
            ),
        }
    }

    if ctx.is_alert_event() {
        updates.push(FieldUpdate::Realtime(sensor::decode_realtime(value, false)?));
    }
    Ok(updates)
}

fn active_window(value: &[u8]) -> Result<Option<ActiveWindow>> {
    let start = field::u32_le(value, 1)?;
    let end = field::u32_le(value, 5)?;
    if start == 0 && end == 0 {
        return Ok(None);
    }
    Ok(Some(ActiveWindow { start, end }))
}

/// Frogs-format alert.
///
/// Configuration records are 18 bytes:
///
/// ```text
/// 0      sequence
/// 1      probe flag
/// 2      sensor type
/// 3      repeat
/// 4..12  start, end (minutes)
/// 12..16 threshold, i32 * 10
/// ```
///
/// Event records carry a timestamp, a 13-byte Frog reading at 4..17 and then
/// probe flag, sensor type and threshold.
fn decode_frogs_alert(tag: u8, value: &[u8], ctx: &DecodeContext) -> Result<Vec<FieldUpdate>> {
    let operator = frogs_operator(tag);

    if ctx.is_alert_event() {
        let event = value.get(17..).unwrap_or_default();
        let timestamp = i64::from(field::u32_le(value, 0)?);
        let reading = sensor::decode_reading(field::slice(value, 4, 13)?, ReadingKind::Realtime)?;

        let mut updates = Vec::with_capacity(2);
        if let Some(metric) = frogs_metric(field::u8_at(event, 0)?, field::u8_at(event, 1)?) {
            let threshold = f64::from(field::i32_le(event, 2)?) / 10.0;
            updates.push(FieldUpdate::Alert(AlertSetting::new(metric, operator, threshold)));
        } else {
            log::debug!("frogs alert event for unknown sensor {:02x?}", &event[..2]);
        }
        updates.push(FieldUpdate::Realtime(reading.at(timestamp)));
        return Ok(updates);
    }

    if value.len() != 18 {
        log::debug!("frogs alert config of {} bytes skipped", value.len());
        return Ok(Vec::new());
    }

    let Some(metric) = frogs_metric(value[1], value[2]) else {
        log::debug!("frogs alert for unknown sensor {:02x?}", &value[1..3]);
        return Ok(Vec::new());
    };

    let mut alert = AlertSetting::new(
        metric,
        operator,
        f64::from(field::i32_le(value, 12)?) / 10.0,
    );
    let start = field::u32_le(value, 4)?;
    let end = field::u32_le(value, 8)?;
    if start != 0 || end != 0 {
        alert.active_window = Some(ActiveWindow { start, end });
    }
    Ok(vec![FieldUpdate::Alert(alert)])
}

// ============================================================================
// Data levels
// ============================================================================

fn decode_data_level(tag: u8, value: &[u8]) -> Result<Vec<FieldUpdate>> {
    let Some(metric) = data_level_metric(tag) else {
        return Ok(Vec::new());
    };

    // At least one boundary pair.
    field::slice(value, 0, 4)?;
    let levels = value
        .chunks_exact(2)
        .map(|pair| scale_from_wire(metric, u16::from_le_bytes([pair[0], pair[1]]), false))
        .collect();
    Ok(vec![FieldUpdate::DataLevel(metric, levels)])
}
