//! Downlink encoding: [`MessagePod`] to sub-records.
//!
//! Only settings a device accepts are written. Readings, versions and other
//! uplink-only fields are skipped. The resulting records are ordered by tag
//! with a stable sort, so repeated tags (several Frogs alerts) keep their
//! relative order.

use crate::error::{CodecError, Result};
use crate::pod::{
    AlertSetting, Co2Setting, MessagePod, Metric, Operator, ProductFamily, ReadingOffsetSetting,
    TemperatureUnit, TvocUnit, UnitSetting,
};
use crate::tags::{self, FieldValue};

/// A tagged value awaiting serialization.
pub type EncodedRecord = (u8, FieldValue);

/// Turn every downlink setting of `pod` into a record.
pub fn encode_records(pod: &MessagePod) -> Result<Vec<EncodedRecord>> {
    let mut records = Vec::new();

    if let Some(v) = pod.need_ack {
        records.push((tags::NEED_ACK, FieldValue::U8(v)));
    }
    if let Some(v) = pod.debug {
        records.push((tags::DEBUG, FieldValue::U8(v)));
    }
    if let Some(v) = pod.end_flag {
        records.push((tags::END_FLAG, FieldValue::U8(narrow(v, "end flag")?)));
    }
    if let Some(v) = pod.product_id {
        records.push((tags::PRODUCT_ID, FieldValue::U16(v)));
    }
    if let Some(v) = pod.realtime_data_duration {
        records.push((tags::REALTIME_DATA_DURATION, FieldValue::U16(v)));
    }
    if let Some(name) = &pod.ble_name {
        records.push((tags::BLE_NAME, FieldValue::Text(name.clone())));
    }

    if let Some(intervals) = &pod.interval_setting {
        if let Some(v) = intervals.report_interval {
            let minutes = narrow(v / 60, "report interval")?;
            records.push((tags::REPORT_INTERVAL, FieldValue::U16(minutes)));
        }
        if let Some(v) = intervals.collect_interval {
            let seconds = narrow(v, "collect interval")?;
            records.push((tags::COLLECT_INTERVAL, FieldValue::U16(seconds)));
        }
        if let Some(v) = intervals.ble_interval {
            records.push((tags::BLE_INTERVAL, FieldValue::U16(narrow(v, "ble interval")?)));
        }
    }

    let frogs = pod.family() == ProductFamily::FrogS;
    let buzzer = pod.has_buzzer.unwrap_or(false);
    for alert in &pod.alert_settings {
        records.push(if frogs {
            encode_frogs_alert(alert)?
        } else {
            encode_alert(alert, buzzer)?
        });
    }

    if let Some(co2) = &pod.co2_setting {
        encode_co2(co2, &mut records)?;
    }
    let co2_level_set = pod
        .co2_setting
        .as_ref()
        .is_some_and(|c| c.data_level.is_some());
    for (&metric, values) in &pod.sensor_data_level {
        if metric == Metric::Co2 && co2_level_set {
            log::debug!("co2 data level taken from co2 setting");
            continue;
        }
        records.push(encode_data_level(metric, values)?);
    }

    if let Some(v) = pod.battery_setting.as_ref().and_then(|b| b.discharge_shutdown_time) {
        let minutes = narrow(v / 60, "shutdown time")?;
        records.push((tags::BATTERY_SHUTDOWN, FieldValue::U16(minutes)));
    }

    if let Some(mqtt) = &pod.mqtt_setting {
        let wire = mqtt
            .to_wire()
            .ok_or_else(|| CodecError::UnsupportedField("mqtt setting has no fields".into()))?;
        records.push((tags::MQTT, FieldValue::Text(wire)));
    }
    if let Some(wifi) = &pod.wifi_info {
        let wire = wifi
            .to_wire()
            .ok_or_else(|| CodecError::UnsupportedField("wifi info has no ssid".into()))?;
        records.push((tags::WIFI, FieldValue::Text(wire)));
    }
    if let Some(ntp) = &pod.ntp_setting {
        if let Some(host) = &ntp.host {
            records.push((tags::NTP_HOST, FieldValue::Text(host.clone())));
        }
        if let Some(enabled) = ntp.enabled {
            records.push((tags::NTP_ENABLE, FieldValue::U8(u8::from(enabled))));
        }
    }
    if let Some(units) = &pod.unit_setting {
        encode_units(units, &mut records);
    }
    if let Some(offsets) = &pod.reading_offset_setting {
        encode_offsets(offsets, &mut records)?;
    }

    log_skipped(pod);

    records.sort_by_key(|(tag, _)| *tag);
    Ok(records)
}

fn narrow<T, U>(value: T, what: &str) -> Result<U>
where
    T: Copy + std::fmt::Display,
    U: TryFrom<T>,
{
    U::try_from(value)
        .map_err(|_| CodecError::malformed(format!("{} {} does not fit its field", what, value)))
}

fn tenths_i16(value: f64, what: &str) -> Result<i16> {
    let raw = (value * 10.0).round();
    if !(f64::from(i16::MIN)..=f64::from(i16::MAX)).contains(&raw) {
        return Err(CodecError::malformed(format!("{} {} out of range", what, value)));
    }
    Ok(raw as i16)
}

/// `[repeat][start u32][end u32][threshold u16]`, plus `[work time u16]`
/// on devices with a buzzer.
fn encode_alert(alert: &AlertSetting, buzzer: bool) -> Result<EncodedRecord> {
    let tag = tags::tag_for_alert(alert.metric, alert.operator).ok_or_else(|| {
        CodecError::UnsupportedField(format!("{} {} alert", alert.metric, alert.operator))
    })?;

    let mut body = Vec::with_capacity(13);
    body.push(1);
    let (start, end) = window(alert);
    body.extend_from_slice(&start.to_le_bytes());
    body.extend_from_slice(&end.to_le_bytes());
    body.extend_from_slice(&tags::scale_to_wire(alert.metric, alert.value, true)?.to_le_bytes());
    if buzzer {
        body.extend_from_slice(&alert.work_time.unwrap_or_default().to_le_bytes());
    }
    Ok((tag, FieldValue::Bytes(body)))
}

/// `[seq][probe][sensor type][repeat][start u32][end u32][threshold i32 x10][0 0]`
fn encode_frogs_alert(alert: &AlertSetting) -> Result<EncodedRecord> {
    let (probe, sensor_type) = tags::frogs_sensor(alert.metric).ok_or_else(|| {
        CodecError::UnsupportedField(format!("{} has no frogs sensor", alert.metric))
    })?;
    let tag = match alert.operator {
        Operator::Gt => tags::FROGS_ALERT_GT,
        Operator::Lt => tags::FROGS_ALERT_LT,
    };

    let threshold = (alert.value * 10.0).round();
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&threshold) {
        return Err(CodecError::malformed(format!("threshold {} out of range", alert.value)));
    }

    let mut body = Vec::with_capacity(18);
    body.extend_from_slice(&[1, probe, sensor_type, 1]);
    let (start, end) = window(alert);
    body.extend_from_slice(&start.to_le_bytes());
    body.extend_from_slice(&end.to_le_bytes());
    body.extend_from_slice(&(threshold as i32).to_le_bytes());
    body.extend_from_slice(&[0, 0]);
    Ok((tag, FieldValue::Bytes(body)))
}

fn window(alert: &AlertSetting) -> (u32, u32) {
    alert
        .active_window
        .map(|w| (w.start, w.end))
        .unwrap_or_default()
}

fn encode_co2(co2: &Co2Setting, records: &mut Vec<EncodedRecord>) -> Result<()> {
    if let Some(v) = co2.collect_interval {
        let minutes = narrow(v / 60, "co2 interval")?;
        records.push((tags::CO2_COLLECT_INTERVAL, FieldValue::U16(minutes)));
    }
    if let Some(range) = co2.data_level {
        let levels = vec![
            tags::scale_to_wire(Metric::Co2, range.min, false)?,
            tags::scale_to_wire(Metric::Co2, range.max, false)?,
        ];
        records.push((tags::DATA_LEVEL_CO2, FieldValue::U16List(levels)));
    }
    if let Some(open) = co2.asc_open {
        records.push((tags::CO2_ASC, FieldValue::U8(u8::from(open))));
    }
    if co2.reset == Some(true) {
        records.push((tags::CO2_RESET, FieldValue::U8(1)));
    }
    Ok(())
}

fn encode_data_level(metric: Metric, values: &[f64]) -> Result<EncodedRecord> {
    if metric == Metric::Light {
        // The device only takes on/off.
        let on = values.first().is_some_and(|v| *v > 0.0);
        return Ok((tags::LIGHT, FieldValue::U8(u8::from(on))));
    }

    let tag = tags::data_level_tag(metric)
        .ok_or_else(|| CodecError::UnsupportedField(format!("{} data level", metric)))?;
    let levels = values
        .iter()
        .map(|v| tags::scale_to_wire(metric, *v, false))
        .collect::<Result<Vec<_>>>()?;
    Ok((tag, FieldValue::U16List(levels)))
}

fn encode_units(units: &UnitSetting, records: &mut Vec<EncodedRecord>) {
    if let Some(unit) = units.temperature {
        let code = match unit {
            TemperatureUnit::C => 0,
            TemperatureUnit::F => 1,
        };
        records.push((tags::TEMPERATURE_UNIT, FieldValue::U8(code)));
    }
    if let Some(unit) = units.tvoc {
        let code = match unit {
            TvocUnit::Index => 1,
            TvocUnit::MgPerCubicMeter => 3,
            TvocUnit::Ppb => 4,
        };
        records.push((tags::TVOC_UNIT, FieldValue::U8(code)));
    }
}

fn encode_offsets(offsets: &ReadingOffsetSetting, records: &mut Vec<EncodedRecord>) -> Result<()> {
    if offsets.temperature.is_some() || offsets.humidity.is_some() {
        let t = tenths_i16(offsets.temperature.unwrap_or_default(), "temperature offset")?;
        let h = tenths_i16(offsets.humidity.unwrap_or_default(), "humidity offset")?;
        records.push((tags::TH_OFFSET, FieldValue::I16Pair(t, h)));
    }
    if let Some(v) = offsets.co2_percent {
        records.push((tags::CO2_OFFSET, FieldValue::I16(tenths_i16(v, "co2 offset")?)));
    }
    Ok(())
}

fn log_skipped(pod: &MessagePod) {
    let skipped = [
        ("realtime", pod.realtime.is_some()),
        ("history", !pod.history.is_empty()),
        ("firmware_info", pod.firmware_info.is_some()),
        ("mac", pod.mac.is_some()),
        ("pm_sn", pod.pm_sn.is_some()),
        ("usb_plugin", pod.usb_plugin.is_some()),
        ("other", !pod.other.is_empty()),
    ];
    for (name, present) in skipped {
        if present {
            log::debug!("{} is uplink-only, not encoded", name);
        }
    }
}
