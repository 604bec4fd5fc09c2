//! Downlink settings survive an encode/decode cycle.

use std::collections::BTreeMap;

use approx::assert_abs_diff_eq;

use cgwire_codec::pod::{
    ActiveWindow, AlertSetting, BatterySetting, Co2Setting, DataLevelRange, IntervalSetting,
    MqttSetting, NtpSetting, ReadingOffsetSetting, TemperatureUnit, TvocUnit, UnitSetting,
    WifiInfo,
};
use cgwire_codec::{decode_tlv, encode_frame, CodecError, MessagePod, Metric, Operator};

fn cycle(pod: &MessagePod) -> MessagePod {
    let frame = encode_frame(pod).expect("encodes");
    decode_tlv(&frame).expect("decodes")
}

#[test]
fn test_minimal_downlink_bytes() {
    let pod = MessagePod {
        command: Some(0x32),
        debug: Some(1),
        interval_setting: Some(IntervalSetting {
            report_interval: Some(60),
            collect_interval: Some(60),
            ble_interval: None,
        }),
        ..Default::default()
    };
    assert_eq!(
        hex::encode(encode_frame(&pod).unwrap()),
        "4347320e0004020001000502003c00210100013701"
    );
}

#[test]
fn test_empty_pod() {
    let frame = encode_frame(&MessagePod::default()).unwrap();
    assert_eq!(frame, vec![0x43, 0x47, 0x32, 0x00, 0x00, 0xBC, 0x00]);
}

#[test]
fn test_intervals_and_flags() {
    let pod = MessagePod {
        need_ack: Some(1),
        end_flag: Some(1),
        realtime_data_duration: Some(30),
        ble_name: Some("cg-sensor".into()),
        interval_setting: Some(IntervalSetting {
            report_interval: Some(900),
            collect_interval: Some(300),
            ble_interval: Some(2),
        }),
        battery_setting: Some(BatterySetting {
            discharge_shutdown_time: Some(3600),
        }),
        ..Default::default()
    };

    let decoded = cycle(&pod);
    assert_eq!(decoded.command, Some(0x32));
    assert_eq!(decoded.need_ack, Some(1));
    assert_eq!(decoded.end_flag, Some(1));
    assert_eq!(decoded.realtime_data_duration, Some(30));
    assert_eq!(decoded.ble_name.as_deref(), Some("cg-sensor"));
    assert_eq!(decoded.interval_setting, pod.interval_setting);
    assert_eq!(decoded.battery_setting, pod.battery_setting);
}

#[test]
fn test_alerts() {
    let mut high = AlertSetting::new(Metric::Temperature, Operator::Gt, 35.5);
    high.active_window = Some(ActiveWindow {
        start: 480,
        end: 1080,
    });
    let pod = MessagePod {
        alert_settings: vec![
            high,
            AlertSetting::new(Metric::Humidity, Operator::Lt, 20.0),
            AlertSetting::new(Metric::Co2, Operator::Gt, 1500.0),
            AlertSetting::new(Metric::Battery, Operator::Lt, 15.0),
        ],
        ..Default::default()
    };

    let decoded = cycle(&pod);
    assert_eq!(decoded.has_buzzer, None);
    assert_eq!(decoded.alert_settings.len(), 4);

    // Records come back in tag order.
    let temperature = &decoded.alert_settings[0];
    assert_eq!(temperature.metric, Metric::Temperature);
    assert_eq!(temperature.operator, Operator::Gt);
    assert_abs_diff_eq!(temperature.value, 35.5, epsilon = 1e-9);
    assert_eq!(temperature.active_window, pod.alert_settings[0].active_window);

    let humidity = &decoded.alert_settings[1];
    assert_eq!((humidity.metric, humidity.operator), (Metric::Humidity, Operator::Lt));
    assert_abs_diff_eq!(humidity.value, 20.0, epsilon = 1e-9);
    assert_eq!(humidity.active_window, None);

    let battery = &decoded.alert_settings[2];
    assert_eq!(battery.metric, Metric::Battery);
    assert_eq!(battery.value, 15.0);

    let co2 = &decoded.alert_settings[3];
    assert_eq!((co2.metric, co2.value), (Metric::Co2, 1500.0));
}

#[test]
fn test_alert_buzzer_time() {
    let mut alert = AlertSetting::new(Metric::Pm25, Operator::Gt, 75.0);
    alert.work_time = Some(30);
    let pod = MessagePod {
        has_buzzer: Some(true),
        alert_settings: vec![alert],
        ..Default::default()
    };

    let decoded = cycle(&pod);
    assert_eq!(decoded.has_buzzer, Some(true));
    assert_eq!(decoded.alert_settings, pod.alert_settings);
}

#[test]
fn test_frogs_alerts() {
    let mut probe = AlertSetting::new(Metric::ProbTemperature, Operator::Lt, -18.5);
    probe.active_window = Some(ActiveWindow { start: 0, end: 720 });
    let pod = MessagePod {
        product_id: Some(0x3C),
        alert_settings: vec![
            probe,
            AlertSetting::new(Metric::Co2Percent, Operator::Gt, 5.0),
        ],
        ..Default::default()
    };

    let decoded = cycle(&pod);
    assert_eq!(decoded.product_id, Some(0x3C));
    assert_eq!(decoded.alert_settings.len(), 2);

    let co2 = &decoded.alert_settings[0];
    assert_eq!((co2.metric, co2.operator), (Metric::Co2Percent, Operator::Gt));
    assert_abs_diff_eq!(co2.value, 5.0, epsilon = 1e-9);

    let probe = &decoded.alert_settings[1];
    assert_eq!((probe.metric, probe.operator), (Metric::ProbTemperature, Operator::Lt));
    assert_abs_diff_eq!(probe.value, -18.5, epsilon = 1e-9);
    assert_eq!(probe.active_window, Some(ActiveWindow { start: 0, end: 720 }));
}

#[test]
fn test_unsupported_alert() {
    let pod = MessagePod {
        alert_settings: vec![AlertSetting::new(Metric::Battery, Operator::Gt, 90.0)],
        ..Default::default()
    };
    assert!(matches!(
        encode_frame(&pod),
        Err(CodecError::UnsupportedField(_))
    ));
}

#[test]
fn test_mqtt_and_wifi() {
    let pod = MessagePod {
        mqtt_setting: Some(MqttSetting {
            host: Some("mqtt.example.net".into()),
            port: Some("1883".into()),
            user: Some("device".into()),
            password: Some("hunter2".into()),
            client_id: Some("cg-01".into()),
            down_topic: Some("down/cg-01".into()),
            up_topic: Some("up/cg-01".into()),
            raw: None,
        }),
        wifi_info: Some(WifiInfo {
            ssid: Some("office".into()),
            password: Some("p@ss word".into()),
            desc: None,
        }),
        ..Default::default()
    };

    let decoded = cycle(&pod);
    let mqtt = decoded.mqtt_setting.unwrap();
    assert_eq!(
        mqtt.raw.as_deref(),
        Some("mqtt.example.net 1883 device hunter2 cg-01 down/cg-01 up/cg-01")
    );
    assert_eq!(mqtt.host.as_deref(), Some("mqtt.example.net"));
    assert_eq!(mqtt.down_topic.as_deref(), Some("down/cg-01"));
    assert_eq!(mqtt.up_topic.as_deref(), Some("up/cg-01"));

    let wifi = decoded.wifi_info.unwrap();
    assert_eq!(wifi.ssid.as_deref(), Some("office"));
    assert_eq!(wifi.password.as_deref(), Some("p@ss word"));
}

#[test]
fn test_units_offsets_ntp() {
    let pod = MessagePod {
        unit_setting: Some(UnitSetting {
            temperature: Some(TemperatureUnit::F),
            tvoc: Some(TvocUnit::Ppb),
        }),
        reading_offset_setting: Some(ReadingOffsetSetting {
            temperature: Some(-1.5),
            humidity: Some(2.0),
            co2_percent: Some(0.3),
        }),
        ntp_setting: Some(NtpSetting {
            host: Some("pool.ntp.org".into()),
            enabled: Some(true),
        }),
        ..Default::default()
    };

    let decoded = cycle(&pod);
    assert_eq!(decoded.unit_setting, pod.unit_setting);
    assert_eq!(decoded.ntp_setting, pod.ntp_setting);

    let offsets = decoded.reading_offset_setting.unwrap();
    assert_abs_diff_eq!(offsets.temperature.unwrap(), -1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(offsets.humidity.unwrap(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(offsets.co2_percent.unwrap(), 0.3, epsilon = 1e-9);
}

#[test]
fn test_co2_setting_on_pheasant() {
    let pod = MessagePod {
        product_id: Some(0x36),
        co2_setting: Some(Co2Setting {
            collect_interval: Some(600),
            data_level: Some(DataLevelRange {
                min: 1000.0,
                max: 2000.0,
            }),
            asc_open: Some(true),
            reset: Some(true),
        }),
        ..Default::default()
    };

    let decoded = cycle(&pod);
    assert_eq!(decoded.co2_setting, pod.co2_setting);
    assert_eq!(
        decoded.sensor_data_level.get(&Metric::Co2),
        Some(&vec![1000.0, 2000.0])
    );
}

#[test]
fn test_data_levels() {
    let mut levels = BTreeMap::new();
    levels.insert(Metric::Temperature, vec![10.0, 18.5, 26.0, 32.0]);
    levels.insert(Metric::Pm25, vec![35.0, 75.0]);
    levels.insert(Metric::Pressure, vec![98.25, 103.5]);
    levels.insert(Metric::Light, vec![1.0]);
    let pod = MessagePod {
        sensor_data_level: levels,
        ..Default::default()
    };

    let decoded = cycle(&pod);
    assert_eq!(decoded.sensor_data_level.len(), 4);
    assert_eq!(decoded.sensor_data_level[&Metric::Pm25], vec![35.0, 75.0]);
    assert_eq!(decoded.sensor_data_level[&Metric::Light], vec![1.0]);
    for (got, want) in decoded.sensor_data_level[&Metric::Temperature]
        .iter()
        .zip([10.0, 18.5, 26.0, 32.0])
    {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
    }
    for (got, want) in decoded.sensor_data_level[&Metric::Pressure]
        .iter()
        .zip([98.25, 103.5])
    {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
    }
}

#[test]
fn test_light_level_sent_as_on_off() {
    let mut pod = MessagePod::default();
    pod.sensor_data_level.insert(Metric::Light, vec![2.0]);
    assert_eq!(
        hex::encode(encode_frame(&pod).unwrap()),
        "4347320400630100012501"
    );
    assert_eq!(cycle(&pod).sensor_data_level[&Metric::Light], vec![1.0]);

    pod.sensor_data_level.insert(Metric::Light, vec![0.0]);
    assert_eq!(cycle(&pod).sensor_data_level[&Metric::Light], vec![0.0]);
}

#[test]
fn test_uplink_fields_not_encoded() {
    let mut pod = MessagePod {
        mac: Some("AABBCCDDEEFF".into()),
        pm_sn: Some("0C3ABDCD".into()),
        usb_plugin: Some(1),
        debug: Some(0),
        ..Default::default()
    };
    pod.other.insert("0x22".into(), "30303030".into());

    let decoded = cycle(&pod);
    assert_eq!(decoded.debug, Some(0));
    assert_eq!(decoded.mac, None);
    assert_eq!(decoded.pm_sn, None);
    assert_eq!(decoded.usb_plugin, None);
    assert!(decoded.other.is_empty());
}

#[test]
fn test_pod_from_json() {
    let json = r#"{
        "command": 50,
        "debug": 1,
        "interval_setting": { "report_interval": 60, "collect_interval": 60 }
    }"#;
    let pod: MessagePod = serde_json::from_str(json).unwrap();
    assert_eq!(
        hex::encode(encode_frame(&pod).unwrap()),
        "4347320e0004020001000502003c00210100013701"
    );
}
