//! Whole frames from each product family, decoded through the TLV walk.

use approx::assert_abs_diff_eq;

use cgwire_codec::pod::DataLevelRange;
use cgwire_codec::sensor::{
    encode_frog, encode_generic, encode_robb, FrogProbe, ReadingKind, TempHumidity,
};
use cgwire_codec::{decode_tlv, tags, tlv, MessagePod, SensorReading};

/// Sensor data upload.
const UPLOAD: u8 = 0x41;

const TS: u32 = 1_729_047_464;

type Record = (u8, Vec<u8>);

fn decode(records: &[Record]) -> MessagePod {
    let mut payload = Vec::new();
    for (tag, value) in records {
        tlv::put_record(&mut payload, *tag, value).unwrap();
    }
    decode_tlv(&tlv::assemble_frame(UPLOAD, &payload).unwrap()).unwrap()
}

fn product(id: u16) -> Record {
    (tags::PRODUCT_ID, id.to_le_bytes().to_vec())
}

fn realtime(reading: &[u8]) -> Record {
    let mut value = TS.to_le_bytes().to_vec();
    value.extend_from_slice(reading);
    (tags::REALTIME, value)
}

fn history(interval: u16, units: &[Vec<u8>]) -> Record {
    let mut value = TS.to_le_bytes().to_vec();
    value.extend_from_slice(&interval.to_le_bytes());
    for unit in units {
        value.extend_from_slice(unit);
    }
    (tags::HISTORY, value)
}

fn pheasant_unit(pressure: f64) -> Vec<u8> {
    encode_generic(&SensorReading {
        temperature: Some(20.3),
        humidity: Some(39.4),
        pressure: Some(pressure),
        battery: Some(87),
        ..Default::default()
    })
    .unwrap()
}

fn robb_reading(co2: f64) -> SensorReading {
    SensorReading {
        temperature: Some(21.5),
        humidity: Some(40.0),
        pressure: Some(101.3),
        co2: Some(co2),
        pm25: Some(12.0),
        pm10: Some(20.0),
        tvoc: Some(80.0),
        noise: Some(35.0),
        lumen: Some(70000.0),
        battery: Some(90),
        rssi: Some(-70),
        ..Default::default()
    }
}

/// 16-bit lumen form: the first 15 bytes, lumen, battery.
fn robb_short(unit: &[u8], lumen: u16, battery: u8) -> Vec<u8> {
    let mut out = unit[..15].to_vec();
    out.extend_from_slice(&lumen.to_le_bytes());
    out.push(battery);
    out
}

fn frog_reading() -> SensorReading {
    SensorReading {
        temperature: Some(26.6),
        humidity: Some(58.5),
        co2_percent: Some(2.8),
        prob_temperature: Some(5.5),
        prob_humidity: Some(90.0),
        battery: Some(80),
        ..Default::default()
    }
}

// ============================================================================
// PheasantCo2
// ============================================================================

#[test]
fn test_pheasant_frame_moves_pressure_to_co2() {
    let pod = decode(&[
        product(0x33),
        realtime(&pheasant_unit(5.81)),
        history(300, &[pheasant_unit(8.0), pheasant_unit(12.5)]),
        (tags::DATA_LEVEL_CO2, [800u16, 1500].iter().flat_map(|v| v.to_le_bytes()).collect()),
    ]);

    let realtime = pod.realtime.unwrap();
    assert_eq!(realtime.pressure, None);
    assert_eq!(realtime.co2, Some(581.0));
    assert_eq!(realtime.battery, Some(87));
    assert_eq!(realtime.time, "2024-10-16 02:57:44");
    assert_abs_diff_eq!(realtime.temperature.unwrap(), 20.3, epsilon = 1e-9);

    assert_eq!(pod.history.len(), 2);
    assert_eq!(pod.history[0].co2, Some(800.0));
    assert_eq!(pod.history[1].co2, Some(1250.0));
    assert!(pod.history.iter().all(|r| r.pressure.is_none()));
    assert_eq!(pod.history[1].timestamp, i64::from(TS) + 300);

    assert_eq!(
        pod.co2_setting.unwrap().data_level,
        Some(DataLevelRange {
            min: 800.0,
            max: 1500.0
        })
    );
}

#[test]
fn test_generic_frame_keeps_pressure() {
    let pod = decode(&[product(0x29), realtime(&pheasant_unit(5.81))]);
    let realtime = pod.realtime.unwrap();
    assert_eq!(realtime.co2, None);
    assert_abs_diff_eq!(realtime.pressure.unwrap(), 5.81, epsilon = 1e-9);
}

// ============================================================================
// History widths
// ============================================================================

#[test]
fn test_robb_history_long_lumen() {
    let units = [
        encode_robb(&robb_reading(650.0), ReadingKind::History).unwrap(),
        encode_robb(&robb_reading(700.0), ReadingKind::History).unwrap(),
    ];
    assert_eq!(units[0].len(), 20);

    let pod = decode(&[product(0x34), history(600, &units)]);
    assert_eq!(pod.history.len(), 2);
    assert_eq!(pod.history[0].co2, Some(650.0));
    assert_eq!(pod.history[1].co2, Some(700.0));
    assert_eq!(pod.history[1].lumen, Some(70000.0));
    assert_eq!(pod.history[1].rssi, None);
    assert_eq!(pod.history[1].timestamp, i64::from(TS) + 600);
}

#[test]
fn test_robb_history_short_lumen() {
    let long = encode_robb(&robb_reading(650.0), ReadingKind::History).unwrap();
    let units = [robb_short(&long, 1200, 90), robb_short(&long, 1300, 91)];
    assert_eq!(units[0].len(), 18);

    let pod = decode(&[product(0x34), history(600, &units)]);
    assert_eq!(pod.history.len(), 2);
    assert_eq!(pod.history[0].lumen, Some(1200.0));
    assert_eq!(pod.history[1].lumen, Some(1300.0));
    assert_eq!(pod.history[1].battery, Some(91));
    assert_eq!(pod.history[0].co2, Some(650.0));
}

#[test]
fn test_frog_history_with_probe_pair() {
    let unit = encode_frog(&frog_reading(), FrogProbe::Co2WithPair).unwrap();
    assert_eq!(unit.len(), 13);

    let pod = decode(&[product(0x3C), history(60, &[unit.clone(), unit])]);
    assert_eq!(pod.history.len(), 2);
    for reading in &pod.history {
        assert_abs_diff_eq!(reading.co2_percent.unwrap(), 2.8, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.prob_temperature.unwrap(), 5.5, epsilon = 1e-9);
        assert_abs_diff_eq!(reading.prob_humidity.unwrap(), 90.0, epsilon = 1e-9);
        assert_eq!(reading.battery, Some(80));
    }
}

#[test]
fn test_frog_history_short_units() {
    let reading = SensorReading {
        temperature: Some(4.0),
        humidity: Some(70.0),
        prob_temperature: Some(-18.5),
        battery: Some(75),
        ..Default::default()
    };
    let full = encode_frog(&reading, FrogProbe::Temperature).unwrap();
    let mut unit = full[..8].to_vec();
    unit.push(75);

    let pod = decode(&[product(0x3C), history(60, &[unit.clone(), unit])]);
    assert_eq!(pod.history.len(), 2);
    let last = &pod.history[1];
    assert_abs_diff_eq!(last.prob_temperature.unwrap(), -18.5, epsilon = 1e-9);
    assert_eq!(last.co2_percent, None);
    assert_eq!(last.battery, Some(75));
    assert_eq!(last.timestamp, i64::from(TS) + 60);
}

// ============================================================================
// Realtime body lengths
// ============================================================================

#[test]
fn test_frog_realtime_eleven_byte_reading() {
    let th = TempHumidity::from_values(26.6, 58.5).unwrap();
    let mut reading = th.to_le_bytes().to_vec();
    reading.push(FrogProbe::Co2Percent.discriminator());
    reading.extend_from_slice(&28i32.to_le_bytes());
    reading.extend_from_slice(&[0x55, (-49i8) as u8, 0x00]);

    let pod = decode(&[product(0x3C), realtime(&reading)]);
    let realtime = pod.realtime.unwrap();
    assert_abs_diff_eq!(realtime.temperature.unwrap(), 26.6, epsilon = 1e-9);
    assert_abs_diff_eq!(realtime.co2_percent.unwrap(), 2.8, epsilon = 1e-9);
    assert_eq!(realtime.battery, Some(0x55));
    assert_eq!(realtime.rssi, Some(-49));
}

#[test]
fn test_frog_realtime_fifteen_byte_reading() {
    let mut expected = frog_reading();
    expected.rssi = Some(-60);
    let reading = encode_frog(&expected, FrogProbe::Co2WithPair).unwrap();
    assert_eq!(reading.len(), 15);

    let pod = decode(&[product(0x3C), realtime(&reading)]);
    let realtime = pod.realtime.unwrap();
    assert_abs_diff_eq!(realtime.prob_temperature.unwrap(), 5.5, epsilon = 1e-9);
    assert_abs_diff_eq!(realtime.prob_humidity.unwrap(), 90.0, epsilon = 1e-9);
    assert_eq!(realtime.battery, Some(80));
    assert_eq!(realtime.rssi, Some(-60));
    assert_eq!(realtime.timestamp, i64::from(TS));
}

#[test]
fn test_robb_realtime_short_lumen() {
    let long = encode_robb(&robb_reading(650.0), ReadingKind::Realtime).unwrap();
    let mut reading = robb_short(&long, 1200, 90);
    reading.extend_from_slice(&[(-70i8) as u8, 0x00]);
    assert_eq!(reading.len(), 20);

    let pod = decode(&[product(0x34), realtime(&reading)]);
    let realtime = pod.realtime.unwrap();
    assert_eq!(realtime.lumen, Some(1200.0));
    assert_eq!(realtime.battery, Some(90));
    assert_eq!(realtime.rssi, Some(-70));
    assert_eq!(realtime.co2, Some(650.0));
}

#[test]
fn test_robb_realtime_long_lumen() {
    let mut reading = encode_robb(&robb_reading(650.0), ReadingKind::Realtime).unwrap();
    reading.push(0x00);
    assert_eq!(reading.len(), 22);

    let pod = decode(&[product(0x34), realtime(&reading)]);
    let realtime = pod.realtime.unwrap();
    assert_eq!(realtime.lumen, Some(70000.0));
    assert_eq!(realtime.rssi, Some(-70));
    assert_eq!(realtime.pm10, Some(20.0));
    assert_abs_diff_eq!(realtime.pressure.unwrap(), 101.3, epsilon = 1e-9);
}
