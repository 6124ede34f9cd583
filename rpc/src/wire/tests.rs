//! Tests for the positional settings encoding

use std::collections::BTreeMap;

use serde_json::json;

use super::WireError;
use crate::settings::EpisodeSettings;

fn decode_err(bytes: &[u8]) -> WireError {
    EpisodeSettings::from_bytes(bytes).unwrap_err()
}

#[test]
fn test_roundtrip_preserves_every_field() {
    let cases = [
        EpisodeSettings::default(),
        EpisodeSettings::synchronous(0.05),
        EpisodeSettings::new(true, true, 0.02, false, 0.005, 12),
        EpisodeSettings::new(false, true, -1.0, true, 0.0, 0),
        EpisodeSettings::new(true, false, 1.0 / 3.0, true, 1e-9, i32::MAX),
        EpisodeSettings::new(false, false, 0.0, false, -0.25, i32::MIN),
    ];

    for settings in cases {
        let bytes = settings.to_bytes().unwrap();
        let decoded = EpisodeSettings::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, settings, "roundtrip changed {settings}");
    }
}

#[test]
fn test_decode_does_not_normalize() {
    let zero_delta = EpisodeSettings {
        fixed_delta_seconds: Some(0.0),
        ..EpisodeSettings::default()
    };
    let decoded = EpisodeSettings::from_bytes(&zero_delta.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.fixed_delta_seconds, Some(0.0));

    let payload = rmp_serde::to_vec(&(true, false, (true, -2.5f64), true, 0.01f64, 10i32)).unwrap();
    let decoded = EpisodeSettings::from_bytes(&payload).unwrap();
    assert_eq!(decoded.fixed_delta_seconds, Some(-2.5));
}

#[test]
fn test_default_wire_bytes() {
    let bytes = EpisodeSettings::default().to_bytes().unwrap();

    let mut expected = vec![
        0x96, // fixarray, 6 elements
        0xc2, // synchronous_mode: false
        0xc2, // no_rendering_mode: false
        0x91, // fixed_delta_seconds: fixarray, 1 element
        0xc2, //   absent
        0xc3, // substepping: true
        0xcb, // max_substep_delta_time: float64
    ];
    expected.extend_from_slice(&0.01f64.to_be_bytes());
    expected.push(0x0a); // max_substeps: 10

    assert_eq!(bytes, expected);
}

#[test]
fn test_layout_is_positional() {
    let value = serde_json::to_value(EpisodeSettings::synchronous(0.05)).unwrap();
    assert_eq!(value, json!([true, false, [true, 0.05], true, 0.01, 10]));

    let value = serde_json::to_value(EpisodeSettings::default()).unwrap();
    assert_eq!(value, json!([false, false, [false], true, 0.01, 10]));
}

#[test]
fn test_json_array_decodes() {
    let settings: EpisodeSettings =
        serde_json::from_str("[true, true, [true, 0.1], false, 0.02, 4]").unwrap();
    assert_eq!(settings, EpisodeSettings::new(true, true, 0.1, false, 0.02, 4));
}

#[test]
fn test_decode_marked_delta_from_peer() {
    let present = rmp_serde::to_vec(&(true, false, (true, 0.05f64), true, 0.01f64, 10i32)).unwrap();
    assert_eq!(
        EpisodeSettings::from_bytes(&present).unwrap(),
        EpisodeSettings::synchronous(0.05)
    );

    let absent = rmp_serde::to_vec(&(false, false, (false,), true, 0.01f64, 10i32)).unwrap();
    assert_eq!(
        EpisodeSettings::from_bytes(&absent).unwrap(),
        EpisodeSettings::default()
    );
}

#[test]
fn test_encoded_delta_carries_marker() {
    let bytes = EpisodeSettings::synchronous(0.05).to_bytes().unwrap();

    let mut expected = vec![
        0x96, // fixarray, 6 elements
        0xc3, // synchronous_mode: true
        0xc2, // no_rendering_mode: false
        0x92, // fixed_delta_seconds: fixarray, 2 elements
        0xc3, //   present
        0xcb, //   float64
    ];
    expected.extend_from_slice(&0.05f64.to_be_bytes());
    assert_eq!(&bytes[..expected.len()], &expected[..]);
}

#[test]
fn test_decode_rejects_malformed_delta_marker() {
    // Present marker without a value
    let payload = rmp_serde::to_vec(&(true, false, (true,), true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));

    // Absent marker followed by a value
    let payload = rmp_serde::to_vec(&(true, false, (false, 1.0f64), true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));

    // Present marker with an extra element
    let payload =
        rmp_serde::to_vec(&(true, false, (true, 0.05f64, 0.1f64), true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));

    // Empty marker array
    let payload = rmp_serde::to_vec(&(true, false, Vec::<bool>::new(), true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));

    // Marker that is not a bool
    let payload = rmp_serde::to_vec(&(true, false, (1u8, 0.05f64), true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));

    // Bare nil or float without a marker
    let payload = rmp_serde::to_vec(&(true, false, None::<f64>, true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));
    let payload = rmp_serde::to_vec(&(true, false, 0.05f64, true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));
}

#[test]
fn test_decode_rejects_short_array() {
    let payload = rmp_serde::to_vec(&(true, false, (false,), true, 0.01f64)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));
}

#[test]
fn test_decode_rejects_long_array() {
    let payload =
        rmp_serde::to_vec(&(true, false, (false,), true, 0.01f64, 10i32, 5000.0f64)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));

    let err = serde_json::from_str::<EpisodeSettings>("[true, false, [false], true, 0.01, 10, 1]");
    assert!(err.is_err());
}

#[test]
fn test_decode_rejects_wrong_element_types() {
    // Integer where a bool is expected
    let payload = rmp_serde::to_vec(&(1u8, false, (false,), true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));

    // String where the optional float is expected
    let payload = rmp_serde::to_vec(&(true, false, (true, "0.05"), true, 0.01f64, 10i32)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));

    // Substep count out of i32 range
    let payload =
        rmp_serde::to_vec(&(true, false, (false,), true, 0.01f64, i64::MAX)).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));
}

#[test]
fn test_decode_rejects_keyed_encoding() {
    let mut keyed = BTreeMap::new();
    keyed.insert("synchronous_mode", true);
    keyed.insert("no_rendering_mode", false);
    let payload = rmp_serde::to_vec(&keyed).unwrap();
    assert!(matches!(decode_err(&payload), WireError::Decode(_)));
}

#[test]
fn test_decode_rejects_truncated_payload() {
    let bytes = EpisodeSettings::synchronous(0.05).to_bytes().unwrap();
    for len in 0..bytes.len() {
        assert!(
            EpisodeSettings::from_bytes(&bytes[..len]).is_err(),
            "decoded a payload truncated to {len} bytes"
        );
    }
}

#[test]
fn test_decode_error_message() {
    let err = decode_err(&[]);
    assert!(err.to_string().starts_with("Failed to decode episode settings"));
}
