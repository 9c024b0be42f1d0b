use super::*;
use serde_json::json;

fn decode(value: serde_json::Value) -> Device {
    serde_json::from_value(value).unwrap()
}

// =============================================================================
// Device decode
// =============================================================================

#[test]
fn snake_case_key_id_is_normalized() {
    let device = decode(json!({
        "id": "d1", "name": "Lamp", "type": "light", "room": "Den",
        "state": "on", "status": "online", "api_key_id": "k1"
    }));
    assert_eq!(device.api_key_id.as_deref(), Some("k1"));
}

#[test]
fn camel_case_key_id_wins_over_snake_case() {
    let device = decode(json!({
        "id": "d1", "name": "Lamp", "type": "light", "room": "Den",
        "state": "on", "apiKeyId": "camel", "api_key_id": "snake"
    }));
    assert_eq!(device.api_key_id.as_deref(), Some("camel"));
}

#[test]
fn empty_camel_key_id_falls_through() {
    let device = decode(json!({
        "id": "d1", "name": "Lamp", "type": "light", "room": "Den",
        "state": "off", "apiKeyId": "", "api_key_id": "snake"
    }));
    assert_eq!(device.api_key_id.as_deref(), Some("snake"));
}

#[test]
fn missing_key_id_is_none() {
    let device = decode(json!({
        "id": "d1", "name": "Lamp", "type": "light", "room": "Den", "state": "off"
    }));
    assert_eq!(device.api_key_id, None);
}

#[test]
fn underscore_id_is_fallback() {
    let device = decode(json!({
        "_id": "mongo-1", "name": "Fan", "type": "fan", "room": "Attic", "state": 3
    }));
    assert_eq!(device.id, "mongo-1");
    assert_eq!(device.state, DeviceState::Level(3.0));
}

#[test]
fn missing_status_defaults_to_offline() {
    let device = decode(json!({
        "id": "d1", "name": "TV", "type": "tv", "room": "Living", "state": "off"
    }));
    assert_eq!(device.status, DeviceStatus::Offline);
}

#[test]
fn unknown_type_is_rejected() {
    let result = serde_json::from_value::<Device>(json!({
        "id": "d1", "name": "Oven", "type": "oven", "room": "Kitchen", "state": "off"
    }));
    assert!(result.is_err());
}

#[test]
fn serialized_device_uses_camel_case_only() {
    let device = decode(json!({
        "id": "d1", "name": "Lamp", "type": "light", "room": "Den",
        "state": "on", "api_key_id": "k1", "icon_name": "Lightbulb"
    }));
    let out = serde_json::to_value(&device).unwrap();
    assert_eq!(out["apiKeyId"], "k1");
    assert_eq!(out["iconName"], "Lightbulb");
    assert!(out.get("api_key_id").is_none());
    assert_eq!(out["type"], "light");
    assert_eq!(out["state"], "on");
}

// =============================================================================
// Outgoing shapes
// =============================================================================

#[test]
fn new_device_sends_snake_case_key_id_only() {
    let device = NewDevice {
        name: "Lamp".into(),
        device_type: DeviceType::Light,
        room: "Den".into(),
        state: DeviceState::Power(Power::Off),
        status: DeviceStatus::Online,
        last_seen: None,
        icon_name: Some("Lightbulb".into()),
        api_key_id: Some("k1".into()),
    };
    let body = serde_json::to_value(&device).unwrap();
    assert_eq!(body["api_key_id"], "k1");
    assert!(body.get("apiKeyId").is_none());
    assert_eq!(body["iconName"], "Lightbulb");
    assert_eq!(body["state"], "off");
    assert!(body.get("lastSeen").is_none());
}

#[test]
fn patch_sends_only_set_fields() {
    let patch = DevicePatch { state: Some(DeviceState::Level(21.5)), ..DevicePatch::default() };
    let body = serde_json::to_value(&patch).unwrap();
    assert_eq!(body, json!({ "state": 21.5 }));
}

#[test]
fn patch_key_id_is_snake_case() {
    let patch = DevicePatch { api_key_id: Some("k2".into()), ..DevicePatch::default() };
    let body = serde_json::to_value(&patch).unwrap();
    assert_eq!(body, json!({ "api_key_id": "k2" }));
    assert!(!patch.is_empty());
    assert!(DevicePatch::default().is_empty());
}

// =============================================================================
// Parsing helpers
// =============================================================================

#[test]
fn device_type_parse_and_icon() {
    assert_eq!("Thermostat".parse::<DeviceType>().unwrap(), DeviceType::Thermostat);
    assert_eq!(DeviceType::Tv.icon_name(), "Tv2");
    assert_eq!(DeviceType::Switch.to_string(), "switch");
    assert!("oven".parse::<DeviceType>().is_err());
}

#[test]
fn device_state_parse() {
    assert_eq!("on".parse::<DeviceState>().unwrap(), DeviceState::Power(Power::On));
    assert_eq!("OFF".parse::<DeviceState>().unwrap(), DeviceState::Power(Power::Off));
    assert_eq!("22".parse::<DeviceState>().unwrap(), DeviceState::Level(22.0));
    assert!("warm".parse::<DeviceState>().is_err());
}

#[test]
fn level_counts_as_on() {
    assert!(DeviceState::Level(0.0).is_on());
    assert!(DeviceState::Power(Power::On).is_on());
    assert!(!DeviceState::Power(Power::Off).is_on());
}
