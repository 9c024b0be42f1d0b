//! Domain model: users, devices, API keys.
//!
//! DESIGN
//! ======
//! The API is inconsistent about field naming (`apiKeyId` vs `api_key_id`,
//! `id` vs `_id`) and about id types (strings or numbers). Every incoming
//! record goes through an explicit wire struct that lists the candidate
//! source fields, and [`pick_id`] resolves them in a fixed precedence order.
//! Outgoing bodies use a single canonical spelling per field.

pub mod api_key;
pub mod auth;
pub mod device;

use serde_json::Value;

pub use api_key::ApiKey;
pub use auth::{AuthResponse, Credentials, User};
pub use device::{Device, DevicePatch, DeviceState, DeviceStatus, DeviceType, NewDevice, Power};

/// First candidate that coerces to a non-empty string, in slice order.
///
/// Empty strings, zero, `false`, and `null` are skipped. Numbers render in
/// decimal, whole floats without a fraction. Objects and arrays are never ids.
#[must_use]
pub fn pick_id(candidates: &[Option<&Value>]) -> Option<String> {
    candidates.iter().flatten().find_map(|value| coerce_id(value))
}

fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_none_or(|f| f.abs() > f64::EPSILON) => Some(render_number(n)),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

/// Whole floats render without a fractional part, so `1.0` becomes `"1"`.
fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract().abs() < f64::EPSILON => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

// =============================================================================
// GROUPING
// =============================================================================

/// Devices attached to one API key.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct KeyGroup {
    pub api_key: ApiKey,
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct DeviceGroups {
    pub assigned: Vec<KeyGroup>,
    pub unassigned: Vec<Device>,
}

/// Partition devices by the API key they reference.
///
/// Keys keep their input order. A device with no key id, or with a key id
/// that matches none of `keys`, is unassigned. The association is not
/// validated anywhere else.
#[must_use]
pub fn group_by_api_key(devices: &[Device], keys: &[ApiKey]) -> DeviceGroups {
    let assigned = keys
        .iter()
        .map(|key| KeyGroup {
            api_key: key.clone(),
            devices: devices
                .iter()
                .filter(|d| d.api_key_id.as_deref() == Some(key.id.as_str()))
                .cloned()
                .collect(),
        })
        .collect();

    let unassigned = devices
        .iter()
        .filter(|d| {
            d.api_key_id
                .as_deref()
                .is_none_or(|id| !keys.iter().any(|k| k.id == id))
        })
        .cloned()
        .collect();

    DeviceGroups { assigned, unassigned }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
