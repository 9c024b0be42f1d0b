//! Device records and the shapes sent when creating or patching them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::pick_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Light,
    Thermostat,
    Fan,
    Tv,
    Switch,
}

impl DeviceType {
    /// Dashboard icon shown for newly added devices of this type.
    #[must_use]
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Light => "Lightbulb",
            Self::Thermostat => "Thermometer",
            Self::Fan => "Wind",
            Self::Tv => "Tv2",
            Self::Switch => "ToggleLeft",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Thermostat => "thermostat",
            Self::Fan => "fan",
            Self::Tv => "tv",
            Self::Switch => "switch",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "thermostat" => Ok(Self::Thermostat),
            "fan" => Ok(Self::Fan),
            "tv" => Ok(Self::Tv),
            "switch" => Ok(Self::Switch),
            other => Err(format!("unknown device type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    Off,
}

/// Either a power switch position or a numeric level (brightness,
/// temperature, fan speed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceState {
    Power(Power),
    Level(f64),
}

impl DeviceState {
    /// Any level counts as on.
    #[must_use]
    pub fn is_on(self) -> bool {
        !matches!(self, Self::Power(Power::Off))
    }
}

impl FromStr for DeviceState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(Self::Power(Power::On)),
            "off" => Ok(Self::Power(Power::Off)),
            other => other
                .parse::<f64>()
                .map(Self::Level)
                .map_err(|_| format!("state must be 'on', 'off', or a number, got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    #[default]
    Offline,
}

// =============================================================================
// DEVICE
// =============================================================================

/// A device as returned by the API, with the API-key association normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireDevice")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub room: String,
    pub state: DeviceState,
    pub status: DeviceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,
}

/// Incoming device record. Precedence: `id` over `_id`, `apiKeyId` over
/// `api_key_id`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDevice {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    underscore_id: Option<Value>,
    name: String,
    #[serde(rename = "type")]
    device_type: DeviceType,
    #[serde(default)]
    room: String,
    state: DeviceState,
    #[serde(default)]
    status: DeviceStatus,
    #[serde(default, alias = "last_seen")]
    last_seen: Option<String>,
    #[serde(default, alias = "icon_name")]
    icon_name: Option<String>,
    #[serde(default)]
    api_key_id: Option<Value>,
    #[serde(default, rename = "api_key_id")]
    api_key_id_snake: Option<Value>,
}

impl From<WireDevice> for Device {
    fn from(wire: WireDevice) -> Self {
        Self {
            id: pick_id(&[wire.id.as_ref(), wire.underscore_id.as_ref()]).unwrap_or_default(),
            name: wire.name,
            device_type: wire.device_type,
            room: wire.room,
            state: wire.state,
            status: wire.status,
            last_seen: wire.last_seen,
            icon_name: wire.icon_name,
            api_key_id: pick_id(&[wire.api_key_id.as_ref(), wire.api_key_id_snake.as_ref()]),
        }
    }
}

// =============================================================================
// OUTGOING SHAPES
// =============================================================================

/// A device to create. The API-key association is sent as `api_key_id` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub room: String,
    pub state: DeviceState,
    pub status: DeviceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(rename = "api_key_id", skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,
}

/// Partial device update. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<DeviceState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(rename = "api_key_id", skip_serializing_if = "Option::is_none")]
    pub api_key_id: Option<String>,
}

impl DevicePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[path = "device_test.rs"]
mod tests;
