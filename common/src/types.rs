use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    #[default]
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered device. `qr_hash` is always derived from `mac_address`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub model: String,
    pub mac_address: String,
    pub location: String,
    pub status: DeviceStatus,
    pub qr_hash: String,
    pub last_activity: DateTime<Utc>,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A device as submitted for creation, before the directory assigns
/// `id`, `qr_hash` and `last_activity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub name: String,
    pub model: String,
    pub mac_address: String,
    pub location: String,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Online,
    Offline,
}

impl StatusFilter {
    pub fn matches(&self, status: DeviceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Online => status == DeviceStatus::Online,
            StatusFilter::Offline => status == DeviceStatus::Offline,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "online" => Ok(StatusFilter::Online),
            "offline" => Ok(StatusFilter::Offline),
            other => Err(format!("unknown status filter: {}", other)),
        }
    }
}

/// One successful resolution of a device's QR hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessLog {
    pub id: String,
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DeviceStats {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub active: usize,
}
