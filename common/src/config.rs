use serde::{Deserialize, Serialize};
use std::result::Result as StdResult;
use std::str::FromStr;
use crate::error::InventoryError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bind_address: String,
    /// Origin used to build the public `/device/{qrHash}` lookup URL.
    pub public_base_url: String,
    /// In-memory store when unset.
    pub redis_url: Option<String>,
    pub seed_mock_devices: bool,
    pub mock_seed: u64,
    pub mock_device_count: usize,
    pub active_window_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            redis_url: None,
            seed_mock_devices: true,
            mock_seed: 42,
            mock_device_count: 12,
            active_window_days: 7,
        }
    }
}

impl Config {
    pub fn load() -> StdResult<Self, InventoryError> {
        let defaults = Self::default();

        Ok(Self {
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or(defaults.bind_address),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or(defaults.public_base_url),
            redis_url: std::env::var("REDIS_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            seed_mock_devices: env_parse("SEED_MOCK_DEVICES", defaults.seed_mock_devices)?,
            mock_seed: env_parse("MOCK_SEED", defaults.mock_seed)?,
            mock_device_count: env_parse("MOCK_DEVICE_COUNT", defaults.mock_device_count)?,
            active_window_days: env_parse("ACTIVE_WINDOW_DAYS", defaults.active_window_days)?,
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> StdResult<T, InventoryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> StdResult<T, InventoryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| InventoryError::Configuration(format!("{}={:?}: {}", key, raw, e)))
}
