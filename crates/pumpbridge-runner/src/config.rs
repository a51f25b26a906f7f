//! Bridge configuration.
//!
//! Loaded once at startup from a JSON file shaped like the one the
//! controller fleet's provisioning already produces:
//!
//! ```json
//! {
//!     "mqtt": {
//!         "uri": "mqtts://broker.example:8883",
//!         "username": "bridge",
//!         "password": "secret"
//!     },
//!     "topics": { "prefix": "pump_controller" },
//!     "wireless": { "address": "aa:bb:cc:dd:ee:ff" }
//! }
//! ```
//!
//! The `wireless.address` is the hardware address the bridge's radio
//! presents; it is announced once at startup on `<prefix>/bridge/mac`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use pumpbridge_translate::Address;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Config file is not valid JSON or is missing required fields.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Broker connection settings, handed to the bus collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct MqttConfig {
    /// Broker URI.
    pub uri: String,
    /// Broker username.
    #[serde(default)]
    pub username: String,
    /// Broker password.
    #[serde(default)]
    pub password: String,
}

/// Topic naming settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicsConfig {
    /// Prefix every bridge topic lives under.
    pub prefix: String,
}

/// Wireless link settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WirelessConfig {
    /// Hardware address the bridge's radio presents.
    #[serde(default)]
    pub address: Option<Address>,
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Broker connection settings.
    pub mqtt: MqttConfig,
    /// Topic naming settings.
    pub topics: TopicsConfig,
    /// Wireless link settings.
    #[serde(default)]
    pub wireless: WirelessConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The bridge's own address, all zeros when not configured.
    pub fn bridge_address(&self) -> Address {
        self.wireless.address.unwrap_or(Address::new([0; 6]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "mqtt": {
                    "uri": "mqtts://broker.example:8883",
                    "username": "bridge",
                    "password": "secret"
                },
                "topics": { "prefix": "pump_controller" },
                "wireless": { "address": "aa:bb:cc:dd:ee:ff" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.mqtt.uri, "mqtts://broker.example:8883");
        assert_eq!(config.topics.prefix, "pump_controller");
        assert_eq!(
            config.bridge_address().to_string(),
            "aa:bb:cc:dd:ee:ff"
        );
    }

    #[test]
    fn test_wireless_section_optional() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "mqtt": { "uri": "mqtt://localhost" },
                "topics": { "prefix": "pump_controller" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.bridge_address().to_string(), "00:00:00:00:00:00");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_address_rejected() {
        let result: Result<AppConfig, _> = serde_json::from_str(
            r#"{
                "mqtt": { "uri": "mqtt://localhost" },
                "topics": { "prefix": "p" },
                "wireless": { "address": "AA:BB:CC:DD:EE:FF" }
            }"#,
        );
        assert!(result.is_err());
    }
}
