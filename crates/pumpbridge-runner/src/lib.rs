//! Pump bridge daemon library.
//!
//! Configuration loading and the channel-based service glue that connects
//! the translation layer to its wireless and bus transport adapters.

pub mod config;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use service::{BridgeService, BusPort, WirelessPort};
