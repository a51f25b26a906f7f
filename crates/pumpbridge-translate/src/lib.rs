//! Pump Bridge Translation
//!
//! This crate converts between the two transports carrying the pump fleet's
//! command set: wireless frames of binary [`pump_protocol`] packets
//! addressed by 6-byte hardware address, and bus messages carrying JSON
//! bodies on prefixed topics.
//!
//! The [`Bridge`] holds only the configured topic prefix and exposes two
//! pure translation calls:
//!
//! - [`Bridge::wireless_to_bus`] — inbound frame to outbound publication
//! - [`Bridge::bus_to_wireless`] — inbound bus message to outbound frame
//!
//! # Example
//!
//! ```rust
//! use pumpbridge_translate::{Address, Bridge};
//!
//! let bridge = Bridge::new("pump_controller");
//! let source = Address::parse("aa:bb:cc:dd:ee:ff").unwrap();
//!
//! // STOP frame from a controller becomes a status publication.
//! let publish = bridge.wireless_to_bus(source, &[0x03, 0x00]).unwrap();
//! assert_eq!(
//!     publish.topic,
//!     "pump_controller/aa:bb:cc:dd:ee:ff/status/STOP/data"
//! );
//! ```

mod address;
mod bridge;
mod error;
mod json;
pub mod topic;

pub use address::*;
pub use bridge::*;
pub use error::*;
pub use json::{build_body, extract_payload, response_flag};
