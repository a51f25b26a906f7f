//! Pump Controller Command Protocol
//!
//! This crate provides the binary command-packet protocol shared between the
//! bridge and the pump controller fleet. Each wireless frame carries one
//! framed packet: a kind byte (top bit = response flag), a payload length
//! byte, and a fixed-width payload whose schema is selected by the kind.
//!
//! All multi-byte payload fields are little-endian; see [`constants`] for
//! the wire contract.
//!
//! # Example
//!
//! ```rust
//! use pump_protocol::{CommandKind, CommandPacket, CommandPayload};
//!
//! // Frame a START command
//! let payload = CommandPayload::StartRequest {
//!     duration_sec: 120,
//!     valve_control_mask: 0b011,
//!     valve_state_mask: 0b001,
//! };
//! let frame = CommandPacket::new(CommandKind::Start, false, &payload)
//!     .encode()
//!     .unwrap();
//!
//! // Decode a received frame
//! let packet = CommandPacket::decode(&frame).unwrap();
//! assert_eq!(packet.decode_payload().unwrap(), payload);
//! ```

pub mod constants;
mod error;
mod kind;
mod packet;
mod payload;

pub use constants::*;
pub use error::*;
pub use kind::*;
pub use packet::*;
pub use payload::*;
