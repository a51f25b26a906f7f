//! Typed command payloads.
//!
//! Each (kind, direction) pair with a payload has one fixed-width schema.
//! Fields are laid out in declaration order, little-endian, with no padding,
//! matching the packed structs the controller firmware transmits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ProtocolError;
use crate::kind::CommandKind;

/// Pump operation state reported in a status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PumpState {
    /// Pump is not running.
    Inactive,
    /// Pump is running.
    Active,
    /// State could not be determined.
    Unknown,
}

impl PumpState {
    /// Uppercase name used in JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            PumpState::Inactive => "INACTIVE",
            PumpState::Active => "ACTIVE",
            PumpState::Unknown => "UNKNOWN",
        }
    }

    /// Parse the JSON-body form. Returns `None` for anything unrecognized.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "INACTIVE" => Some(PumpState::Inactive),
            "ACTIVE" => Some(PumpState::Active),
            "UNKNOWN" => Some(PumpState::Unknown),
            _ => None,
        }
    }
}

impl From<u8> for PumpState {
    fn from(value: u8) -> Self {
        match value {
            0 => PumpState::Inactive,
            1 => PumpState::Active,
            _ => PumpState::Unknown,
        }
    }
}

impl From<PumpState> for u8 {
    fn from(state: PumpState) -> Self {
        match state {
            PumpState::Inactive => 0,
            PumpState::Active => 1,
            PumpState::Unknown => 2,
        }
    }
}

impl fmt::Display for PumpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValveState {
    /// Valve is closed.
    Off,
    /// Valve is open.
    On,
}

/// Pack per-valve states into the low bits of a mask (bit i = valve i on).
pub fn valves_to_mask(states: [ValveState; VALVE_COUNT]) -> u8 {
    let mut mask = 0;
    for (i, state) in states.iter().enumerate() {
        if *state == ValveState::On {
            mask |= 1 << i;
        }
    }
    mask
}

/// Unpack a valve mask into per-valve states. Bits above the valve count
/// are ignored.
pub fn mask_to_valves(mask: u8) -> [ValveState; VALVE_COUNT] {
    let mut states = [ValveState::Off; VALVE_COUNT];
    for (i, state) in states.iter_mut().enumerate() {
        if mask & (1 << i) != 0 {
            *state = ValveState::On;
        }
    }
    states
}

/// A decoded command payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandPayload {
    /// SYNC request from a controller.
    SyncRequest {
        /// Controller's clock, seconds since epoch.
        device_time: i64,
        /// Battery state of charge, 0.0–100.0.
        battery_soc: f32,
    },

    /// SYNC reply from the master.
    SyncResponse {
        /// Master's clock, seconds since epoch.
        master_time: i64,
    },

    /// START request.
    StartRequest {
        /// How long to run, in seconds.
        duration_sec: u32,
        /// Bit i set = valve i participates in this run.
        valve_control_mask: u8,
        /// Bit i set = valve i requested on.
        valve_state_mask: u8,
    },

    /// STATUS reply from a controller.
    StatusResponse {
        /// Controller's clock, seconds since epoch.
        device_time: i64,
        /// Battery state of charge, 0.0–100.0.
        battery_soc: f32,
        /// Pump operation state.
        pump_state: PumpState,
        /// Bit i set = valve i currently on.
        valve_state_mask: u8,
    },

    /// No payload (STOP, plain STATUS request, START reply).
    Empty,
}

impl CommandPayload {
    /// Encode the payload to its fixed-width wire form.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            CommandPayload::SyncRequest {
                device_time,
                battery_soc,
            } => {
                let mut buf = Vec::with_capacity(SYNC_REQUEST_SIZE);
                buf.extend_from_slice(&device_time.to_le_bytes());
                buf.extend_from_slice(&battery_soc.to_le_bytes());
                buf
            }

            CommandPayload::SyncResponse { master_time } => master_time.to_le_bytes().to_vec(),

            CommandPayload::StartRequest {
                duration_sec,
                valve_control_mask,
                valve_state_mask,
            } => {
                let mut buf = Vec::with_capacity(START_REQUEST_SIZE);
                buf.extend_from_slice(&duration_sec.to_le_bytes());
                buf.push(*valve_control_mask);
                buf.push(*valve_state_mask);
                buf
            }

            CommandPayload::StatusResponse {
                device_time,
                battery_soc,
                pump_state,
                valve_state_mask,
            } => {
                let mut buf = Vec::with_capacity(STATUS_RESPONSE_SIZE);
                buf.extend_from_slice(&device_time.to_le_bytes());
                buf.extend_from_slice(&battery_soc.to_le_bytes());
                buf.push((*pump_state).into());
                buf.push(*valve_state_mask);
                buf
            }

            CommandPayload::Empty => Vec::new(),
        }
    }

    /// Decode raw payload bytes using the schema for (kind, direction).
    ///
    /// The raw length must equal the schema width exactly; a frame whose
    /// length byte disagrees with the schema is rejected, never padded or
    /// truncated.
    pub fn decode(
        kind: CommandKind,
        is_response: bool,
        raw: &[u8],
    ) -> Result<Self, ProtocolError> {
        let expected = kind.payload_size(is_response);
        if raw.len() != expected {
            return Err(ProtocolError::PayloadSizeMismatch {
                kind,
                expected,
                actual: raw.len(),
            });
        }

        match (kind, is_response) {
            (CommandKind::Sync, false) => Ok(CommandPayload::SyncRequest {
                device_time: i64::from_le_bytes(raw[0..8].try_into().unwrap()),
                battery_soc: f32::from_le_bytes(raw[8..12].try_into().unwrap()),
            }),

            (CommandKind::Sync, true) => Ok(CommandPayload::SyncResponse {
                master_time: i64::from_le_bytes(raw[0..8].try_into().unwrap()),
            }),

            (CommandKind::Start, false) => Ok(CommandPayload::StartRequest {
                duration_sec: u32::from_le_bytes(raw[0..4].try_into().unwrap()),
                valve_control_mask: raw[4],
                valve_state_mask: raw[5],
            }),

            (CommandKind::Status, true) => Ok(CommandPayload::StatusResponse {
                device_time: i64::from_le_bytes(raw[0..8].try_into().unwrap()),
                battery_soc: f32::from_le_bytes(raw[8..12].try_into().unwrap()),
                pump_state: PumpState::from(raw[12]),
                valve_state_mask: raw[13],
            }),

            _ => Ok(CommandPayload::Empty),
        }
    }
}
