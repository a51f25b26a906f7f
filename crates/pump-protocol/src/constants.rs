//! Protocol constants
//!
//! These constants define the command codes, payload widths, and framing
//! values shared with the pump controller firmware. Every multi-byte field
//! on the wire is **little-endian**; this is the project-wide wire contract.

// ============================================================================
// Command Codes
// ============================================================================

/// Time synchronization request/response.
pub const CMD_SYNC: u8 = 0x01;
/// Start the pump for a bounded duration with a valve selection.
pub const CMD_START: u8 = 0x02;
/// Stop the pump immediately.
pub const CMD_STOP: u8 = 0x03;
/// Request a status report.
pub const CMD_STATUS: u8 = 0x04;

/// Response flag. OR-ed onto a command code to mark a reply; never a
/// command code of its own. Masked off before kind lookup.
pub const RESPONSE_FLAG: u8 = 0x80;

// ============================================================================
// Framing
// ============================================================================

/// Fixed frame header: one kind byte plus one payload-length byte.
pub const FRAME_HEADER_SIZE: usize = 2;

/// Largest payload a frame can carry (the length field is a single byte).
pub const MAX_PAYLOAD_SIZE: usize = 255;

// ============================================================================
// Payload widths (fixed per schema, little-endian fields)
// ============================================================================

/// `SyncRequest`: device_time (i64) + battery_soc (f32).
pub const SYNC_REQUEST_SIZE: usize = 12;
/// `SyncResponse`: master_time (i64).
pub const SYNC_RESPONSE_SIZE: usize = 8;
/// `StartRequest`: duration_sec (u32) + valve control mask + valve state mask.
pub const START_REQUEST_SIZE: usize = 6;
/// `StatusResponse`: device_time (i64) + battery_soc (f32) + pump state + valve mask.
pub const STATUS_RESPONSE_SIZE: usize = 14;

/// Number of valves a controller drives; the valve masks use the low bits.
pub const VALVE_COUNT: usize = 3;
