//! Command packet framing.
//!
//! Each wireless frame carries exactly one command packet:
//!
//! ```text
//! +----------+----------+--------------------+
//! | kind     | len      | payload[0..len]    |
//! +----------+----------+--------------------+
//! ```
//!
//! The kind byte's top bit is the response flag ([`RESPONSE_FLAG`]); it is
//! masked off before kind lookup and carried separately. The frame must be
//! exactly `2 + len` bytes; shorter frames are rejected without reading past
//! the buffer, longer frames keep only the declared payload.
//!
//! Decoding is three-stage by design: frame → (kind, response flag, raw
//! payload) → typed payload. A frame with an unrecognized kind is rejected
//! cleanly instead of interpreting its payload with a guessed schema.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ProtocolError;
use crate::kind::CommandKind;
use crate::payload::CommandPayload;

/// A framed command packet with its payload still raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPacket {
    /// Command kind (response flag already masked off).
    pub kind: CommandKind,
    /// Whether the response flag was set on the kind byte.
    pub is_response: bool,
    /// Raw payload bytes, exactly as received.
    pub payload: Vec<u8>,
}

impl CommandPacket {
    /// Build a packet carrying a typed payload.
    pub fn new(kind: CommandKind, is_response: bool, payload: &CommandPayload) -> Self {
        CommandPacket {
            kind,
            is_response,
            payload: payload.encode(),
        }
    }

    /// Build a zero-payload packet (STOP, plain STATUS request).
    pub fn empty(kind: CommandKind) -> Self {
        CommandPacket {
            kind,
            is_response: false,
            payload: Vec::new(),
        }
    }

    /// Encode the packet to its wire frame.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::PayloadTooLarge {
                max: MAX_PAYLOAD_SIZE,
                actual: self.payload.len(),
            });
        }

        let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + self.payload.len());
        let mut kind_byte = self.kind.code();
        if self.is_response {
            kind_byte |= RESPONSE_FLAG;
        }
        frame.push(kind_byte);
        frame.push(self.payload.len() as u8);
        frame.extend_from_slice(&self.payload);
        Ok(frame)
    }

    /// Decode a wire frame into a packet with a raw payload.
    pub fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        if frame.len() < FRAME_HEADER_SIZE {
            return Err(ProtocolError::TruncatedFrame {
                expected: FRAME_HEADER_SIZE,
                actual: frame.len(),
            });
        }

        let is_response = frame[0] & RESPONSE_FLAG != 0;
        let kind = CommandKind::from_code(frame[0] & !RESPONSE_FLAG)?;
        let payload_len = frame[1] as usize;

        if frame.len() < FRAME_HEADER_SIZE + payload_len {
            return Err(ProtocolError::TruncatedFrame {
                expected: FRAME_HEADER_SIZE + payload_len,
                actual: frame.len(),
            });
        }

        Ok(CommandPacket {
            kind,
            is_response,
            payload: frame[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + payload_len].to_vec(),
        })
    }

    /// Interpret the raw payload with the schema for this packet's kind
    /// and direction.
    pub fn decode_payload(&self) -> Result<CommandPayload, ProtocolError> {
        CommandPayload::decode(self.kind, self.is_response, &self.payload)
    }
}
