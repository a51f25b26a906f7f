//! Protocol error types.

use thiserror::Error;

use crate::kind::CommandKind;

/// Errors that can occur when encoding or decoding command packets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is shorter than its header plus declared payload length.
    #[error("truncated frame: expected at least {expected} bytes, got {actual}")]
    TruncatedFrame {
        /// Minimum length the frame declared.
        expected: usize,
        /// Bytes actually received.
        actual: usize,
    },

    /// Payload does not fit in the single-byte length field.
    #[error("payload too large: maximum {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Maximum payload the framing can carry.
        max: usize,
        /// Payload length requested.
        actual: usize,
    },

    /// Kind byte (response flag already masked off) is not a known command.
    #[error("unknown command kind: 0x{0:02X}")]
    UnknownKind(u8),

    /// Textual command name does not match any known command.
    #[error("unknown command name: {0:?}")]
    UnknownCommandName(String),

    /// Raw payload length does not match the schema for the kind.
    #[error("payload size mismatch for {kind}: expected {expected} bytes, got {actual}")]
    PayloadSizeMismatch {
        /// Command kind whose schema was expected.
        kind: CommandKind,
        /// Schema width in bytes.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
}
