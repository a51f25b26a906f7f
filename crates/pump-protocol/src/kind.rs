//! Command kind registry.
//!
//! The four base commands map bijectively between a one-byte wire code and
//! an uppercase textual name used in bus topics. The registry also knows the
//! fixed payload width each (kind, direction) pair carries, which the packet
//! codec uses to validate raw payloads before interpreting them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ProtocolError;

/// The closed set of commands exchanged with pump controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Time synchronization.
    Sync,
    /// Start pumping.
    Start,
    /// Stop pumping.
    Stop,
    /// Status report request.
    Status,
}

impl CommandKind {
    /// All kinds, in wire-code order.
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Sync,
        CommandKind::Start,
        CommandKind::Stop,
        CommandKind::Status,
    ];

    /// Wire code for this kind (response flag not included).
    pub fn code(self) -> u8 {
        match self {
            CommandKind::Sync => CMD_SYNC,
            CommandKind::Start => CMD_START,
            CommandKind::Stop => CMD_STOP,
            CommandKind::Status => CMD_STATUS,
        }
    }

    /// Canonical uppercase name used in topics and JSON bodies.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Sync => "SYNC",
            CommandKind::Start => "START",
            CommandKind::Stop => "STOP",
            CommandKind::Status => "STATUS",
        }
    }

    /// Look up a kind from its wire code. The caller must mask off
    /// [`RESPONSE_FLAG`] first; codes with the flag still set are rejected.
    pub fn from_code(code: u8) -> Result<Self, ProtocolError> {
        match code {
            CMD_SYNC => Ok(CommandKind::Sync),
            CMD_START => Ok(CommandKind::Start),
            CMD_STOP => Ok(CommandKind::Stop),
            CMD_STATUS => Ok(CommandKind::Status),
            other => Err(ProtocolError::UnknownKind(other)),
        }
    }

    /// Look up a kind from its canonical name. Case-sensitive exact match;
    /// anything else fails rather than defaulting to a kind.
    pub fn from_name(name: &str) -> Result<Self, ProtocolError> {
        match name {
            "SYNC" => Ok(CommandKind::Sync),
            "START" => Ok(CommandKind::Start),
            "STOP" => Ok(CommandKind::Stop),
            "STATUS" => Ok(CommandKind::Status),
            other => Err(ProtocolError::UnknownCommandName(other.to_string())),
        }
    }

    /// Fixed payload width for this kind in the given direction.
    ///
    /// Zero means the command legitimately carries no payload.
    pub fn payload_size(self, is_response: bool) -> usize {
        match (self, is_response) {
            (CommandKind::Sync, false) => SYNC_REQUEST_SIZE,
            (CommandKind::Sync, true) => SYNC_RESPONSE_SIZE,
            (CommandKind::Start, false) => START_REQUEST_SIZE,
            (CommandKind::Start, true) => 0,
            (CommandKind::Stop, _) => 0,
            (CommandKind::Status, false) => 0,
            (CommandKind::Status, true) => STATUS_RESPONSE_SIZE,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_name_bijection() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_code(kind.code()).unwrap(), kind);
            assert_eq!(CommandKind::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(
            CommandKind::from_code(0x7F),
            Err(ProtocolError::UnknownKind(0x7F))
        );
        // The response flag alone is not a command.
        assert_eq!(
            CommandKind::from_code(RESPONSE_FLAG),
            Err(ProtocolError::UnknownKind(RESPONSE_FLAG))
        );
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert_eq!(
            CommandKind::from_name("BOGUS"),
            Err(ProtocolError::UnknownCommandName("BOGUS".to_string()))
        );
        // Case-sensitive: lowercase must not resolve.
        assert!(CommandKind::from_name("sync").is_err());
    }

    #[test]
    fn test_payload_sizes() {
        assert_eq!(CommandKind::Sync.payload_size(false), 12);
        assert_eq!(CommandKind::Sync.payload_size(true), 8);
        assert_eq!(CommandKind::Start.payload_size(false), 6);
        assert_eq!(CommandKind::Stop.payload_size(false), 0);
        assert_eq!(CommandKind::Status.payload_size(false), 0);
        assert_eq!(CommandKind::Status.payload_size(true), 14);
    }
}
