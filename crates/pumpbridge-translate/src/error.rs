//! Translation error types.

use thiserror::Error;

use pump_protocol::ProtocolError;

/// Errors that can occur while translating between transports.
///
/// All of these are per-message conditions: the offending message is
/// dropped and logged, and the next message is unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// Address text is not the canonical `xx:xx:xx:xx:xx:xx` form.
    #[error("malformed address: {0:?}")]
    MalformedAddress(String),

    /// Topic does not start with the configured prefix segment.
    #[error("topic prefix mismatch: expected prefix {prefix:?}, got topic {topic:?}")]
    TopicPrefixMismatch {
        /// Configured prefix.
        prefix: String,
        /// Offending topic.
        topic: String,
    },

    /// Topic has too few segments or an unrecognized direction segment.
    #[error("topic shape mismatch: {reason} in topic {topic:?}")]
    TopicShapeMismatch {
        /// What was wrong with the shape.
        reason: &'static str,
        /// Offending topic.
        topic: String,
    },

    /// JSON body lacks a field the payload schema requires.
    #[error("payload field missing: {field:?}")]
    PayloadFieldMissing {
        /// Schema field name.
        field: &'static str,
    },

    /// JSON body has a field of the wrong type or out of range.
    #[error("payload field type mismatch: {field:?} is not a valid {expected}")]
    PayloadFieldTypeMismatch {
        /// Schema field name.
        field: &'static str,
        /// Expected type description.
        expected: &'static str,
    },

    /// Packet-level failure from the command protocol.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
