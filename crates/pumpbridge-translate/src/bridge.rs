//! The bridge translator.
//!
//! Two pure entry points convert between the transports. Both are stateless
//! per call; the only held value is the immutable topic prefix, so a single
//! [`Bridge`] can be shared across delivery threads without locking.
//!
//! Neither function performs I/O: the wireless collaborator hands frames in
//! and sends [`WirelessSend`] descriptors out, the bus collaborator hands
//! messages in and publishes [`BusPublish`] descriptors out. A failed
//! translation drops the single offending message and leaves the next one
//! unaffected.

use serde_json::Value;

use pump_protocol::{CommandKind, CommandPacket};

use crate::address::Address;
use crate::error::TranslateError;
use crate::json;
use crate::topic;

/// An outbound bus publication produced from a wireless frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusPublish {
    /// Destination topic.
    pub topic: String,
    /// JSON body, serialized.
    pub body: String,
}

/// An outbound wireless frame produced from a bus message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirelessSend {
    /// Destination hardware address.
    pub dest_address: Address,
    /// Complete wire frame.
    pub frame: Vec<u8>,
}

/// Translates between wireless frames and bus messages.
#[derive(Debug, Clone)]
pub struct Bridge {
    prefix: String,
}

impl Bridge {
    /// Create a bridge for the configured topic prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Bridge {
            prefix: prefix.into(),
        }
    }

    /// The configured topic prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The subscription filter the bus collaborator should use.
    pub fn command_subscription_filter(&self) -> String {
        topic::command_subscription_filter(&self.prefix)
    }

    /// The topic for the one-shot bridge address announcement.
    pub fn bridge_mac_topic(&self) -> String {
        topic::build_bridge_mac_topic(&self.prefix)
    }

    /// Translate an inbound wireless frame into a bus publication.
    ///
    /// The frame is decoded in three stages (framing, kind, typed payload)
    /// and every stage failure rejects the whole frame; nothing is
    /// published from a frame that did not fully decode.
    pub fn wireless_to_bus(
        &self,
        source_address: Address,
        frame: &[u8],
    ) -> Result<BusPublish, TranslateError> {
        let packet = CommandPacket::decode(frame).map_err(|e| {
            log::warn!(
                "dropping frame from {}: {} (raw: {:02x?})",
                source_address,
                e,
                frame
            );
            e
        })?;
        let payload = packet.decode_payload().map_err(|e| {
            log::warn!(
                "dropping {} frame from {}: {} (raw payload: {:02x?})",
                packet.kind,
                source_address,
                e,
                packet.payload
            );
            e
        })?;

        let body = json::build_body(packet.kind, packet.is_response, &payload);
        let topic = topic::build_status_topic(&self.prefix, &source_address, packet.kind.name());

        Ok(BusPublish {
            topic,
            body: body.to_string(),
        })
    }

    /// Translate an inbound bus message into a wireless frame.
    ///
    /// An empty or unparseable body is treated as "no parameters", which is
    /// valid for zero-payload commands; a kind that requires parameters
    /// then fails on the first missing field. An unrecognized command name
    /// is an error, never silently mapped to another command.
    pub fn bus_to_wireless(
        &self,
        topic_text: &str,
        body: &[u8],
    ) -> Result<WirelessSend, TranslateError> {
        let parsed = topic::parse_topic(&self.prefix, topic_text).map_err(|e| {
            log::warn!("dropping bus message on {:?}: {}", topic_text, e);
            e
        })?;
        let kind = CommandKind::from_name(&parsed.command).map_err(|e| {
            log::warn!("dropping bus message on {:?}: {}", topic_text, e);
            TranslateError::from(e)
        })?;

        // Commands without parameters legitimately arrive with no body.
        let raw_body = body;
        let body: Value = serde_json::from_slice(raw_body).unwrap_or(Value::Null);

        let is_response = json::response_flag(&body)?;
        let payload = json::extract_payload(kind, is_response, &body).map_err(|e| {
            log::warn!(
                "dropping {} command for {}: {} (body: {:?})",
                kind,
                parsed.address,
                e,
                String::from_utf8_lossy(raw_body)
            );
            e
        })?;

        let frame = CommandPacket::new(kind, is_response, &payload).encode()?;

        Ok(WirelessSend {
            dest_address: parsed.address,
            frame,
        })
    }
}
