//! Bus topic naming.
//!
//! Topics follow the grammar the controller fleet's broker uses:
//!
//! ```text
//! <prefix>/<address>/commands/<NAME>        inbound control
//! <prefix>/<address>/status/<NAME>/data     outbound status
//! ```
//!
//! `<NAME>` is the command's canonical uppercase name. Parsing anchors the
//! prefix at the start of the topic; a prefix string recurring later in the
//! path (inside an address segment, say) must not re-anchor the parse.

use crate::address::Address;
use crate::error::TranslateError;

/// Direction segment of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Control messages flowing toward a controller.
    Commands,
    /// Status publications flowing from a controller.
    Status,
}

impl Direction {
    /// The topic segment for this direction.
    pub fn segment(self) -> &'static str {
        match self {
            Direction::Commands => "commands",
            Direction::Status => "status",
        }
    }
}

/// The fields recovered from a well-formed topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTopic {
    /// Controller address from the second segment.
    pub address: Address,
    /// Direction from the third segment.
    pub direction: Direction,
    /// Command name from the fourth segment, verbatim.
    pub command: String,
}

/// Build the topic a command for `address` arrives on.
pub fn build_command_topic(prefix: &str, address: &Address, command: &str) -> String {
    format!("{}/{}/commands/{}", prefix, address, command)
}

/// Build the topic a status report from `address` is published to.
pub fn build_status_topic(prefix: &str, address: &Address, command: &str) -> String {
    format!("{}/{}/status/{}/data", prefix, address, command)
}

/// Build the one-shot topic the bridge announces its own address on.
pub fn build_bridge_mac_topic(prefix: &str) -> String {
    format!("{}/bridge/mac", prefix)
}

/// The subscription filter covering every command topic under `prefix`.
pub fn command_subscription_filter(prefix: &str) -> String {
    format!("{}/+/commands/#", prefix)
}

/// Parse a topic into address, direction, and command name.
///
/// Trailing segments after the command name (the `/data` suffix on status
/// topics) are accepted and ignored.
pub fn parse_topic(prefix: &str, topic: &str) -> Result<ParsedTopic, TranslateError> {
    let rest = topic
        .strip_prefix(prefix)
        .and_then(|r| r.strip_prefix('/'))
        .ok_or_else(|| TranslateError::TopicPrefixMismatch {
            prefix: prefix.to_string(),
            topic: topic.to_string(),
        })?;

    let mut segments = rest.splitn(4, '/');
    let address_text = segments.next().unwrap_or("");
    let direction_text = segments.next();
    let command_text = segments.next();

    let (direction_text, command_text) = match (direction_text, command_text) {
        (Some(d), Some(c)) if !c.is_empty() => (d, c),
        _ => {
            return Err(TranslateError::TopicShapeMismatch {
                reason: "expected <address>/<direction>/<command>",
                topic: topic.to_string(),
            })
        }
    };

    let direction = match direction_text {
        "commands" => Direction::Commands,
        "status" => Direction::Status,
        _ => {
            return Err(TranslateError::TopicShapeMismatch {
                reason: "direction segment is neither \"commands\" nor \"status\"",
                topic: topic.to_string(),
            })
        }
    };

    let address = Address::parse(address_text)?;

    // splitn(4) leaves any trailing segments attached to the fourth piece;
    // only the first of them is the command name.
    let command = command_text
        .split('/')
        .next()
        .unwrap_or(command_text)
        .to_string();

    Ok(ParsedTopic {
        address,
        direction,
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "pump_controller";

    fn addr() -> Address {
        Address::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF])
    }

    #[test]
    fn test_build_topics() {
        assert_eq!(
            build_command_topic(PREFIX, &addr(), "START"),
            "pump_controller/aa:bb:cc:dd:ee:ff/commands/START"
        );
        assert_eq!(
            build_status_topic(PREFIX, &addr(), "STOP"),
            "pump_controller/aa:bb:cc:dd:ee:ff/status/STOP/data"
        );
        assert_eq!(build_bridge_mac_topic(PREFIX), "pump_controller/bridge/mac");
        assert_eq!(
            command_subscription_filter(PREFIX),
            "pump_controller/+/commands/#"
        );
    }

    #[test]
    fn test_parse_command_topic_round_trip() {
        let topic = build_command_topic(PREFIX, &addr(), "START");
        let parsed = parse_topic(PREFIX, &topic).unwrap();
        assert_eq!(parsed.address, addr());
        assert_eq!(parsed.direction, Direction::Commands);
        assert_eq!(parsed.command, "START");
    }

    #[test]
    fn test_parse_status_topic_ignores_data_suffix() {
        let topic = build_status_topic(PREFIX, &addr(), "STATUS");
        let parsed = parse_topic(PREFIX, &topic).unwrap();
        assert_eq!(parsed.direction, Direction::Status);
        assert_eq!(parsed.command, "STATUS");
    }

    #[test]
    fn test_prefix_must_anchor_at_start() {
        let topic = format!("other_prefix/{}/commands/STOP", addr());
        assert!(matches!(
            parse_topic(PREFIX, &topic),
            Err(TranslateError::TopicPrefixMismatch { .. })
        ));

        // The prefix recurring later in the topic must not rescue the parse.
        let topic = format!("other/{}/commands/pump_controller", addr());
        assert!(matches!(
            parse_topic(PREFIX, &topic),
            Err(TranslateError::TopicPrefixMismatch { .. })
        ));
    }

    #[test]
    fn test_prefix_segment_boundary() {
        // "pump_controller_x/..." shares a prefix string but not a segment.
        let topic = format!("pump_controller_x/{}/commands/STOP", addr());
        assert!(matches!(
            parse_topic(PREFIX, &topic),
            Err(TranslateError::TopicPrefixMismatch { .. })
        ));
    }

    #[test]
    fn test_too_few_segments() {
        for topic in [
            "pump_controller",
            "pump_controller/aa:bb:cc:dd:ee:ff",
            "pump_controller/aa:bb:cc:dd:ee:ff/commands",
            "pump_controller/aa:bb:cc:dd:ee:ff/commands/",
        ] {
            assert!(
                matches!(
                    parse_topic(PREFIX, topic),
                    Err(TranslateError::TopicPrefixMismatch { .. })
                        | Err(TranslateError::TopicShapeMismatch { .. })
                ),
                "accepted {:?}",
                topic
            );
        }
    }

    #[test]
    fn test_unknown_direction_segment() {
        let topic = format!("pump_controller/{}/events/STOP", addr());
        assert!(matches!(
            parse_topic(PREFIX, &topic),
            Err(TranslateError::TopicShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_bad_address_segment() {
        let topic = "pump_controller/not-an-address/commands/STOP";
        assert!(matches!(
            parse_topic(PREFIX, topic),
            Err(TranslateError::MalformedAddress(_))
        ));
    }
}
