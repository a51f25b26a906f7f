//! JSON payload bodies.
//!
//! Bus messages carry flat JSON objects with one key per payload field,
//! field names matching the binary schema verbatim, plus `command` and an
//! optional `response` flag (omitted when false). Field extraction is
//! strict: a missing or mistyped field aborts the translation rather than
//! producing a partially filled packet.

use serde_json::{json, Map, Value};

use pump_protocol::{CommandKind, CommandPayload, PumpState};

use crate::error::TranslateError;

/// Build the JSON body for an outbound bus publication.
pub fn build_body(kind: CommandKind, is_response: bool, payload: &CommandPayload) -> Value {
    let mut body = Map::new();
    body.insert("command".to_string(), json!(kind.name()));
    if is_response {
        body.insert("response".to_string(), json!(true));
    }

    match payload {
        CommandPayload::SyncRequest {
            device_time,
            battery_soc,
        } => {
            body.insert("device_time".to_string(), json!(device_time));
            body.insert("battery_soc".to_string(), json!(battery_soc));
        }

        CommandPayload::SyncResponse { master_time } => {
            body.insert("master_time".to_string(), json!(master_time));
        }

        CommandPayload::StartRequest {
            duration_sec,
            valve_control_mask,
            valve_state_mask,
        } => {
            body.insert("duration_sec".to_string(), json!(duration_sec));
            body.insert("valve_control_mask".to_string(), json!(valve_control_mask));
            body.insert("valve_state_mask".to_string(), json!(valve_state_mask));
        }

        CommandPayload::StatusResponse {
            device_time,
            battery_soc,
            pump_state,
            valve_state_mask,
        } => {
            body.insert("device_time".to_string(), json!(device_time));
            body.insert("battery_soc".to_string(), json!(battery_soc));
            body.insert("pump_state".to_string(), json!(pump_state.as_str()));
            body.insert("valve_state_mask".to_string(), json!(valve_state_mask));
        }

        CommandPayload::Empty => {}
    }

    Value::Object(body)
}

/// Read the `response` flag from a body. Absent means false; any
/// non-boolean value is a type mismatch.
pub fn response_flag(body: &Value) -> Result<bool, TranslateError> {
    match body.get("response") {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(TranslateError::PayloadFieldTypeMismatch {
            field: "response",
            expected: "boolean",
        }),
    }
}

/// Extract the typed payload for (kind, direction) from a JSON body.
///
/// Kinds that carry no payload in this direction succeed regardless of the
/// body's contents.
pub fn extract_payload(
    kind: CommandKind,
    is_response: bool,
    body: &Value,
) -> Result<CommandPayload, TranslateError> {
    if kind.payload_size(is_response) == 0 {
        return Ok(CommandPayload::Empty);
    }

    match (kind, is_response) {
        (CommandKind::Sync, false) => Ok(CommandPayload::SyncRequest {
            device_time: require_i64(body, "device_time")?,
            battery_soc: require_f32(body, "battery_soc")?,
        }),

        (CommandKind::Sync, true) => Ok(CommandPayload::SyncResponse {
            master_time: require_i64(body, "master_time")?,
        }),

        (CommandKind::Start, false) => Ok(CommandPayload::StartRequest {
            duration_sec: require_u32(body, "duration_sec")?,
            valve_control_mask: require_u8(body, "valve_control_mask")?,
            valve_state_mask: require_u8(body, "valve_state_mask")?,
        }),

        (CommandKind::Status, true) => Ok(CommandPayload::StatusResponse {
            device_time: require_i64(body, "device_time")?,
            battery_soc: require_f32(body, "battery_soc")?,
            pump_state: require_pump_state(body)?,
            valve_state_mask: require_u8(body, "valve_state_mask")?,
        }),

        // Unreachable: every nonzero-size pair is matched above.
        _ => Ok(CommandPayload::Empty),
    }
}

fn require<'a>(body: &'a Value, field: &'static str) -> Result<&'a Value, TranslateError> {
    body.get(field)
        .ok_or(TranslateError::PayloadFieldMissing { field })
}

fn require_i64(body: &Value, field: &'static str) -> Result<i64, TranslateError> {
    require(body, field)?
        .as_i64()
        .ok_or(TranslateError::PayloadFieldTypeMismatch {
            field,
            expected: "integer",
        })
}

fn require_u32(body: &Value, field: &'static str) -> Result<u32, TranslateError> {
    require(body, field)?
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(TranslateError::PayloadFieldTypeMismatch {
            field,
            expected: "unsigned 32-bit integer",
        })
}

fn require_u8(body: &Value, field: &'static str) -> Result<u8, TranslateError> {
    require(body, field)?
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or(TranslateError::PayloadFieldTypeMismatch {
            field,
            expected: "unsigned 8-bit integer",
        })
}

fn require_f32(body: &Value, field: &'static str) -> Result<f32, TranslateError> {
    require(body, field)?
        .as_f64()
        .map(|v| v as f32)
        .ok_or(TranslateError::PayloadFieldTypeMismatch {
            field,
            expected: "number",
        })
}

fn require_pump_state(body: &Value) -> Result<PumpState, TranslateError> {
    let field = "pump_state";
    require(body, field)?
        .as_str()
        .and_then(PumpState::from_str_opt)
        .ok_or(TranslateError::PayloadFieldTypeMismatch {
            field,
            expected: "pump state name",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_for_stop() {
        let body = build_body(CommandKind::Stop, false, &CommandPayload::Empty);
        assert_eq!(body, json!({ "command": "STOP" }));
    }

    #[test]
    fn test_response_flag_only_when_set() {
        let body = build_body(CommandKind::Start, true, &CommandPayload::Empty);
        assert_eq!(body, json!({ "command": "START", "response": true }));
        assert!(response_flag(&body).unwrap());
        assert!(!response_flag(&json!({ "command": "STOP" })).unwrap());
    }

    #[test]
    fn test_status_response_body_fields() {
        let payload = CommandPayload::StatusResponse {
            device_time: 1_724_700_000,
            battery_soc: 55.25,
            pump_state: PumpState::Active,
            valve_state_mask: 0b010,
        };
        let body = build_body(CommandKind::Status, true, &payload);
        assert_eq!(body["command"], "STATUS");
        assert_eq!(body["response"], true);
        assert_eq!(body["device_time"], 1_724_700_000i64);
        assert_eq!(body["pump_state"], "ACTIVE");
        assert_eq!(body["valve_state_mask"], 2);

        let extracted = extract_payload(CommandKind::Status, true, &body).unwrap();
        assert_eq!(extracted, payload);
    }

    #[test]
    fn test_extract_start_request() {
        let body = json!({
            "duration_sec": 120,
            "valve_control_mask": 3,
            "valve_state_mask": 1,
        });
        assert_eq!(
            extract_payload(CommandKind::Start, false, &body).unwrap(),
            CommandPayload::StartRequest {
                duration_sec: 120,
                valve_control_mask: 3,
                valve_state_mask: 1,
            }
        );
    }

    #[test]
    fn test_missing_field_aborts() {
        let body = json!({ "duration_sec": 120 });
        assert_eq!(
            extract_payload(CommandKind::Start, false, &body),
            Err(TranslateError::PayloadFieldMissing {
                field: "valve_control_mask",
            })
        );
    }

    #[test]
    fn test_mistyped_field_aborts() {
        let body = json!({
            "duration_sec": "two minutes",
            "valve_control_mask": 3,
            "valve_state_mask": 1,
        });
        assert!(matches!(
            extract_payload(CommandKind::Start, false, &body),
            Err(TranslateError::PayloadFieldTypeMismatch {
                field: "duration_sec",
                ..
            })
        ));

        // Out of range counts as mistyped, not truncated.
        let body = json!({
            "duration_sec": 120,
            "valve_control_mask": 300,
            "valve_state_mask": 1,
        });
        assert!(matches!(
            extract_payload(CommandKind::Start, false, &body),
            Err(TranslateError::PayloadFieldTypeMismatch {
                field: "valve_control_mask",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_payload_kind_ignores_body() {
        assert_eq!(
            extract_payload(CommandKind::Stop, false, &Value::Null).unwrap(),
            CommandPayload::Empty
        );
        assert_eq!(
            extract_payload(CommandKind::Status, false, &json!({"extra": 1})).unwrap(),
            CommandPayload::Empty
        );
    }

    #[test]
    fn test_null_body_reports_missing_fields() {
        assert_eq!(
            extract_payload(CommandKind::Start, false, &Value::Null),
            Err(TranslateError::PayloadFieldMissing {
                field: "duration_sec",
            })
        );
    }
}
