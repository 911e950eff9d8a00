//! Capture format detection
//!
//! Decides whether a parsed capture is an Assurance export or a Charles
//! export. Each candidate sequence is scanned in full before failing; the
//! scan stops at the first qualifying element.

use crate::domain::error::{DetectionError, Result};
use crate::domain::path::ValueExt;
use crate::domain::types::SourceFormat;
use crate::infra::config::Config;
use crate::services::extractor::assurance::is_edge_bridge_request;
use serde_json::Value;
use tracing::{debug, info};

/// Parse raw capture bytes as JSON
pub fn parse_capture(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Parse raw bytes and detect their format in one step
pub fn detect_bytes(bytes: &[u8], config: &Config) -> Result<(SourceFormat, Value)> {
    let raw = parse_capture(bytes)?;
    let format = detect(&raw, config)?;
    Ok((format, raw))
}

/// Decide the export format of a parsed capture
pub fn detect(raw: &Value, config: &Config) -> Result<SourceFormat> {
    let format = match raw {
        Value::Object(root) if root.contains_key("events") => {
            let events = root.get("events").and_then(Value::as_array);
            let found = events.is_some_and(|events| {
                events.iter().any(|e| is_edge_bridge_request(e, config.edge_bridge_event_name()))
            });
            if !found {
                debug!(
                    events = events.map_or(0, Vec::len),
                    event_name = %config.edge_bridge_event_name(),
                    "no_edge_bridge_events"
                );
                return Err(DetectionError::NoEdgeBridgeEvents);
            }
            SourceFormat::Assurance
        }
        Value::Array(calls) => {
            if !calls.iter().any(|call| is_target_host_call(call, config.target_host())) {
                debug!(calls = calls.len(), host = %config.target_host(), "no_target_host_calls");
                return Err(DetectionError::NoTargetHost);
            }
            SourceFormat::Charles
        }
        _ => return Err(DetectionError::UnsupportedRoot),
    };

    info!(format = %format, "format_detected");
    Ok(format)
}

/// Call record whose `host` equals the target host exactly
fn is_target_host_call(call: &Value, target_host: &str) -> bool {
    call.str_at(&["host"]) == Some(target_host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_detect_assurance() {
        let raw = json!({"events": [
            {"payload": {"ACPExtensionEventName": "Lifecycle Start"}},
            {"payload": {"ACPExtensionEventName": "Edge Bridge Request"}}
        ]});
        assert_eq!(detect(&raw, &config()).unwrap(), SourceFormat::Assurance);
    }

    #[test]
    fn test_detect_assurance_without_bridge_events() {
        let raw = json!({"events": [{"payload": {"ACPExtensionEventName": "Lifecycle Start"}}, 7]});
        assert!(matches!(detect(&raw, &config()), Err(DetectionError::NoEdgeBridgeEvents)));

        let not_a_list = json!({"events": {"payload": {}}});
        assert!(matches!(detect(&not_a_list, &config()), Err(DetectionError::NoEdgeBridgeEvents)));
    }

    #[test]
    fn test_detect_charles() {
        let raw = json!([
            "noise",
            {"host": "cdn.example.com"},
            {"host": "hilton.data.adobedc.net", "request": {}}
        ]);
        assert_eq!(detect(&raw, &config()).unwrap(), SourceFormat::Charles);
    }

    #[test]
    fn test_detect_charles_requires_exact_host() {
        let raw = json!([{"host": "eu.hilton.data.adobedc.net"}, {"host": null}]);
        assert!(matches!(detect(&raw, &config()), Err(DetectionError::NoTargetHost)));
        assert!(matches!(detect(&json!([]), &config()), Err(DetectionError::NoTargetHost)));
    }

    #[test]
    fn test_detect_uses_configured_names() {
        let config = Config::default()
            .with_target_host("collect.example.org")
            .with_edge_bridge_event_name("Bridge");
        let charles = json!([{"host": "collect.example.org"}]);
        let assurance = json!({"events": [{"payload": {"ACPExtensionEventName": "Bridge"}}]});
        assert_eq!(detect(&charles, &config).unwrap(), SourceFormat::Charles);
        assert_eq!(detect(&assurance, &config).unwrap(), SourceFormat::Assurance);
    }

    #[test]
    fn test_detect_unsupported_roots() {
        for raw in [json!({"log": []}), json!("text"), json!(12), json!(null)] {
            assert!(matches!(detect(&raw, &config()), Err(DetectionError::UnsupportedRoot)));
        }
    }

    #[test]
    fn test_detect_bytes_rejects_non_json() {
        let err = detect_bytes(b"<html>", &config()).unwrap_err();
        assert_eq!(err.reason(), "not valid JSON");
    }

    #[test]
    fn test_detection_is_deterministic() {
        let bytes = br#"[{"host": "hilton.data.adobedc.net"}]"#;
        let first = detect_bytes(bytes, &config()).unwrap().0;
        let second = detect_bytes(bytes, &config()).unwrap().0;
        assert_eq!(first, second);
    }
}
