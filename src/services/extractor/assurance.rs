//! Adobe Assurance export extraction
//!
//! Assurance captures wrap every analytics beacon in an "Edge Bridge Request"
//! event whose `payload.ACPExtensionEventData` already is the canonical
//! `{xdm, data}` payload.

use super::{format_context_data, EventExtractor};
use crate::domain::path::ValueExt;
use crate::domain::types::{CanonicalEvent, EventBatch};
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use tracing::debug;

/// True when `event.payload.ACPExtensionEventName` equals `event_name`
pub fn is_edge_bridge_request(event: &Value, event_name: &str) -> bool {
    event.str_at(&["payload", "ACPExtensionEventName"]) == Some(event_name)
}

pub struct AssuranceExtractor {
    edge_bridge_event_name: String,
    debug: bool,
}

impl AssuranceExtractor {
    pub fn new(edge_bridge_event_name: impl Into<String>, debug: bool) -> Self {
        Self { edge_bridge_event_name: edge_bridge_event_name.into(), debug }
    }

    fn narrate(&self, index: usize, timestamp: Option<&Number>, payload: &Value) {
        let at = timestamp.map_or_else(|| "Unknown".to_string(), format_timestamp);
        match payload.object_at(&["data", "__adobe", "analytics", "contextData"]) {
            Some(ctx) if !ctx.is_empty() => {
                debug!(
                    event = index + 1,
                    timestamp = %at,
                    pairs = ctx.len(),
                    "context_data_extracted\n{}",
                    format_context_data(ctx)
                );
            }
            _ => debug!(event = index + 1, timestamp = %at, "no_context_data_found"),
        }
    }
}

impl EventExtractor for AssuranceExtractor {
    fn extract(&self, raw: &Value, max_events: Option<usize>) -> EventBatch {
        let events = raw.array_at(&["events"]).map(Vec::as_slice).unwrap_or_default();

        let mut kept: Vec<(Number, Value)> = Vec::new();
        let mut processed = 0usize;

        for (index, event) in events.iter().enumerate() {
            if max_events.is_some_and(|cap| kept.len() >= cap) {
                break;
            }
            processed += 1;

            if !is_edge_bridge_request(event, &self.edge_bridge_event_name) {
                continue;
            }

            let payload = event
                .at(&["payload", "ACPExtensionEventData"])
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            let timestamp = match event.get("timestamp") {
                Some(Value::Number(n)) => Some(n.clone()),
                _ => None,
            };

            if self.debug {
                self.narrate(index, timestamp.as_ref(), &payload);
            }

            kept.push((timestamp.unwrap_or_else(|| Number::from(0)), payload));
        }

        if self.debug {
            debug!(processed, kept = kept.len(), "assurance_extraction_complete");
        }

        // Stable: equal timestamps keep capture order
        kept.sort_by(|(a, _), (b, _)| compare_timestamps(a, b));

        kept.into_iter().map(|(_, payload)| CanonicalEvent::new(payload)).collect()
    }
}

/// Orders capture timestamps by full numeric value
///
/// Integers compare exactly; mixed or fractional pairs compare as `f64`.
fn compare_timestamps(a: &Number, b: &Number) -> Ordering {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a.cmp(&b);
    }
    let a = a.as_f64().unwrap_or(0.0);
    let b = b.as_f64().unwrap_or(0.0);
    a.total_cmp(&b)
}

/// Epoch milliseconds as RFC 3339, or the raw number when out of range
fn format_timestamp(timestamp: &Number) -> String {
    timestamp
        .as_f64()
        .filter(|ms| *ms > 0.0)
        .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}
