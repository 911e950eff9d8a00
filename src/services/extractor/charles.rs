//! Charles Proxy export extraction
//!
//! A Charles session is a list of raw HTTP call records. Beacons sent to the
//! analytics host carry a JSON request body whose `events` array holds the
//! canonical payloads directly.

use super::{format_context_data, EventExtractor};
use crate::domain::error::MalformedCallError;
use crate::domain::path::ValueExt;
use crate::domain::types::{CanonicalEvent, EventBatch};
use serde_json::Value;
use tracing::debug;

pub struct CharlesExtractor {
    target_host: String,
    debug: bool,
}

impl CharlesExtractor {
    pub fn new(target_host: impl Into<String>, debug: bool) -> Self {
        Self { target_host: target_host.into(), debug }
    }

    fn targets_host(&self, call: &Value) -> bool {
        call.str_at(&["host"]).unwrap_or("").contains(self.target_host.as_str())
    }

    /// Walk call records in order, stopping at the first call that fills the cap
    fn scan<'a>(
        &self,
        calls: impl IntoIterator<Item = &'a Value>,
        max_events: Option<usize>,
    ) -> Vec<CanonicalEvent> {
        let mut events: Vec<CanonicalEvent> = Vec::new();

        for (index, call) in calls.into_iter().enumerate() {
            if !self.targets_host(call) {
                continue;
            }

            let decoded = match call_events(call) {
                Ok(decoded) => decoded,
                Err(e) => {
                    if self.debug {
                        debug!(call = index + 1, error = %e, "skipping_malformed_call");
                    }
                    continue;
                }
            };

            for (event_index, event) in decoded.into_iter().enumerate() {
                let event = CanonicalEvent::new(event);

                if self.debug {
                    if let Some(ctx) = event.context_data().filter(|ctx| !ctx.is_empty()) {
                        debug!(
                            call = index + 1,
                            event = event_index + 1,
                            pairs = ctx.len(),
                            "context_data_extracted\n{}",
                            format_context_data(ctx)
                        );
                    }
                }

                events.push(event);

                if max_events.is_some_and(|cap| events.len() >= cap) {
                    if self.debug {
                        debug!(call = index + 1, events = events.len(), "event_cap_reached");
                    }
                    return events;
                }
            }
        }

        events
    }
}

/// Decode the event list embedded in a call's `request.body.text`
pub fn call_events(call: &Value) -> Result<Vec<Value>, MalformedCallError> {
    let text = call.str_at(&["request", "body", "text"]).ok_or(MalformedCallError::MissingBody)?;
    let body: Value = serde_json::from_str(text).map_err(MalformedCallError::InvalidJson)?;

    let Value::Object(mut body) = body else {
        return Err(MalformedCallError::NotAnObject);
    };

    match body.remove("events") {
        None => Ok(Vec::new()),
        Some(Value::Array(events)) => Ok(events),
        Some(_) => Err(MalformedCallError::EventsNotArray),
    }
}

impl EventExtractor for CharlesExtractor {
    fn extract(&self, raw: &Value, max_events: Option<usize>) -> EventBatch {
        let calls = raw.as_array().map(Vec::as_slice).unwrap_or_default();
        EventBatch::new(self.scan(calls, max_events))
    }
}
