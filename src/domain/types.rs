//! Shared types for capture summarization

use crate::domain::path::ValueExt;
use serde_json::Value;
use std::borrow::Cow;

/// Capture export shape, decided by the format detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Adobe Assurance session export (`{"events": [...]}`)
    Assurance,
    /// Charles Proxy session export (`[{host, request, ...}, ...]`)
    Charles,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Assurance => "assurance",
            SourceFormat::Charles => "charles",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event type discriminator read from `xdm.eventType`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType<'a> {
    Launch,
    Track,
    Close,
    /// Any other discriminator, carried through for the passthrough line
    Other(Cow<'a, str>),
    /// No discriminator present
    Unknown,
}

impl<'a> EventType<'a> {
    pub fn from_discriminator(discriminator: Option<Cow<'a, str>>) -> Self {
        let Some(name) = discriminator else {
            return EventType::Unknown;
        };
        match name.as_ref() {
            "application.launch" => EventType::Launch,
            "analytics.track" => EventType::Track,
            "application.close" => EventType::Close,
            _ => EventType::Other(name),
        }
    }

    /// Discriminator as written in the capture, or "Unknown"
    pub fn label(&self) -> &str {
        match self {
            EventType::Launch => "application.launch",
            EventType::Track => "analytics.track",
            EventType::Close => "application.close",
            EventType::Other(name) => name.as_ref(),
            EventType::Unknown => "Unknown",
        }
    }
}

/// One analytics beacon payload in canonical `{xdm, data}` shape
///
/// Created by an extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEvent(Value);

impl CanonicalEvent {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }

    pub fn event_type(&self) -> EventType<'_> {
        EventType::from_discriminator(self.0.text_at(&["xdm", "eventType"]))
    }

    /// `data.__adobe.analytics`, if the event carries an analytics block
    pub fn analytics(&self) -> Option<&Value> {
        self.0.at(&["data", "__adobe", "analytics"])
    }

    /// `data.__adobe.analytics.contextData` key/value pairs
    pub fn context_data(&self) -> Option<&serde_json::Map<String, Value>> {
        self.0.object_at(&["data", "__adobe", "analytics", "contextData"])
    }

    /// Indented JSON body for the numbered event dump
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for CanonicalEvent {
    fn from(payload: Value) -> Self {
        Self(payload)
    }
}

/// Ordered sequence of canonical events from one capture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
    events: Vec<CanonicalEvent>,
}

impl EventBatch {
    pub fn new(events: Vec<CanonicalEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalEvent> {
        self.events.iter()
    }

    /// Events labelled "Event 1", "Event 2", ... in batch order
    pub fn numbered(&self) -> impl Iterator<Item = (String, &CanonicalEvent)> {
        self.events.iter().enumerate().map(|(i, event)| (format!("Event {}", i + 1), event))
    }
}

impl FromIterator<CanonicalEvent> for EventBatch {
    fn from_iter<I: IntoIterator<Item = CanonicalEvent>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a EventBatch {
    type Item = &'a CanonicalEvent;
    type IntoIter = std::slice::Iter<'a, CanonicalEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
