//! Error types surfaced by summarization
//!
//! Only whole-run failures live here. Per-call and per-field anomalies are
//! absorbed by the extractors and renderers.

use std::fmt;

pub type Result<T> = std::result::Result<T, DetectionError>;

/// The capture could not be read or is not a recognized export
#[derive(Debug)]
pub enum DetectionError {
    /// Input file could not be read
    Unreadable(std::io::Error),

    /// Input is not JSON
    NotJson(serde_json::Error),

    /// Object with `events`, but no Edge Bridge Request among them
    NoEdgeBridgeEvents,

    /// Array of calls, but none to the target host
    NoTargetHost,

    /// Root is some other JSON value
    UnsupportedRoot,
}

impl DetectionError {
    /// Short reason, independent of the underlying cause
    pub fn reason(&self) -> &'static str {
        match self {
            DetectionError::Unreadable(_) => "unreadable",
            DetectionError::NotJson(_) => "not valid JSON",
            DetectionError::NoEdgeBridgeEvents => "events present but none are Edge Bridge Request",
            DetectionError::NoTargetHost => "no entries match target host",
            DetectionError::UnsupportedRoot => "root is neither object-with-events nor list",
        }
    }
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::Unreadable(err) => write!(f, "{}: {}", self.reason(), err),
            DetectionError::NotJson(err) => write!(f, "{}: {}", self.reason(), err),
            _ => f.write_str(self.reason()),
        }
    }
}

impl std::error::Error for DetectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetectionError::Unreadable(err) => Some(err),
            DetectionError::NotJson(err) => Some(err),
            DetectionError::NoEdgeBridgeEvents
            | DetectionError::NoTargetHost
            | DetectionError::UnsupportedRoot => None,
        }
    }
}

impl From<std::io::Error> for DetectionError {
    fn from(err: std::io::Error) -> Self {
        DetectionError::Unreadable(err)
    }
}

impl From<serde_json::Error> for DetectionError {
    fn from(err: serde_json::Error) -> Self {
        DetectionError::NotJson(err)
    }
}

/// A Charles call whose request body could not yield an event list
///
/// Never escapes the Charles extractor; the call is skipped.
#[derive(Debug)]
pub enum MalformedCallError {
    /// `request.body.text` missing or not a string
    MissingBody,
    /// Body text is not JSON
    InvalidJson(serde_json::Error),
    /// Body JSON is not an object
    NotAnObject,
    /// `events` present but not an array
    EventsNotArray,
}

impl fmt::Display for MalformedCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedCallError::MissingBody => f.write_str("request body text missing or not a string"),
            MalformedCallError::InvalidJson(err) => write!(f, "request body is not JSON: {}", err),
            MalformedCallError::NotAnObject => f.write_str("request body is not a JSON object"),
            MalformedCallError::EventsNotArray => f.write_str("request body events is not an array"),
        }
    }
}

impl std::error::Error for MalformedCallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MalformedCallError::InvalidJson(err) => Some(err),
            _ => None,
        }
    }
}
