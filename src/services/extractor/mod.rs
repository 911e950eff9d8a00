//! Event extraction - one extractor per capture format
//!
//! Each extractor walks its format's structure and yields an [`EventBatch`]
//! of canonical `{xdm, data}` payloads. The two formats apply `max_events`
//! at different points:
//! - Assurance caps accepted matches, then sorts by timestamp
//! - Charles returns as soon as the cap is reached, in call order

pub mod assurance;
pub mod charles;

use crate::domain::types::{EventBatch, SourceFormat};
use crate::infra::config::Config;
use serde_json::{Map, Value};

pub use assurance::AssuranceExtractor;
pub use charles::CharlesExtractor;

/// Turns a parsed capture into canonical events
pub trait EventExtractor {
    /// Extract events, keeping at most `max_events` when set
    fn extract(&self, raw: &Value, max_events: Option<usize>) -> EventBatch;
}

/// Select the extractor for a detected format
pub fn extractor_for(format: SourceFormat, config: &Config) -> Box<dyn EventExtractor> {
    match format {
        SourceFormat::Assurance => Box::new(AssuranceExtractor::new(
            config.edge_bridge_event_name(),
            config.debug(),
        )),
        SourceFormat::Charles => {
            Box::new(CharlesExtractor::new(config.target_host(), config.debug()))
        }
    }
}

/// Context data pairs as aligned `key  value` lines
pub fn format_context_data(context_data: &Map<String, Value>) -> String {
    let width = context_data.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    context_data
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("  {:<width$}  {}", key, value, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
