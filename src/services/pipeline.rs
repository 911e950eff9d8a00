//! End-to-end summarization: detect, extract, classify, join

use crate::domain::error::Result;
use crate::domain::types::{EventBatch, SourceFormat};
use crate::infra::config::Config;
use crate::io::capture::read_capture;
use crate::services::classifier::classify;
use crate::services::detector::{detect, detect_bytes};
use crate::services::extractor::extractor_for;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Summary lines for one capture, in batch order
#[derive(Debug, Clone)]
pub struct Report {
    format: SourceFormat,
    batch: EventBatch,
    lines: Vec<String>,
}

impl Report {
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Extracted events the lines were rendered from
    pub fn batch(&self) -> &EventBatch {
        &self.batch
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Newline-joined summary lines
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Runs one capture through detection, extraction and classification
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Read a capture file once and summarize it
    pub fn summarize_file<P: AsRef<Path>>(&self, path: P) -> Result<Report> {
        let bytes = read_capture(path)?;
        self.summarize_bytes(&bytes)
    }

    /// Summarize raw capture bytes
    pub fn summarize_bytes(&self, bytes: &[u8]) -> Result<Report> {
        let (format, raw) = detect_bytes(bytes, &self.config)?;
        Ok(self.run(format, &raw))
    }

    /// Summarize an already parsed capture
    pub fn summarize_value(&self, raw: &Value) -> Result<Report> {
        let format = detect(raw, &self.config)?;
        Ok(self.run(format, raw))
    }

    fn run(&self, format: SourceFormat, raw: &Value) -> Report {
        let extractor = extractor_for(format, &self.config);
        let batch = extractor.extract(raw, self.config.max_events());
        let lines: Vec<String> = batch.iter().map(classify).collect();

        info!(
            format = %format,
            events = batch.len(),
            max_events = ?self.config.max_events(),
            "capture_summarized"
        );

        Report { format, batch, lines }
    }
}
