//! Report output - summary text and the numbered event dump
//!
//! The report goes to stdout unless a file path is given, in which case the
//! file is created (or truncated) and parent directories are made as needed.

use crate::domain::types::EventBatch;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Each event as `Event N:` followed by its indented JSON body
pub fn render_event_dump(batch: &EventBatch) -> String {
    batch
        .numbered()
        .map(|(label, event)| format!("{}:\n{}", label, event.to_pretty_json()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write report text to a file, newline-terminated
pub fn write_report_file<P: AsRef<Path>>(path: P, text: &str) -> io::Result<()> {
    let path = path.as_ref();

    let result = (|| {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = fs::File::create(path)?;
        write_terminated(&mut file, text)?;
        file.flush()
    })();

    match &result {
        Ok(()) => info!(path = %path.display(), bytes = text.len(), "report_written"),
        Err(e) => debug!(path = %path.display(), error = %e, "report_write_failed"),
    }
    result
}

/// Write report text to any writer, newline-terminated unless empty
pub fn write_terminated<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    writer.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writer.write_all(b"\n")?;
    }
    Ok(())
}
