//! Capture file input
//!
//! The whole file is read into memory in one call and the handle is closed
//! before parsing starts.

use crate::domain::error::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a capture export fully into memory
pub fn read_capture<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "capture_read");
            Ok(bytes)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "capture_unreadable");
            Err(e.into())
        }
    }
}
