//! IO modules - capture input and report output
//!
//! - `capture` - Reads a capture export fully into memory
//! - `report` - Report text and numbered event dump output

pub mod capture;
pub mod report;

// Re-export commonly used types
pub use capture::read_capture;
pub use report::{render_event_dump, write_report_file, write_terminated};
