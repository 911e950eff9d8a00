//! Services - the summarization pipeline stages
//!
//! - `detector` - Decides Assurance vs Charles from the parsed capture
//! - `extractor` - Per-format extraction into canonical events
//! - `classifier` - Event type dispatch and one-line rendering
//! - `pipeline` - Composes the stages into a report

pub mod classifier;
pub mod detector;
pub mod extractor;
pub mod pipeline;

// Re-export commonly used types
pub use classifier::classify;
pub use detector::detect;
pub use extractor::{extractor_for, EventExtractor};
pub use pipeline::{Pipeline, Report};
