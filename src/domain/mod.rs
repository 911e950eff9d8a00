//! Domain models - capture formats, canonical events and errors
//!
//! - `types` - `SourceFormat`, `CanonicalEvent`, `EventBatch`, `EventType`
//! - `path` - absent-on-miss lookups through untyped JSON
//! - `error` - `DetectionError` and the recoverable `MalformedCallError`

pub mod error;
pub mod path;
pub mod types;

pub use error::{DetectionError, MalformedCallError};
pub use path::ValueExt;
pub use types::{CanonicalEvent, EventBatch, EventType, SourceFormat};
