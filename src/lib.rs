//! Analytics beacon summarizer library
//!
//! Turns an Adobe Assurance or Charles Proxy capture into one summary line per
//! analytics event. Exposes modules for integration testing and binary reuse.

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;
