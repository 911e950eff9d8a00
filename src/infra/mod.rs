//! Infrastructure - configuration and logging setup
//!
//! - `config` - Application configuration (TOML loading, defaults, CLI overrides)
//! - `logging` - tracing subscriber initialization

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::Config;
