//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. SUMMARIZE_CONFIG environment variable
//! 3. Built-in defaults (no file)
//!
//! Command line flags are applied on top with the `with_*` builders.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "SUMMARIZE_CONFIG";

/// Analytics collection host the app under test sends beacons to
pub const DEFAULT_TARGET_HOST: &str = "hilton.data.adobedc.net";

/// Assurance event name wrapping an analytics beacon
pub const DEFAULT_EDGE_BRIDGE_EVENT_NAME: &str = "Edge Bridge Request";

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Host matched exactly during detection and as a substring during Charles extraction
    #[serde(default = "default_target_host")]
    pub target_host: String,
    /// `payload.ACPExtensionEventName` value marking Assurance beacons
    #[serde(default = "default_edge_bridge_event_name")]
    pub edge_bridge_event_name: String,
}

fn default_target_host() -> String {
    DEFAULT_TARGET_HOST.to_string()
}

fn default_edge_bridge_event_name() -> String {
    DEFAULT_EDGE_BRIDGE_EVENT_NAME.to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            target_host: default_target_host(),
            edge_bridge_event_name: default_edge_bridge_event_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExtractConfig {
    /// Cap on extracted events (0 or absent for no cap)
    #[serde(default)]
    pub max_events: Option<usize>,
    /// Emit per-event debug narration
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    target_host: String,
    edge_bridge_event_name: String,
    max_events: Option<usize>,
    debug: bool,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_host: DEFAULT_TARGET_HOST.to_string(),
            edge_bridge_event_name: DEFAULT_EDGE_BRIDGE_EVENT_NAME.to_string(),
            max_events: None,
            debug: false,
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine config file path from the CLI value or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> Option<String> {
        if let Some(path) = cli_path {
            return Some(path.to_string());
        }

        env::var(CONFIG_ENV_VAR).ok().filter(|path| !path.is_empty())
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            target_host: toml_config.capture.target_host,
            edge_bridge_event_name: toml_config.capture.edge_bridge_event_name,
            max_events: normalize_cap(toml_config.extract.max_events),
            debug: toml_config.extract.debug,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn target_host(&self) -> &str {
        &self.target_host
    }

    pub fn edge_bridge_event_name(&self) -> &str {
        &self.edge_bridge_event_name
    }

    pub fn max_events(&self) -> Option<usize> {
        self.max_events
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn with_target_host(mut self, host: impl Into<String>) -> Self {
        self.target_host = host.into();
        self
    }

    pub fn with_edge_bridge_event_name(mut self, name: impl Into<String>) -> Self {
        self.edge_bridge_event_name = name.into();
        self
    }

    /// Set the event cap; 0 clears it
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = normalize_cap(Some(max_events));
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// A cap of zero means "no cap"
fn normalize_cap(max_events: Option<usize>) -> Option<usize> {
    max_events.filter(|&n| n > 0)
}
