//! Application configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `PARKING__<SECTION>__<KEY>` environment variables.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! directory = "logs"
//!
//! [lot]
//! capacity = 6
//!
//! [metrics]
//! enabled = true
//! ```

use crate::error::{Error, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub lot: LotConfig,
    pub metrics: MetricsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for daily rolling log files; console only when unset
    pub directory: Option<PathBuf>,
    /// Emit JSON lines on the console
    pub json: bool,
    /// Colored console output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            json: false,
            ansi: true,
        }
    }
}

/// Parking lot configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotConfig {
    /// Create a lot of this many slots before the first command
    pub capacity: Option<i64>,
}

/// Metrics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Print the Prometheus exposition after a run
    pub enabled: bool,
}

impl AppConfig {
    /// Load defaults, then `path` (if any), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("PARKING")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>())
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }
}
