//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backend::LogFormat;
use crate::level::Level;

/// Environment variable overriding [`LoggerConfig::level`].
pub const LEVEL_ENV_VAR: &str = "LOG_LEVEL";

/// Root logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Initial severity threshold (e.g., "info", "DEBUG").
    pub level: Level,

    /// Record encoding.
    pub format: LogFormat,

    /// Where records go.
    pub output: OutputTarget,

    /// Log file path. Required when `output = "file"`.
    pub file_path: Option<PathBuf>,

    /// ANSI colours for the text format.
    pub with_ansi: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: LogFormat::Json,
            output: OutputTarget::Stdout,
            file_path: None,
            with_ansi: false,
        }
    }
}

/// Output destination of the root backend.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
    File,
    /// Discard everything.
    Null,
}
