//! Configuration loading and root logger construction.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backend::{SharedSink, TracingBackend};
use crate::config::schema::{LoggerConfig, OutputTarget, LEVEL_ENV_VAR};
use crate::config::validation::{validate_config, ValidationError};
use crate::level::to_log_level;
use crate::logger::ContextLogger;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("cannot open log file {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::info!(path = ?path, level = %config.level, "Logger configuration loaded");
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LoggerConfig, ConfigError> {
    let config: LoggerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

impl LoggerConfig {
    /// Apply a level override, e.g. from the environment. Empty values are ignored.
    pub fn with_level_override(mut self, level: Option<&str>) -> Self {
        if let Some(name) = level.filter(|name| !name.trim().is_empty()) {
            self.level = to_log_level(name.trim());
        }
        self
    }

    /// Apply `LOG_LEVEL` if it is set.
    pub fn apply_env(self) -> Self {
        let level = std::env::var(LEVEL_ENV_VAR).ok();
        self.with_level_override(level.as_deref())
    }

    /// Build a root logger from this configuration.
    pub fn build(&self) -> Result<ContextLogger, ConfigError> {
        validate_config(self).map_err(ConfigError::Validation)?;

        let builder = TracingBackend::builder()
            .level(self.level)
            .format(self.format)
            .ansi(self.with_ansi);

        let builder = match self.output {
            OutputTarget::Stdout => builder.writer(io::stdout()),
            OutputTarget::Stderr => builder.writer(io::stderr()),
            OutputTarget::Null => builder.sink(SharedSink::discard()),
            OutputTarget::File => {
                let path = self
                    .file_path
                    .clone()
                    .ok_or_else(|| ConfigError::Validation(vec![ValidationError::MissingFilePath]))?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|source| ConfigError::Output {
                        path: path.clone(),
                        source,
                    })?;
                tracing::debug!(path = ?path, "Log file opened");
                builder.writer(file)
            }
        };

        Ok(ContextLogger::new(builder.build()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LogFormat;
    use crate::level::Level;
    use crate::logger::Logger;
    use std::io::Write;
    use tracing_test::traced_test;

    #[test]
    fn test_parse_minimal() {
        let config = parse_config("").unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let config = parse_config(
            r#"
            level = "DEBUG"
            format = "text"
            output = "stderr"
            with_ansi = true
            "#,
        )
        .unwrap();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.output, OutputTarget::Stderr);
        assert!(config.with_ansi);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = parse_config("level = \"loud\"").unwrap();
        assert_eq!(config.level, Level::Info);
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(matches!(parse_config("level = "), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_runs_validation() {
        let err = parse_config("output = \"file\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("file_path"));
    }

    #[test]
    fn test_level_override() {
        let config = LoggerConfig::default().with_level_override(Some("trace"));
        assert_eq!(config.level, Level::Trace);

        let config = LoggerConfig::default().with_level_override(Some("  "));
        assert_eq!(config.level, Level::Info);

        let config = LoggerConfig::default().with_level_override(None);
        assert_eq!(config.level, Level::Info);
    }

    #[traced_test]
    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "level = \"warn\"\noutput = \"null\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.output, OutputTarget::Null);
        assert!(logs_contain("Logger configuration loaded"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/logger.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_build_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let config = LoggerConfig {
            output: OutputTarget::File,
            file_path: Some(path.clone()),
            ..LoggerConfig::default()
        };

        let logger = config.build().unwrap();
        logger.set_area("startup").info("service ready");
        logger.backend().sink().flush().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let record: serde_json::Value = serde_json::from_str(written.lines().next().unwrap()).unwrap();
        assert_eq!(record["message"], "service ready");
        assert_eq!(record["Area"], "startup");
    }

    #[test]
    fn test_build_null_output() {
        let config = LoggerConfig {
            level: Level::Debug,
            output: OutputTarget::Null,
            ..LoggerConfig::default()
        };
        let logger = config.build().unwrap();
        assert_eq!(logger.level(), Level::Debug);
    }
}
