//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the output target has what it needs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::backend::LogFormat;
use crate::config::schema::{LoggerConfig, OutputTarget};

/// A single semantic problem with a [`LoggerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("output = \"file\" requires file_path")]
    MissingFilePath,

    #[error("file_path is empty")]
    EmptyFilePath,

    #[error("with_ansi only applies to the text format")]
    AnsiWithJson,
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match (&config.output, &config.file_path) {
        (OutputTarget::File, None) => errors.push(ValidationError::MissingFilePath),
        (_, Some(path)) if path.as_os_str().is_empty() => {
            errors.push(ValidationError::EmptyFilePath)
        }
        _ => {}
    }

    if config.with_ansi && config.format == LogFormat::Json {
        errors.push(ValidationError::AnsiWithJson);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&LoggerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = LoggerConfig {
            output: OutputTarget::File,
            with_ansi: true,
            ..LoggerConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MissingFilePath, ValidationError::AnsiWithJson]
        );
    }

    #[test]
    fn test_empty_path() {
        let config = LoggerConfig {
            output: OutputTarget::File,
            file_path: Some(PathBuf::new()),
            ..LoggerConfig::default()
        };
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::EmptyFilePath]
        );
    }
}
