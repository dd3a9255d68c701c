//! `tracing-subscriber` backed engine.
//!
//! # Responsibilities
//! - Hold the root threshold (façade levels, including panic and fatal)
//! - Parse level names the way `tracing` does, plus `panic` and `fatal`
//! - Format records into the shared sink: JSON lines through
//!   [`JsonLineLayer`](crate::backend::layer), text through the fmt subscriber
//!
//! # Design Decisions
//! - JSON lines by default, plain text for local development
//! - Records are dispatched with `dispatcher::with_default` on a private
//!   `Dispatch`, so several roots can coexist with the global subscriber
//! - Event field names are static, so the façade fields travel as one
//!   serialized `fields` value that the JSON layer spreads into top-level keys
//! - `severity` keeps panic/fatal apart from error since `tracing` tops out
//!   at ERROR

use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

use crate::backend::layer::{JsonLineLayer, WriteError};
use crate::backend::sink::SharedSink;
use crate::backend::{Backend, Record};
use crate::error::{LoggerError, LoggerResult};
use crate::level::Level;

/// Output encoding of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

/// Builder for [`TracingBackend`].
pub struct TracingBackendBuilder {
    level: Level,
    format: LogFormat,
    ansi: bool,
    sink: SharedSink,
}

impl TracingBackendBuilder {
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// ANSI colours, text format only.
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.sink = SharedSink::new(writer);
        self
    }

    pub fn sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> TracingBackend {
        let write_error = WriteError::default();

        // Gating happens on the façade threshold; let everything through here.
        let dispatch = match self.format {
            LogFormat::Json => Dispatch::new(
                tracing_subscriber::registry()
                    .with(JsonLineLayer::new(self.sink.clone(), write_error.clone())),
            ),
            LogFormat::Text => Dispatch::new(
                tracing_subscriber::fmt()
                    .with_writer(self.sink.clone())
                    .with_max_level(LevelFilter::TRACE)
                    .with_target(false)
                    .with_ansi(self.ansi)
                    .finish(),
            ),
        };

        TracingBackend {
            threshold: AtomicU8::new(self.level as u8),
            sink: self.sink,
            dispatch,
            write_error,
        }
    }
}

/// Root logging state: threshold, sink and subscriber.
pub struct TracingBackend {
    threshold: AtomicU8,
    sink: SharedSink,
    dispatch: Dispatch,
    write_error: WriteError,
}

impl TracingBackend {
    /// JSON lines on stdout at `level`.
    pub fn new(level: Level) -> Self {
        Self::builder().level(level).build()
    }

    /// Discards every record.
    pub fn nop() -> Self {
        Self::builder().sink(SharedSink::discard()).build()
    }

    pub fn builder() -> TracingBackendBuilder {
        TracingBackendBuilder {
            level: Level::Info,
            format: LogFormat::Json,
            ansi: false,
            sink: SharedSink::default(),
        }
    }

    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }
}

impl Backend for TracingBackend {
    fn parse_level(&self, name: &str) -> LoggerResult<Level> {
        let invalid = || LoggerError::InvalidLevel {
            level: name.to_string(),
        };

        match name {
            "panic" => return Ok(Level::Panic),
            "fatal" => return Ok(Level::Fatal),
            _ => {}
        }

        let level = LevelFilter::from_str(name)
            .map_err(|_| invalid())?
            .into_level()
            .ok_or_else(invalid)?;

        Ok(match level {
            l if l == tracing::Level::ERROR => Level::Error,
            l if l == tracing::Level::WARN => Level::Warn,
            l if l == tracing::Level::INFO => Level::Info,
            l if l == tracing::Level::DEBUG => Level::Debug,
            _ => Level::Trace,
        })
    }

    fn level(&self) -> Level {
        Level::from_ordinal(u32::from(self.threshold.load(Ordering::Relaxed))).unwrap_or_default()
    }

    fn set_level(&self, level: Level) {
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    fn emit(&self, record: &Record) {
        if !self.level().enables(record.level) {
            return;
        }

        let severity = record.level.as_str();
        let message = record.message.as_str();
        let fields = match serde_json::to_string(&record.fields) {
            Ok(fields) => fields,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize log fields");
                return;
            }
        };
        let fields = fields.as_str();

        // `fields` is the name `JsonLineLayer` looks for.
        dispatcher::with_default(&self.dispatch, || match record.level {
            Level::Panic | Level::Fatal | Level::Error => {
                tracing::error!(severity, fields, "{}", message)
            }
            Level::Warn => tracing::warn!(severity, fields, "{}", message),
            Level::Info => tracing::info!(severity, fields, "{}", message),
            Level::Debug => tracing::debug!(severity, fields, "{}", message),
            Level::Trace => tracing::trace!(severity, fields, "{}", message),
        });

        // Reported outside the private dispatch, to whatever the process installed.
        if let Some(err) = self.write_error.lock().take() {
            tracing::warn!(error = %err, "Failed to write log record");
        }
    }

    fn set_output(&self, sink: Box<dyn Write + Send>) {
        self.sink.replace(sink);
    }

    fn flush(&self) -> io::Result<()> {
        self.sink.flush()
    }
}
