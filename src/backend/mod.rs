//! Logging engine behind the façade.
//!
//! # Data Flow
//! ```text
//! ContextLogger::info/error/...
//!     → threshold check (Backend::level)
//!     → Record { level, message, fields, context }
//!     → Backend::emit
//!     → subscriber.rs (private tracing dispatch)
//!     → layer.rs (JSON lines, fields as top-level keys) or fmt (text)
//!     → sink.rs (swappable writer: stdout, file, memory, discard)
//! ```
//!
//! # Design Decisions
//! - The façade only needs the capabilities in [`Backend`]; anything that can
//!   parse level names, hold a threshold and write records can sit here
//! - Threshold and output are shared by every logger derived from one root
//! - Each backend owns its own dispatcher, nothing is installed globally

mod layer;
pub mod sink;
pub mod subscriber;

use std::io::{self, Write};

use crate::context::RequestContext;
use crate::error::LoggerResult;
use crate::fields::Fields;
use crate::level::Level;

pub use sink::{MemorySink, SharedSink};
pub use subscriber::{LogFormat, TracingBackend, TracingBackendBuilder};

/// One log record on its way to the backend.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub fields: Fields,
    /// Request context bound with `with_context`, for backends that use it.
    pub context: Option<RequestContext>,
}

/// Capabilities the façade needs from a logging engine.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Parse a level name. Fails on names the engine does not know.
    fn parse_level(&self, name: &str) -> LoggerResult<Level>;

    /// Current threshold.
    fn level(&self) -> Level;

    /// Replace the threshold for every logger sharing this backend.
    fn set_level(&self, level: Level);

    /// Write a record. Records above the threshold are dropped.
    fn emit(&self, record: &Record);

    /// Redirect output.
    fn set_output(&self, sink: Box<dyn Write + Send>);

    /// Flush buffered output.
    fn flush(&self) -> io::Result<()>;
}
