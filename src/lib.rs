//! Structured logging façade with request-scoped context.
//!
//! A root logger is created once at startup and derived per request:
//!
//! ```no_run
//! use context_logger::{new_logger, Level, Logger, RequestContext};
//!
//! let root = new_logger(Level::Info);
//! let ctx = RequestContext::new()
//!     .with_correlation_id("abc123")
//!     .with_tenant_id("acme");
//!
//! let log = root.with_context(&ctx).set_area("billing").set_operation("charge");
//! log.info("charge accepted");
//! log.with_field("amount", 1200).error("charge declined");
//! ```

pub mod backend;
pub mod caller;
pub mod config;
pub mod context;
pub mod error;
pub mod fields;
pub mod level;
pub mod logger;

pub use backend::{Backend, LogFormat, MemorySink, Record, SharedSink, TracingBackend};
pub use caller::CallerInfo;
pub use config::{load_config, LoggerConfig, OutputTarget};
pub use context::{get_request_id, get_tenant_id, RequestContext};
pub use error::{LoggerError, LoggerResult};
pub use fields::{Fields, Value};
pub use level::{parse_level, to_log_level, Level};
pub use logger::{new_logger, new_nop_logger, ContextLogger, FuncTimer, Logger};
