//! Contextual logger façade.
//!
//! # Data Flow
//! ```text
//! root = new_logger(Level::Info)                  (once, at startup)
//!     → root.with_context(&ctx)                    (per request)
//!           .set_area("billing")
//!           .set_operation("charge")
//!     → derived.info("charged") / derived.error("declined")
//!     → Backend::emit
//! ```
//!
//! # Design Decisions
//! - Every `with_*`/`set_*` returns a new value; the receiver never changes
//! - Only the threshold and the output live on the shared root
//! - Error, fatal and panic carry `File`, `Line` and `Func` of the caller
//! - Nothing here fails except `set_level`; bad input falls back to defaults

pub mod contextual;
pub mod timing;

use std::fmt;
use std::time::Instant;

use crate::backend::TracingBackend;
use crate::caller::CallerInfo;
use crate::context::RequestContext;
use crate::error::LoggerResult;
use crate::fields::Value;
use crate::level::Level;

pub use contextual::ContextLogger;
pub use timing::FuncTimer;

/// Logger interface implemented over a concrete backend.
pub trait Logger: Clone + Send + Sync {
    /// Set the severity threshold on the shared root.
    fn set_level(&self, level: Level) -> LoggerResult<()>;

    /// Current severity threshold.
    fn level(&self) -> Level;

    /// Attach the `Area` field.
    fn set_area(&self, area: &str) -> Self;

    /// Attach the `Operation` field.
    fn set_operation(&self, operation: &str) -> Self;

    /// Set the correlation ID. An empty ID leaves the logger as it is.
    fn set_correlation_id(&self, correlation_id: &str) -> Self;

    fn correlation_id(&self) -> &str;

    /// Set the tenant ID. An empty ID leaves the logger as it is.
    fn set_tenant_id(&self, tenant_id: &str) -> Self;

    fn tenant_id(&self) -> &str;

    fn with_field(&self, key: &str, value: impl Into<Value>) -> Self;

    /// Attach several fields. Later entries win over earlier ones.
    fn with_fields<I, K, V>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>;

    /// Attach an error under the `error` key.
    fn with_error<E>(&self, err: &E) -> Self
    where
        E: std::error::Error + ?Sized;

    /// Take correlation and tenant IDs from `ctx` and bind it to the entry.
    fn with_context(&self, ctx: &RequestContext) -> Self;

    /// Use `caller` instead of the call site for error-level records.
    ///
    /// Only the returned value carries it: loggers derived from it with
    /// `with_field`, `set_area` and friends report their own call site again.
    fn with_caller(&self, caller: CallerInfo) -> Self;

    fn trace(&self, message: impl fmt::Display);
    fn debug(&self, message: impl fmt::Display);
    fn info(&self, message: impl fmt::Display);
    fn warn(&self, message: impl fmt::Display);

    #[track_caller]
    fn error(&self, message: impl fmt::Display);

    /// Log, then exit the process with status 1.
    #[track_caller]
    fn fatal(&self, message: impl fmt::Display) -> !;

    /// Log, then panic with the message.
    #[track_caller]
    fn panic(&self, message: impl fmt::Display) -> !;

    /// Log the time since `start` at debug level, if debug is enabled.
    #[track_caller]
    fn track_func_time(&self, start: Instant);

    /// Start a timer that calls `track_func_time` when dropped.
    #[track_caller]
    fn time_func(&self) -> FuncTimer<Self> {
        FuncTimer::start(self.clone())
    }
}

/// Root logger writing JSON lines to stdout at `level`.
pub fn new_logger(level: Level) -> ContextLogger<TracingBackend> {
    ContextLogger::new(TracingBackend::new(level))
}

/// Root logger that discards everything.
pub fn new_nop_logger() -> ContextLogger<TracingBackend> {
    ContextLogger::new(TracingBackend::nop())
}
