//! [`Logger`] implementation over any [`Backend`].

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use crate::backend::{Backend, Record, TracingBackend};
use crate::caller::CallerInfo;
use crate::context::{get_request_id, get_tenant_id, RequestContext};
use crate::error::{LoggerError, LoggerResult};
use crate::fields::{
    Fields, Value, AREA_KEY, CORRELATION_ID_KEY, ERROR_KEY, EXECUTION_TIME_KEY, OPERATION_KEY,
    TENANT_ID_KEY,
};
use crate::level::Level;
use crate::logger::Logger;

/// A logger value: shared root backend plus the context accumulated so far.
///
/// Cloning is cheap. Deriving copies the field map into a new value, so
/// loggers can be derived from one another on any number of threads.
pub struct ContextLogger<B: Backend = TracingBackend> {
    backend: Arc<B>,
    fields: Arc<Fields>,
    context: Option<RequestContext>,
    caller: Option<CallerInfo>,
    correlation_id: String,
    tenant_id: String,
}

impl<B: Backend> Clone for ContextLogger<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            fields: Arc::clone(&self.fields),
            context: self.context.clone(),
            caller: self.caller,
            correlation_id: self.correlation_id.clone(),
            tenant_id: self.tenant_id.clone(),
        }
    }
}

impl<B: Backend> fmt::Debug for ContextLogger<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextLogger")
            .field("level", &self.backend.level())
            .field("fields", &self.fields)
            .field("correlation_id", &self.correlation_id)
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

impl<B: Backend> ContextLogger<B> {
    /// Root logger over `backend`.
    pub fn new(backend: B) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Root logger over a backend that is already shared.
    pub fn from_shared(backend: Arc<B>) -> Self {
        Self {
            backend,
            fields: Arc::new(Fields::new()),
            context: None,
            caller: None,
            correlation_id: String::new(),
            tenant_id: String::new(),
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Fields accumulated on this value.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Request context bound with `with_context`, if any.
    pub fn context(&self) -> Option<&RequestContext> {
        self.context.as_ref()
    }

    /// Redirect the root backend's output. Affects every derived logger.
    pub fn set_output<W: Write + Send + 'static>(&self, writer: W) {
        self.backend.set_output(Box::new(writer));
    }

    /// New value with edited fields. A location pinned with `with_caller`
    /// is not carried over.
    fn derive(&self, edit: impl FnOnce(&mut Fields)) -> Self {
        let mut fields = (*self.fields).clone();
        edit(&mut fields);
        Self {
            fields: Arc::new(fields),
            caller: None,
            ..self.clone()
        }
    }

    fn enabled(&self, level: Level) -> bool {
        self.backend.level().enables(level)
    }

    #[track_caller]
    fn resolve_caller(&self) -> CallerInfo {
        // Called directly: going through a closure would lose the location.
        match self.caller {
            Some(caller) => caller,
            None => CallerInfo::capture(),
        }
    }

    fn emit(&self, level: Level, fields: Fields, message: String) {
        self.backend.emit(&Record {
            level,
            message,
            fields,
            context: self.context.clone(),
        });
    }

    fn log(&self, level: Level, message: impl fmt::Display) {
        if self.enabled(level) {
            self.emit(level, (*self.fields).clone(), message.to_string());
        }
    }

    fn log_with_caller(&self, level: Level, caller: CallerInfo, message: impl fmt::Display) {
        if self.enabled(level) {
            let mut fields = (*self.fields).clone();
            caller.apply(&mut fields);
            self.emit(level, fields, message.to_string());
        }
    }

    fn flush(&self) {
        if let Err(err) = self.backend.flush() {
            tracing::warn!(error = %err, "Failed to flush log output");
        }
    }
}

impl<B: Backend> Logger for ContextLogger<B> {
    fn set_level(&self, level: Level) -> LoggerResult<()> {
        let parsed = self.backend.parse_level(level.as_str()).map_err(|err| {
            tracing::warn!(level = %level, error = %err, "Rejected log level change");
            err
        })?;
        if parsed != level {
            return Err(LoggerError::InvalidLevel {
                level: level.as_str().to_string(),
            });
        }

        self.backend.set_level(parsed);
        tracing::debug!(level = %parsed, "Log level changed");
        Ok(())
    }

    fn level(&self) -> Level {
        self.backend.level()
    }

    fn set_area(&self, area: &str) -> Self {
        self.with_field(AREA_KEY, area)
    }

    fn set_operation(&self, operation: &str) -> Self {
        self.with_field(OPERATION_KEY, operation)
    }

    fn set_correlation_id(&self, correlation_id: &str) -> Self {
        if correlation_id.is_empty() {
            return self.clone();
        }
        let mut derived = self.with_field(CORRELATION_ID_KEY, correlation_id);
        derived.correlation_id = correlation_id.to_string();
        derived
    }

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn set_tenant_id(&self, tenant_id: &str) -> Self {
        if tenant_id.is_empty() {
            return self.clone();
        }
        let mut derived = self.with_field(TENANT_ID_KEY, tenant_id);
        derived.tenant_id = tenant_id.to_string();
        derived
    }

    fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    fn with_field(&self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.derive(|fields| {
            fields.insert(key.to_string(), value);
        })
    }

    fn with_fields<I, K, V>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.derive(|existing| {
            existing.extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        })
    }

    fn with_error<E>(&self, err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.with_field(ERROR_KEY, err.to_string())
    }

    fn with_context(&self, ctx: &RequestContext) -> Self {
        let correlation_id = get_request_id(ctx);
        let tenant_id = get_tenant_id(ctx);

        let mut derived = self
            .set_correlation_id(&correlation_id)
            .set_tenant_id(&tenant_id);
        derived.context = Some(ctx.clone());
        derived
    }

    fn with_caller(&self, caller: CallerInfo) -> Self {
        Self {
            caller: Some(caller),
            ..self.clone()
        }
    }

    fn trace(&self, message: impl fmt::Display) {
        self.log(Level::Trace, message);
    }

    fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, message);
    }

    #[track_caller]
    fn error(&self, message: impl fmt::Display) {
        let caller = self.resolve_caller();
        self.log_with_caller(Level::Error, caller, message);
    }

    #[track_caller]
    fn fatal(&self, message: impl fmt::Display) -> ! {
        let caller = self.resolve_caller();
        self.log_with_caller(Level::Fatal, caller, message);
        self.flush();
        std::process::exit(1)
    }

    #[track_caller]
    fn panic(&self, message: impl fmt::Display) -> ! {
        let caller = self.resolve_caller();
        let message = message.to_string();
        self.log_with_caller(Level::Panic, caller, &message);
        self.flush();
        panic!("{message}")
    }

    #[track_caller]
    fn track_func_time(&self, start: Instant) {
        if !self.enabled(Level::Debug) {
            return;
        }
        let caller = self.resolve_caller();
        let elapsed = start.elapsed();

        self.with_field(EXECUTION_TIME_KEY, format!("{elapsed:?}"))
            .log_with_caller(Level::Debug, caller, "func execution completed");
    }
}
