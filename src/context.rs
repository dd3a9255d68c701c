//! Request-scoped context.
//!
//! # Responsibilities
//! - Carry request-scoped values (correlation ID, tenant ID, anything else)
//! - Extract the two well-known IDs for the logger
//!
//! # Design Decisions
//! - Passed explicitly at each call site; no thread-local or global state
//! - Immutable: `with_value` returns a new context sharing the old values
//! - Missing or wrongly typed IDs read as an empty string, never an error

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

/// Context key holding the correlation (request) ID.
pub const CONTEXT_KEY_REQUEST_ID: &str = "correlationId";
/// Context key holding the tenant ID.
pub const CONTEXT_KEY_TENANT_ID: &str = "tenantId";

type ContextValue = Arc<dyn Any + Send + Sync>;

/// A request-scoped key/value carrier.
#[derive(Clone, Default)]
pub struct RequestContext {
    values: Arc<HashMap<String, ContextValue>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new context with `key` bound to `value`.
    pub fn with_value<T>(&self, key: impl Into<String>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        let mut values = (*self.values).clone();
        values.insert(key.into(), Arc::new(value));
        Self {
            values: Arc::new(values),
        }
    }

    /// Value under `key` if present and of type `T`.
    pub fn value<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// String value under `key`, accepting `String` and `&'static str`.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.value::<String>(key)
            .map(String::as_str)
            .or_else(|| self.value::<&'static str>(key).copied())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Shorthand for binding the correlation ID.
    pub fn with_correlation_id(&self, id: impl Into<String>) -> Self {
        self.with_value(CONTEXT_KEY_REQUEST_ID, id.into())
    }

    /// Shorthand for binding the tenant ID.
    pub fn with_tenant_id(&self, id: impl Into<String>) -> Self {
        self.with_value(CONTEXT_KEY_TENANT_ID, id.into())
    }

    /// Binds a fresh UUID v4 correlation ID unless one is already present.
    pub fn with_generated_correlation_id(&self) -> Self {
        if !get_request_id(self).is_empty() {
            return self.clone();
        }
        self.with_correlation_id(Uuid::new_v4().to_string())
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("RequestContext").field("keys", &keys).finish()
    }
}

/// Correlation ID stored in `ctx`, or `""`.
pub fn get_request_id(ctx: &RequestContext) -> String {
    ctx.str_value(CONTEXT_KEY_REQUEST_ID)
        .unwrap_or_default()
        .to_string()
}

/// Tenant ID stored in `ctx`, or `""`.
pub fn get_tenant_id(ctx: &RequestContext) -> String {
    ctx.str_value(CONTEXT_KEY_TENANT_ID)
        .unwrap_or_default()
        .to_string()
}
