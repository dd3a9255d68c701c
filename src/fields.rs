//! Structured fields attached to log records.
//!
//! Field key names are consumed downstream by log aggregation and are kept
//! exactly as written here.

use std::collections::BTreeMap;

pub use serde_json::Value;

/// Key/value pairs carried by a logger. Later writes of a key win.
pub type Fields = BTreeMap<String, Value>;

pub const AREA_KEY: &str = "Area";
pub const OPERATION_KEY: &str = "Operation";
pub const CORRELATION_ID_KEY: &str = "CorrelationID";
pub const TENANT_ID_KEY: &str = "TenantID";
pub const FILE_KEY: &str = "File";
pub const LINE_KEY: &str = "Line";
pub const FUNC_KEY: &str = "Func";
pub const EXECUTION_TIME_KEY: &str = "executionTime";
/// Key used by `with_error`.
pub const ERROR_KEY: &str = "error";
