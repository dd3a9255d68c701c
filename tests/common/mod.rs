//! Shared utilities for logger integration tests.

use context_logger::{ContextLogger, Level, MemorySink, TracingBackend};
use serde_json::Value;

/// Root logger writing JSON lines into an in-memory buffer.
pub fn memory_logger(level: Level) -> (ContextLogger, MemorySink) {
    let out = MemorySink::new();
    let backend = TracingBackend::builder()
        .level(level)
        .writer(out.clone())
        .build();
    (ContextLogger::new(backend), out)
}

/// Records whose message equals `message`.
#[allow(dead_code)]
pub fn records_with_message(out: &MemorySink, message: &str) -> Vec<Value> {
    out.records()
        .into_iter()
        .filter(|r| r["message"] == message)
        .collect()
}
