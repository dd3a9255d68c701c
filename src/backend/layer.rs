//! JSON lines layer.
//!
//! Writes one object per event into the shared sink. The façade fields,
//! handed over as one serialized `fields` event value, are spread into the
//! object as top-level keys next to `timestamp`, `level`, `severity` and
//! `message`.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::backend::sink::SharedSink;

/// Event field that carries the façade fields as a JSON object.
pub(crate) const FIELDS_EVENT_KEY: &str = "fields";

/// Keys written by the layer itself. Façade fields with these names are
/// kept under `fields.<key>`.
const RESERVED_KEYS: [&str; 4] = ["timestamp", "level", "severity", "message"];

/// Last write failure, picked up by the backend once the event is done.
pub(crate) type WriteError = Arc<Mutex<Option<io::Error>>>;

pub(crate) struct JsonLineLayer {
    sink: SharedSink,
    write_error: WriteError,
}

impl JsonLineLayer {
    pub(crate) fn new(sink: SharedSink, write_error: WriteError) -> Self {
        Self { sink, write_error }
    }

    fn write_line(&self, entry: &Map<String, Value>) -> io::Result<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');
        // One write per record under the sink lock.
        self.sink.make_writer().write_all(&line)
    }
}

impl<S: Subscriber> Layer<S> for JsonLineLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut entry = Map::new();
        for (key, value) in visitor.fields {
            let key = if RESERVED_KEYS.contains(&key.as_str()) {
                format!("{FIELDS_EVENT_KEY}.{key}")
            } else {
                key
            };
            entry.insert(key, value);
        }
        entry.extend(visitor.values);
        entry.insert(
            "timestamp".to_string(),
            json!(chrono::Utc::now().to_rfc3339()),
        );
        entry.insert(
            "level".to_string(),
            json!(event.metadata().level().as_str()),
        );

        if let Err(err) = self.write_line(&entry) {
            *self.write_error.lock() = Some(err);
        }
    }
}

#[derive(Default)]
struct JsonVisitor {
    values: Map<String, Value>,
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.values.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, json!(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == FIELDS_EVENT_KEY {
            if let Ok(fields) = serde_json::from_str::<Map<String, Value>>(value) {
                self.fields = fields;
                return;
            }
        }
        self.insert(field, json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, json!(value));
    }
}
