//! Output destinations.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that can be swapped while loggers are using it.
///
/// The subscriber takes the lock once per record, so lines from different
/// threads never interleave.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::from_boxed(Box::new(writer))
    }

    pub fn from_boxed(writer: Box<dyn Write + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// A sink that drops everything.
    pub fn discard() -> Self {
        Self::new(io::sink())
    }

    /// Replace the destination. The old writer is flushed once swapped out.
    pub fn replace(&self, writer: Box<dyn Write + Send>) {
        let mut old = std::mem::replace(&mut *self.inner.lock(), writer);
        if let Err(err) = old.flush() {
            tracing::warn!(error = %err, "Failed to flush replaced log output");
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

impl Default for SharedSink {
    fn default() -> Self {
        Self::new(io::stdout())
    }
}

/// Lock held for the duration of one record write.
pub struct SinkGuard<'a>(MutexGuard<'a, Box<dyn Write + Send>>);

impl Write for SinkGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedSink {
    type Writer = SinkGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkGuard(self.inner.lock())
    }
}

/// In-memory buffer, mostly useful in tests.
#[derive(Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Every line that parses as JSON.
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.contents()
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    struct UnflushableWriter;

    impl Write for UnflushableWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    #[traced_test]
    fn test_replace_logs_flush_failure() {
        let sink = SharedSink::new(UnflushableWriter);
        let next = MemorySink::new();

        sink.replace(Box::new(next.clone()));
        sink.make_writer().write_all(b"after\n").unwrap();

        assert!(logs_contain("Failed to flush replaced log output"));
        assert_eq!(next.lines(), vec!["after"]);
    }

    #[test]
    fn test_replace_redirects_writes() {
        let first = MemorySink::new();
        let second = MemorySink::new();
        let sink = SharedSink::new(first.clone());

        sink.make_writer().write_all(b"one\n").unwrap();
        sink.replace(Box::new(second.clone()));
        sink.make_writer().write_all(b"two\n").unwrap();

        assert_eq!(first.lines(), vec!["one"]);
        assert_eq!(second.lines(), vec!["two"]);
    }

    #[test]
    fn test_memory_sink_records() {
        let mut sink = MemorySink::new();
        writeln!(sink, "{{\"a\":1}}").unwrap();
        writeln!(sink, "not json").unwrap();
        assert_eq!(sink.records().len(), 1);
        assert_eq!(sink.lines().len(), 2);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_discard_accepts_writes() {
        let sink = SharedSink::discard();
        sink.make_writer().write_all(b"gone").unwrap();
        assert!(sink.flush().is_ok());
    }
}
