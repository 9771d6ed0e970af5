//! Line-oriented output sinks for child process streams
//!
//! Child output is forwarded line by line. Every sink writes a whole line at
//! a time, so output from concurrently running components interleaves only
//! at line boundaries.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Receives complete lines, without their trailing newline
pub trait LineSink: Send + Sync {
    fn write_line(&self, line: &str);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A writer shared by many producers; each line is written under one lock.
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl LineSink for SharedWriter {
    fn write_line(&self, line: &str) {
        let mut writer = lock(&self.inner);
        if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
            tracing::warn!("failed to write output line: {}", e);
        }
    }
}

/// Tags every line as `[prefix] line` before forwarding it
pub struct PrefixedSink {
    prefix: String,
    inner: Arc<dyn LineSink>,
}

impl PrefixedSink {
    pub fn new(prefix: impl Into<String>, inner: Arc<dyn LineSink>) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }
}

impl LineSink for PrefixedSink {
    fn write_line(&self, line: &str) {
        self.inner.write_line(&format!("[{}] {}", self.prefix, line));
    }
}

/// Collects lines in memory
#[derive(Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        lock(&self.lines).iter().any(|line| line.contains(needle))
    }

    pub fn count(&self, needle: &str) -> usize {
        lock(&self.lines)
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl LineSink for CaptureSink {
    fn write_line(&self, line: &str) {
        lock(&self.lines).push(line.to_string());
    }
}

/// Where a child's stdout and stderr go.
///
/// `None` inherits the corresponding stream of this process.
#[derive(Clone, Default)]
pub struct Sinks {
    pub out: Option<Arc<dyn LineSink>>,
    pub err: Option<Arc<dyn LineSink>>,
}

impl Sinks {
    /// Inherit both streams
    pub fn inherit() -> Self {
        Self::default()
    }

    /// Send both streams to one sink
    pub fn both(sink: Arc<dyn LineSink>) -> Self {
        Self {
            out: Some(sink.clone()),
            err: Some(sink),
        }
    }
}
