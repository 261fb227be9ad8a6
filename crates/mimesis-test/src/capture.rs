//! Capturing host capabilities.
//!
//! The harness hands a [`CapturingIo`] and a [`CapturingWriter`] to the
//! plugin under test. Both append into one shared [`Capture`], which the
//! harness reads back for assertions.
//!
//! A capture only records while armed. The harness keeps it disarmed until
//! the plugin's constructor has returned, so the streams start out empty.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mimesis_plugin_sdk::{IoSink, Level, OutputWriter, PluginError, RecordBatch};
use parking_lot::Mutex;
use serde::Serialize;

/// Everything a plugin emitted, in emission order. Append-only.
#[derive(Debug, Default)]
pub struct Capture {
    armed: AtomicBool,
    data_streams: Mutex<BTreeMap<String, Vec<RecordBatch>>>,
    io_stream: Mutex<Vec<String>>,
}

impl Capture {
    /// A capture that records immediately.
    pub fn new() -> Arc<Self> {
        let capture = Self::disarmed();
        capture.arm();
        capture
    }

    /// A capture that drops everything until [`arm`](Capture::arm) is called.
    pub fn disarmed() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    fn push_batch(&self, anchor: &str, batch: RecordBatch) {
        if !self.is_armed() {
            tracing::trace!(
                anchor = %anchor,
                rows = batch.num_rows(),
                "capture disarmed, dropping batch"
            );
            return;
        }
        self.data_streams
            .lock()
            .entry(anchor.to_string())
            .or_default()
            .push(batch);
    }

    fn push_line(&self, level: Level, message: &str) {
        if !self.is_armed() {
            tracing::trace!(%level, line = message, "capture disarmed, dropping line");
            return;
        }
        self.io_stream.lock().push(format_line(level, message));
    }

    /// Batches per output anchor. Batches share their buffers with the
    /// captured ones, so this is cheap.
    pub fn data_streams(&self) -> BTreeMap<String, Vec<RecordBatch>> {
        self.data_streams.lock().clone()
    }

    pub fn io_stream(&self) -> Vec<String> {
        self.io_stream.lock().clone()
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        let data_streams = self
            .data_streams
            .lock()
            .iter()
            .map(|(anchor, batches)| {
                let rows = batches.iter().map(RecordBatch::num_rows).collect();
                (anchor.clone(), rows)
            })
            .collect();
        CaptureSnapshot {
            data_streams,
            io_stream: self.io_stream(),
        }
    }
}

/// Render a log call the way the host displays it: `LEVEL:message`.
pub fn format_line(level: Level, message: &str) -> String {
    format!("{}:{}", level.as_str(), message)
}

/// Serializable summary of a [`Capture`], for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureSnapshot {
    /// Row count of every captured batch, per output anchor.
    pub data_streams: BTreeMap<String, Vec<usize>>,
    pub io_stream: Vec<String>,
}

/// I/O sink recording each message into a [`Capture`].
#[derive(Debug, Clone)]
pub struct CapturingIo {
    capture: Arc<Capture>,
}

impl CapturingIo {
    pub fn new(capture: Arc<Capture>) -> Self {
        Self { capture }
    }
}

impl IoSink for CapturingIo {
    fn log(&self, level: Level, message: &str) {
        self.capture.push_line(level, message);
    }
}

/// Output writer recording each batch into a [`Capture`].
#[derive(Debug, Clone)]
pub struct CapturingWriter {
    capture: Arc<Capture>,
}

impl CapturingWriter {
    pub fn new(capture: Arc<Capture>) -> Self {
        Self { capture }
    }
}

impl OutputWriter for CapturingWriter {
    fn write(&self, anchor: &str, batch: RecordBatch) -> Result<(), PluginError> {
        self.capture.push_batch(anchor, batch);
        Ok(())
    }
}
