//! Host capabilities handed to plugins.
//!
//! A host supplies one [`IoSink`] and one [`OutputWriter`] per plugin
//! instance. The default implementations here route messages into `tracing`
//! and drop batches; test hosts substitute capturing ones.

use arrow_array::RecordBatch;

use crate::error::PluginError;
use crate::types::Level;

/// Receives log messages emitted by a plugin.
pub trait IoSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Receives batches a plugin writes to its output anchors.
pub trait OutputWriter: Send + Sync {
    fn write(&self, anchor: &str, batch: RecordBatch) -> Result<(), PluginError>;
}

/// Forwards plugin messages to `tracing`, tagged with the plugin name.
#[derive(Debug, Clone)]
pub struct TracingIo {
    plugin_name: String,
}

impl TracingIo {
    pub fn new(plugin_name: impl Into<String>) -> Self {
        Self {
            plugin_name: plugin_name.into(),
        }
    }
}

impl IoSink for TracingIo {
    fn log(&self, level: Level, message: &str) {
        let plugin = self.plugin_name.as_str();
        match level {
            Level::Error => tracing::error!(plugin = %plugin, "{}", message),
            Level::Warn => tracing::warn!(plugin = %plugin, "{}", message),
            Level::Info => tracing::info!(plugin = %plugin, "{}", message),
        }
    }
}

/// Accepts every batch and drops it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardWriter;

impl OutputWriter for DiscardWriter {
    fn write(&self, anchor: &str, batch: RecordBatch) -> Result<(), PluginError> {
        tracing::trace!(anchor = %anchor, rows = batch.num_rows(), "discarding batch");
        Ok(())
    }
}
