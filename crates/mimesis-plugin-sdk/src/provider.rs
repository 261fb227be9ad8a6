//! The host handle a plugin receives at construction.

use std::fmt;
use std::sync::Arc;

use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;

use crate::error::PluginError;
use crate::io::{DiscardWriter, IoSink, OutputWriter, TracingIo};
use crate::types::{AnchorSchemas, Level};

/// Configuration, declared anchors and host capabilities for one plugin.
///
/// The configuration string is opaque to the host and handed over verbatim.
/// Schemas are declarations only: batches are not checked against them.
#[derive(Clone)]
pub struct Provider {
    plugin_name: String,
    config: String,
    input_anchors: AnchorSchemas,
    output_anchors: AnchorSchemas,
    io: Arc<dyn IoSink>,
    writer: Arc<dyn OutputWriter>,
}

impl Provider {
    /// Create a provider that logs through `tracing` and discards output.
    pub fn new(
        plugin_name: impl Into<String>,
        config: impl Into<String>,
        input_anchors: AnchorSchemas,
        output_anchors: AnchorSchemas,
    ) -> Self {
        let plugin_name = plugin_name.into();
        Self {
            io: Arc::new(TracingIo::new(plugin_name.clone())),
            writer: Arc::new(DiscardWriter),
            plugin_name,
            config: config.into(),
            input_anchors,
            output_anchors,
        }
    }

    /// Replace the I/O sink.
    pub fn with_io(mut self, io: Arc<dyn IoSink>) -> Self {
        self.io = io;
        self
    }

    /// Replace the output writer.
    pub fn with_writer(mut self, writer: Arc<dyn OutputWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    /// The raw configuration, exactly as the host supplied it.
    pub fn config(&self) -> &str {
        &self.config
    }

    pub fn input_anchors(&self) -> &AnchorSchemas {
        &self.input_anchors
    }

    pub fn output_anchors(&self) -> &AnchorSchemas {
        &self.output_anchors
    }

    pub fn input_schema(&self, name: &str) -> Option<&SchemaRef> {
        self.input_anchors.get(name)
    }

    pub fn output_schema(&self, name: &str) -> Option<&SchemaRef> {
        self.output_anchors.get(name)
    }

    pub fn log(&self, level: Level, message: &str) {
        self.io.log(level, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Write a batch to a declared output anchor.
    ///
    /// Fails with [`PluginError::UnknownOutputAnchor`] if `anchor` was not
    /// declared; otherwise the writer receives the batch unchanged.
    pub fn write_to_anchor(&self, anchor: &str, batch: RecordBatch) -> Result<(), PluginError> {
        if !self.output_anchors.contains_key(anchor) {
            return Err(PluginError::UnknownOutputAnchor(anchor.to_string()));
        }
        self.writer.write(anchor, batch)
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("plugin_name", &self.plugin_name)
            .field("config", &self.config)
            .field("input_anchors", &self.input_anchors.keys().collect::<Vec<_>>())
            .field("output_anchors", &self.output_anchors.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
