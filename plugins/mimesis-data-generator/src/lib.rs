//! MimesisDataGenerator plugin.
//!
//! Forwards every batch it receives on a declared input anchor, unchanged,
//! to its `Output` anchor and reports connection and tool completion to the
//! host.

use mimesis_plugin_sdk::prelude::*;

/// Name of the anchor every incoming batch is forwarded to.
pub const OUTPUT_ANCHOR: &str = "Output";

pub struct MimesisDataGenerator {
    provider: Provider,
}

impl MimesisDataGenerator {
    /// The raw configuration this instance was built with.
    pub fn config(&self) -> &str {
        self.provider.config()
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }
}

impl Plugin for MimesisDataGenerator {
    const NAME: &'static str = "MimesisDataGenerator";

    fn new(provider: Provider) -> Result<Self, PluginError> {
        tracing::debug!(
            plugin = Self::NAME,
            inputs = provider.input_anchors().len(),
            outputs = provider.output_anchors().len(),
            "plugin initialized"
        );
        Ok(Self { provider })
    }

    fn on_record_batch(&mut self, batch: &RecordBatch, anchor: &Anchor) -> Result<(), PluginError> {
        if self.provider.input_schema(&anchor.name).is_none() {
            return Err(PluginError::UnknownInputAnchor(anchor.name.clone()));
        }
        self.provider.write_to_anchor(OUTPUT_ANCHOR, batch.clone())
    }

    fn on_incoming_connection_complete(&mut self, anchor: &Anchor) -> Result<(), PluginError> {
        self.provider.info(&format!(
            "Received complete update from {}:{}.",
            anchor.name, anchor.connection
        ));
        Ok(())
    }

    fn on_complete(&mut self) -> Result<(), PluginError> {
        self.provider.info(&format!("{} tool done.", Self::NAME));
        Ok(())
    }
}
