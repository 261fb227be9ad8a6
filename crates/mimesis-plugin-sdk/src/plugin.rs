//! The plugin lifecycle contract.

use arrow_array::RecordBatch;

use crate::error::PluginError;
use crate::provider::Provider;
use crate::types::Anchor;

/// A data-pipeline plugin.
///
/// The host constructs the plugin once with [`Plugin::new`], then calls
/// the hooks synchronously:
/// - [`on_record_batch`](Plugin::on_record_batch) for every batch arriving on an input anchor
/// - [`on_incoming_connection_complete`](Plugin::on_incoming_connection_complete) when a connection has delivered all its batches
/// - [`on_complete`](Plugin::on_complete) once no more input will arrive on any anchor
///
/// Lifecycle ordering beyond "construction first" is up to the host.
pub trait Plugin: Sized {
    /// Name the plugin reports itself under.
    const NAME: &'static str;

    /// Build the plugin from its provider.
    fn new(provider: Provider) -> Result<Self, PluginError>;

    fn on_record_batch(&mut self, batch: &RecordBatch, anchor: &Anchor)
        -> Result<(), PluginError>;

    fn on_incoming_connection_complete(&mut self, anchor: &Anchor) -> Result<(), PluginError>;

    fn on_complete(&mut self) -> Result<(), PluginError>;
}
