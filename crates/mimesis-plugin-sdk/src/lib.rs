//! SDK for building Mimesis data-pipeline plugins.
//!
//! Provides the [`Plugin`] lifecycle contract, [`Anchor`] references, and the
//! [`Provider`] a plugin receives at construction. The provider carries the
//! plugin's configuration, its declared anchors, and the two host
//! capabilities a plugin can use: an [`IoSink`] for log messages and an
//! [`OutputWriter`] for batches.
//!
//! # Example
//!
//! ```ignore
//! use mimesis_plugin_sdk::prelude::*;
//!
//! struct Passthrough {
//!     provider: Provider,
//! }
//!
//! impl Plugin for Passthrough {
//!     const NAME: &'static str = "Passthrough";
//!
//!     fn new(provider: Provider) -> Result<Self, PluginError> {
//!         Ok(Self { provider })
//!     }
//!
//!     fn on_record_batch(&mut self, batch: &RecordBatch, _anchor: &Anchor) -> Result<(), PluginError> {
//!         self.provider.write_to_anchor("Output", batch.clone())
//!     }
//!
//!     fn on_incoming_connection_complete(&mut self, _anchor: &Anchor) -> Result<(), PluginError> {
//!         Ok(())
//!     }
//!
//!     fn on_complete(&mut self) -> Result<(), PluginError> {
//!         self.provider.info("done.");
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod io;
pub mod plugin;
pub mod provider;
pub mod types;

pub use error::PluginError;
pub use io::{DiscardWriter, IoSink, OutputWriter, TracingIo};
pub use plugin::Plugin;
pub use provider::Provider;
pub use types::{Anchor, AnchorSchemas, Level};

/// Re-export of the Arrow types that cross the plugin boundary.
pub use arrow_array::RecordBatch;
pub use arrow_schema::{Schema, SchemaRef};

pub mod prelude {
    pub use crate::error::PluginError;
    pub use crate::io::{IoSink, OutputWriter};
    pub use crate::plugin::Plugin;
    pub use crate::provider::Provider;
    pub use crate::types::*;
    pub use crate::{RecordBatch, Schema, SchemaRef};
}
