//! Error type shared by plugins and hosts.

use arrow_schema::ArrowError;
use thiserror::Error;

/// Errors a plugin (or the provider acting on its behalf) can raise.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The configuration handed to the plugin was rejected.
    #[error("invalid plugin configuration: {0}")]
    Config(String),

    /// The plugin was addressed through an input anchor it never declared.
    #[error("unknown input anchor: {0}")]
    UnknownInputAnchor(String),

    /// The plugin tried to write to an output anchor it never declared.
    #[error("unknown output anchor: {0}")]
    UnknownOutputAnchor(String),

    /// Building or slicing a record batch failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Any other plugin-defined failure.
    #[error("plugin failed: {0}")]
    Failed(String),
}
