//! Structured logging setup.

use crate::{LogFormat, TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging subsystem.
///
/// Sets up tracing-subscriber with either JSON or pretty format,
/// respecting the configured log level. `RUST_LOG` wins when set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => init_json_logging(filter),
        LogFormat::Pretty => init_pretty_logging(filter),
    }
}

/// Install a subscriber that writes through libtest's output capture.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer().with_filter(filter))
        .try_init();
}

/// Initialize JSON logging, one flattened object per event.
fn init_json_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let json_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_file(false)
        .with_line_number(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Initialize pretty logging for local runs, with file and line.
fn init_pretty_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let pretty_layer = fmt::layer()
        .pretty()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Standard log event names for the plugin lifecycle.
pub mod events {
    /// A plugin instance was constructed.
    pub const PLUGIN_CONSTRUCTED: &str = "plugin_constructed";

    /// A record batch was delivered to a plugin.
    pub const RECORD_BATCH: &str = "record_batch";

    /// An input connection finished delivering batches.
    pub const CONNECTION_COMPLETE: &str = "connection_complete";

    /// A plugin was told no more input will arrive.
    pub const PLUGIN_COMPLETE: &str = "plugin_complete";

    /// A plugin hook returned an error.
    pub const HOOK_FAILED: &str = "hook_failed";
}

/// Log a lifecycle event at debug level with the standard `event` field.
#[macro_export]
macro_rules! log_lifecycle {
    ($event:expr, $($field:tt)*) => {
        tracing::debug!(
            event = $event,
            $($field)*
        )
    };
}

/// Log a failed plugin hook at warn level.
#[macro_export]
macro_rules! log_hook_failed {
    ($($field:tt)*) => {
        tracing::warn!(
            event = $crate::logging::events::HOOK_FAILED,
            $($field)*
        )
    };
}
