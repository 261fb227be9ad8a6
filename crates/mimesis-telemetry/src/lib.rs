//! Logging infrastructure for Mimesis plugins and their test harness.
//!
//! # Usage
//!
//! ```ignore
//! use mimesis_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env().with_log_level("mimesis=debug");
//! init_logging(&config)?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::{events, init_logging, init_test_logging};

use thiserror::Error;

/// Telemetry errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}
