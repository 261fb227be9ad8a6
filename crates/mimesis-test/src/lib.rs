//! Test harness for Mimesis plugins.
//!
//! Provides `ToolTestService` for driving one plugin through its lifecycle
//! hooks while capturing everything it writes and logs, plus the standard
//! record batch fixtures.

pub mod capture;
pub mod fixtures;
pub mod service;

pub use capture::{format_line, Capture, CaptureSnapshot, CapturingIo, CapturingWriter};
pub use fixtures::BatchPair;
pub use service::{ToolTestService, ToolTestServiceBuilder, DEFAULT_CONFIG};
