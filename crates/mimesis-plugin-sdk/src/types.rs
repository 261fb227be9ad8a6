use arrow_schema::SchemaRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared anchors of a plugin, keyed by anchor name.
///
/// Uses BTreeMap so anchors iterate in a stable order.
pub type AnchorSchemas = BTreeMap<String, SchemaRef>;

/// A named connection point on a plugin.
///
/// `connection` identifies the session feeding (or fed by) the anchor, so
/// one input anchor can receive several connections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub name: String,
    pub connection: String,
}

impl Anchor {
    pub fn new(name: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connection: connection.into(),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.connection)
    }
}

/// Severity of a message sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    /// The uppercase tag the host prints in front of the message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
