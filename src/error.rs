//! Errors for the few fallible boundary operations.
//!
//! Interaction itself never fails: out-of-range values are clamped and stray
//! events are ignored. Only data crossing in from the host (config JSON, tool
//! and element names, id strings) can be rejected.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Error returned when host-supplied input cannot be accepted.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// The config JSON could not be deserialized.
    #[error("config parse failed: {0}")]
    ConfigParse(#[source] serde_json::Error),

    /// The state snapshot could not be encoded as JSON.
    #[error("state encode failed: {0}")]
    StateEncode(#[from] serde_json::Error),

    /// A config value is outside its valid range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The string does not name an element kind.
    #[error("unknown element kind: {0}")]
    UnknownElementKind(String),

    /// The string does not name a tool.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The string is not a valid element id.
    #[error("invalid element id: {0}")]
    InvalidElementId(#[from] uuid::Error),

    /// A global logger was already installed.
    #[error("logger install failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}
