//! Error types for the notation core.
//!
//! Placement and editing never fail: clicks outside a valid region are
//! reported as ignored outcomes, not errors. Errors only arise at the
//! crate's edges: resolving tool names, loading a layout config, and
//! writing exported files.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A tool name outside the closed tool vocabulary.
    ///
    /// ```
    /// # use musicmaker::Error;
    /// let err = Error::UnknownTool("kazoo".to_string());
    /// assert_eq!(err.to_string(), "Unknown tool 'kazoo'");
    /// ```
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    /// The tool was locked after its first use this session.
    #[error("Tool '{0}' is locked for the rest of the session")]
    ToolLocked(String),

    /// The layout config could not be parsed.
    #[error("Invalid layout config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
