//! Error types for kite-chat

use thiserror::Error;

/// Result type alias using kite-chat Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from local side effects of the conversation view
#[derive(Error, Debug)]
pub enum Error {
    /// The system clipboard could not be opened or written
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// A blocking helper task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),
}
