//! Error types for kite-agent

use thiserror::Error;

/// Result type alias using kite-agent Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while calling the remote agent.
///
/// These are transport-level failures. An agent that answers with
/// `success: false` is not an error at this layer; it is a well-formed
/// [`AgentEnvelope`](crate::AgentEnvelope).
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status with a body that is not an agent envelope
    #[error("Agent endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Endpoint unreachable or too slow to answer
    #[error("Network error")]
    Network,
}

impl Error {
    /// Create a status error, trimming the body to something displayable
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body: String = body.into();
        let body = body.trim();
        let body = if body.chars().count() > 200 {
            let truncated: String = body.chars().take(200).collect();
            format!("{}...", truncated)
        } else {
            body.to_string()
        };
        Self::Status { status, body }
    }

    /// The reason attached to this failure, if there is one.
    ///
    /// `None` means the failure carries no message and callers should fall
    /// back to a generic reason.
    pub fn message(&self) -> Option<String> {
        match self {
            Error::Network => None,
            other => Some(other.to_string()),
        }
    }
}
