//! Agent call seam and its HTTP implementation

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{AgentContext, AgentEnvelope, AgentRequest};

/// Header carrying the API key, when one is configured
pub const API_KEY_HEADER: &str = "x-api-key";

/// Something that can deliver a message to the remote agent.
///
/// Implementations return `Ok` for every well-formed envelope, including
/// unsuccessful ones, and `Err` only for transport failures.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn call(
        &self,
        message: &str,
        agent_id: &str,
        context: &AgentContext,
    ) -> Result<AgentEnvelope>;
}

/// Calls the agent endpoint over HTTP with a JSON body
pub struct HttpAgentClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAgentClient {
    /// Create a client for `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    /// Create a client with an optional request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            api_key: None,
        })
    }

    /// Set the API key sent with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn call(
        &self,
        message: &str,
        agent_id: &str,
        context: &AgentContext,
    ) -> Result<AgentEnvelope> {
        let request = AgentRequest::new(message, agent_id, context);

        tracing::debug!(
            endpoint = %self.endpoint,
            agent_id,
            session_id = %context.session_id,
            "Calling agent"
        );

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        // Error statuses usually still carry an envelope explaining the failure
        match serde_json::from_str::<AgentEnvelope>(&body) {
            Ok(envelope) => {
                tracing::debug!(
                    status = status.as_u16(),
                    success = envelope.success,
                    "Agent replied"
                );
                Ok(envelope)
            }
            Err(e) if status.is_success() => {
                tracing::warn!("Agent returned an unreadable body: {}", e);
                Err(Error::Json(e))
            }
            Err(_) => {
                tracing::warn!(status = status.as_u16(), "Agent endpoint failed");
                Err(Error::status(status.as_u16(), body))
            }
        }
    }
}

/// Unreachable endpoints and timeouts have no detail worth showing
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_connect() || e.is_timeout() {
        tracing::warn!("Agent endpoint unreachable: {}", e);
        Error::Network
    } else {
        Error::Http(e)
    }
}
