//! Request and response types for the agent call

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Per-request context identifying the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentContext {
    pub user_id: String,
    pub session_id: String,
}

/// Body posted to the agent endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    pub message: String,
    pub agent_id: String,
    pub user_id: String,
    pub session_id: String,
}

impl AgentRequest {
    pub fn new(
        message: impl Into<String>,
        agent_id: impl Into<String>,
        context: &AgentContext,
    ) -> Self {
        Self {
            message: message.into(),
            agent_id: agent_id.into(),
            user_id: context.user_id.clone(),
            session_id: context.session_id.clone(),
        }
    }
}

/// Envelope returned by every agent call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentEnvelope {
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub success: bool,
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub response: Option<AgentResponse>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl AgentEnvelope {
    /// A successful envelope carrying `result`
    pub fn ok(result: impl Into<Value>) -> Self {
        Self {
            success: true,
            response: Some(AgentResponse {
                result: Some(result.into()),
                ..Default::default()
            }),
            error: None,
        }
    }

    /// An unsuccessful envelope with an explicit error string
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }

    /// Attach response metadata (only meaningful when a response exists)
    pub fn with_metadata(mut self, metadata: ResponseMetadata) -> Self {
        if let Some(response) = self.response.as_mut() {
            response.metadata = Some(metadata);
        }
        self
    }

    /// The response payload when the call succeeded
    pub fn success_response(&self) -> Option<&AgentResponse> {
        if self.success {
            self.response.as_ref()
        } else {
            None
        }
    }

    /// Reason for an unsuccessful envelope: explicit error, then the
    /// response message, then `fallback`.
    pub fn failure_reason(&self, fallback: &str) -> String {
        self.error
            .clone()
            .or_else(|| self.response.as_ref().and_then(|r| r.message.clone()))
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Response body inside an envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<ResponseMetadata>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

impl AgentResponse {
    /// Interpret the raw result value
    pub fn output(&self) -> AgentOutput {
        match &self.result {
            None | Some(Value::Null) => AgentOutput::Empty,
            Some(Value::String(text)) => AgentOutput::Text(text.clone()),
            Some(value @ Value::Object(_)) => {
                AgentOutput::Structured(AgentResult::from_value(value.clone()))
            }
            Some(other) => AgentOutput::Text(other.to_string()),
        }
    }
}

/// Interpreted agent result
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    /// Free-form text
    Text(String),
    /// Structured workspace result
    Structured(AgentResult),
    /// Nothing usable was returned
    Empty,
}

/// Provenance of an agent reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
}

/// Structured payload returned by the agent. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::object",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<ResultData>,
    #[serde(
        default,
        deserialize_with = "lenient::items",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<ResultItem>,
}

impl AgentResult {
    /// Build from an arbitrary JSON value, degrading to an empty result
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Action metadata of a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultData {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub action_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub details: Option<String>,
}

/// One workspace entry listed in a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_edited: Option<String>,
}

/// Deserializers that treat a wrongly-typed field as absent
mod lenient {
    use super::*;
    use serde::de::DeserializeOwned;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
    }

    pub fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            v @ Value::Object(_) => serde_json::from_value(v).ok(),
            _ => None,
        })
    }

    pub fn items<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ResultItem>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(entries) => entries
                .into_iter()
                .map(|entry| match entry {
                    v @ Value::Object(_) => serde_json::from_value(v).unwrap_or_default(),
                    _ => ResultItem::default(),
                })
                .collect(),
            _ => Vec::new(),
        })
    }
}
