//! Conversation messages

use chrono::{SecondsFormat, Utc};
use kite_agent::{AgentResult, ResponseMetadata};
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
        }
    }
}

/// One turn in the conversation. Never mutated once appended to a log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    /// Plain text body, empty when `agent_result` carries the reply
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_result: Option<AgentResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
    #[serde(default)]
    pub is_error: bool,
    /// RFC 3339 creation time
    pub timestamp: String,
}

impl Message {
    /// Create a user message
    pub fn user(
        id: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            agent_result: None,
            metadata: None,
            is_error: false,
            timestamp: timestamp.into(),
        }
    }

    /// Create an agent reply
    pub fn agent(
        id: impl Into<String>,
        content: impl Into<String>,
        agent_result: Option<AgentResult>,
        metadata: Option<ResponseMetadata>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::Agent,
            content: content.into(),
            agent_result,
            metadata,
            is_error: false,
            timestamp: timestamp.into(),
        }
    }

    /// Create a failure notice
    pub fn error(
        id: impl Into<String>,
        reason: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::Agent,
            content: reason.into(),
            agent_result: None,
            metadata: None,
            is_error: true,
            timestamp: timestamp.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Current time as an RFC 3339 string with millisecond precision
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Hands out `<prefix>-<millis>` ids that never repeat within one log,
/// even when several are requested in the same millisecond.
#[derive(Debug, Default)]
pub struct MessageIds {
    last_millis: i64,
}

impl MessageIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for `prefix`, using the current clock
    pub fn next(&mut self, prefix: &str) -> String {
        self.next_at(prefix, Utc::now().timestamp_millis())
    }

    /// Next id for `prefix` at an explicit clock reading
    pub fn next_at(&mut self, prefix: &str, now_millis: i64) -> String {
        let millis = now_millis.max(self.last_millis + 1);
        self.last_millis = millis;
        format!("{}-{}", prefix, millis)
    }
}
