//! Conversation store: the message log and the request lifecycle.
//!
//! The store is a small state machine. `Idle` accepts a submission and moves
//! to `Sending`; the outcome of that single request moves it back to `Idle`.
//! The log is orthogonal to the phase and only ever grows, except for an
//! explicit [`ConversationStore::clear`].

use kite_agent::{AgentEnvelope, AgentOutput};

use crate::message::{Message, MessageIds, now_timestamp};

/// Reason used when the agent reports failure without saying why
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Reason used when the transport fails without a message
pub const NETWORK_ERROR: &str = "Network error";

/// Request lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Sending,
}

/// A submission accepted by the store, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Trimmed message text
    pub message: String,
    pub agent_id: String,
}

/// Ordered message log plus loading, liveness and error flags
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    phase: Phase,
    active_agent_id: Option<String>,
    last_error: Option<String>,
    ids: MessageIds,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in conversation order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True exactly while one request is outstanding
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Sending
    }

    /// Agent currently working on a request, if any
    pub fn active_agent_id(&self) -> Option<&str> {
        self.active_agent_id.as_deref()
    }

    /// Last surfaced error, until dismissed or a new send begins
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Accept a user submission.
    ///
    /// Returns `None` without touching any state when the trimmed text is
    /// empty or a request is already in flight.
    pub fn submit(&mut self, text: &str, agent_id: &str) -> Option<PendingRequest> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }
        if self.is_loading() {
            tracing::debug!("Ignoring submit while a request is in flight");
            return None;
        }

        let id = self.ids.next("user");
        self.messages.push(Message::user(id, message, now_timestamp()));
        self.last_error = None;
        self.phase = Phase::Sending;
        self.active_agent_id = Some(agent_id.to_string());

        Some(PendingRequest {
            message: message.to_string(),
            agent_id: agent_id.to_string(),
        })
    }

    /// Record the outcome of the outstanding request.
    ///
    /// Appends exactly one agent message and returns to `Idle`. Ignored when
    /// no request is outstanding.
    pub fn complete(&mut self, outcome: kite_agent::Result<AgentEnvelope>) -> Option<&Message> {
        if !self.is_loading() {
            tracing::warn!("Dropping agent outcome: no request in flight");
            return None;
        }

        self.phase = Phase::Idle;
        self.active_agent_id = None;

        match outcome {
            Ok(envelope) => match envelope.success_response() {
                Some(response) => {
                    let (content, agent_result) = match response.output() {
                        AgentOutput::Text(text) => (text, None),
                        AgentOutput::Structured(result) => (String::new(), Some(result)),
                        AgentOutput::Empty => (String::new(), None),
                    };
                    let id = self.ids.next("agent");
                    self.messages.push(Message::agent(
                        id,
                        content,
                        agent_result,
                        response.metadata.clone(),
                        now_timestamp(),
                    ));
                }
                None => {
                    let reason = envelope.failure_reason(UNEXPECTED_ERROR);
                    tracing::warn!("Agent reported failure: {}", reason);
                    self.fail(reason);
                }
            },
            Err(e) => {
                tracing::warn!("Agent call failed: {}", e);
                self.fail(e.message().unwrap_or_else(|| NETWORK_ERROR.to_string()));
            }
        }

        self.messages.last()
    }

    fn fail(&mut self, reason: String) {
        let id = self.ids.next("err");
        self.messages.push(Message::error(id, reason.clone(), now_timestamp()));
        self.last_error = Some(reason);
    }

    /// Empty the log and forget the last error
    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_error = None;
    }

    /// Hide the error banner; the error message stays in the log
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }
}
