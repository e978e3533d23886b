//! Chat driver: ties the store, the session identity and the agent client.
//!
//! Sending is split in two so a UI can keep its event loop running while the
//! call is in flight: [`Chat::begin`] applies the submission and returns an
//! owned future, and [`Chat::finish`] applies whatever that future produced.
//! [`Chat::send`] does both for callers that can simply wait.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use kite_agent::{AgentClient, AgentEnvelope};

use crate::identity::SessionIdentity;
use crate::message::Message;
use crate::store::ConversationStore;

/// An agent call detached from the chat that started it
pub type AgentCall = Pin<Box<dyn Future<Output = kite_agent::Result<AgentEnvelope>> + Send>>;

pub struct Chat {
    store: ConversationStore,
    identity: SessionIdentity,
    client: Arc<dyn AgentClient>,
    agent_id: String,
}

impl Chat {
    /// Start a chat with a freshly generated identity
    pub fn new(client: Arc<dyn AgentClient>, agent_id: impl Into<String>) -> Self {
        Self::with_identity(client, agent_id, SessionIdentity::generate())
    }

    pub fn with_identity(
        client: Arc<dyn AgentClient>,
        agent_id: impl Into<String>,
        identity: SessionIdentity,
    ) -> Self {
        let agent_id = agent_id.into();
        tracing::debug!(
            "Chat session {} (user {}) for agent {}",
            identity.session_id(),
            identity.user_id(),
            agent_id
        );
        Self {
            store: ConversationStore::new(),
            identity,
            client,
            agent_id,
        }
    }

    /// Submit `text`. Returns the call to run, or `None` if the submission
    /// was ignored (blank text or a request already in flight).
    pub fn begin(&mut self, text: &str) -> Option<AgentCall> {
        let pending = self.store.submit(text, &self.agent_id)?;
        let client = Arc::clone(&self.client);
        let context = self.identity.context();
        tracing::debug!("Sending {} chars to agent {}", pending.message.len(), pending.agent_id);

        Some(Box::pin(async move {
            client
                .call(&pending.message, &pending.agent_id, &context)
                .await
        }))
    }

    /// Apply the outcome of the call returned by [`Chat::begin`]
    pub fn finish(&mut self, outcome: kite_agent::Result<AgentEnvelope>) -> Option<&Message> {
        self.store.complete(outcome)
    }

    /// Submit `text` and wait for the reply
    pub async fn send(&mut self, text: &str) -> Option<&Message> {
        let call = self.begin(text)?;
        let outcome = call.await;
        self.finish(outcome)
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }
}
