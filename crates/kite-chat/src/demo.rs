//! Sample conversation shown in place of an empty log

use std::sync::LazyLock;

use kite_agent::{AgentResult, ResponseMetadata};
use serde_json::json;

use crate::message::Message;

const SAMPLE_AGENT: &str = "Notion Power Agent";

static SAMPLES: LazyLock<Vec<Message>> = LazyLock::new(build_samples);

/// The fixed sample conversation: two user/agent pairs
pub fn sample_messages() -> &'static [Message] {
    &SAMPLES
}

/// Display-only toggle between the real log and the sample conversation.
///
/// Never touches the real log. As soon as the real log has a message it wins,
/// whatever the toggle says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoOverlay {
    enabled: bool,
}

impl DemoOverlay {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Whether the samples replace `real` right now
    pub fn is_showing_samples(&self, real: &[Message]) -> bool {
        self.enabled && real.is_empty()
    }

    /// The log to render
    pub fn displayed<'a>(&self, real: &'a [Message]) -> &'a [Message] {
        if self.is_showing_samples(real) {
            sample_messages()
        } else {
            real
        }
    }

    /// Text of the `index`-th user message, for re-populating the input.
    ///
    /// Only real messages can be picked; returns `None` while samples show.
    pub fn pick_history<'a>(&self, real: &'a [Message], index: usize) -> Option<&'a str> {
        if self.is_showing_samples(real) {
            return None;
        }
        history(real).nth(index).map(|m| m.content.as_str())
    }
}

/// User messages in conversation order
pub fn history(messages: &[Message]) -> impl Iterator<Item = &Message> {
    messages.iter().filter(|m| m.is_user())
}

fn build_samples() -> Vec<Message> {
    let overview = AgentResult::from_value(json!({
        "summary": "Sample overview of assistant capabilities and example JSON response provided.",
        "data": {
            "action_type": "general",
            "page_title": "",
            "page_url": "",
            "details": "I can assist you with creating new pages or databases, searching for existing pages, updating content or properties, organizing your workspace, managing database entries, and more within your Notion workspace. My responses provide clear summaries, action details, and structured lists of affected pages or results."
        },
        "items": [
            {
                "title": "Sample: Create a Project Database",
                "url": "https://notion.so/sample-project-database-url",
                "type": "database",
                "last_edited": "2024-06-11T10:30:00Z"
            },
            {
                "title": "Sample: Update Meeting Notes Page",
                "url": "https://notion.so/sample-meeting-notes-page-url",
                "type": "page",
                "last_edited": "2024-06-05T14:45:00Z"
            },
            {
                "title": "Sample: Search Results - Marketing",
                "url": "https://notion.so/search-marketing-results",
                "type": "search",
                "last_edited": "2024-06-07T09:15:00Z"
            }
        ]
    }));

    let search = AgentResult::from_value(json!({
        "summary": "Found 2 pages matching your search for \"marketing\".",
        "data": {
            "action_type": "search",
            "page_title": "",
            "page_url": "",
            "details": "Searched your Notion workspace for pages related to \"marketing\". Found 2 results that match your query."
        },
        "items": [
            {
                "title": "Q3 Marketing Strategy",
                "url": "https://notion.so/q3-marketing-strategy",
                "type": "page",
                "last_edited": "2024-06-10T16:20:00Z"
            },
            {
                "title": "Marketing Campaign Tracker",
                "url": "https://notion.so/marketing-campaign-tracker",
                "type": "database",
                "last_edited": "2024-06-09T11:30:00Z"
            }
        ]
    }));

    vec![
        Message::user(
            "sample-1",
            "What can you help me with in my Notion workspace? Show me a sample of how you handle requests.",
            "2024-06-11T11:59:00Z",
        ),
        Message::agent(
            "sample-2",
            "",
            Some(overview),
            Some(metadata("2024-06-11T12:00:00Z")),
            "2024-06-11T12:00:00Z",
        ),
        Message::user(
            "sample-3",
            "Search for pages about marketing",
            "2024-06-11T12:01:00Z",
        ),
        Message::agent(
            "sample-4",
            "",
            Some(search),
            Some(metadata("2024-06-11T12:01:30Z")),
            "2024-06-11T12:01:30Z",
        ),
    ]
}

fn metadata(timestamp: &str) -> ResponseMetadata {
    ResponseMetadata {
        agent_name: Some(SAMPLE_AGENT.to_string()),
        timestamp: Some(timestamp.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::store::ConversationStore;
    use kite_agent::AgentEnvelope;

    #[test]
    fn test_samples_shape() {
        let samples = sample_messages();
        assert_eq!(samples.len(), 4);
        let roles: Vec<Role> = samples.iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::User, Role::Agent, Role::User, Role::Agent]);
        assert!(samples.iter().all(|m| !m.is_error));
        assert_eq!(samples[1].agent_result.as_ref().unwrap().items.len(), 3);
        assert_eq!(samples[3].agent_result.as_ref().unwrap().items.len(), 2);
        assert!(samples[1].content.is_empty());
    }

    #[test]
    fn test_overlay_shows_samples_only_when_log_empty() {
        let overlay = DemoOverlay::new(true);
        let mut store = ConversationStore::new();
        assert_eq!(overlay.displayed(store.messages()), sample_messages());

        store.submit("hello", "agent-1").unwrap();
        assert_eq!(overlay.displayed(store.messages()), store.messages());

        store.complete(Ok(AgentEnvelope::ok("hi")));
        assert_eq!(overlay.displayed(store.messages()).len(), 2);
        assert!(!overlay.is_showing_samples(store.messages()));
    }

    #[test]
    fn test_overlay_off_shows_real_log() {
        let overlay = DemoOverlay::default();
        assert!(overlay.displayed(&[]).is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut overlay = DemoOverlay::default();
        overlay.toggle();
        assert!(overlay.is_enabled());
        overlay.set_enabled(false);
        assert!(!overlay.is_enabled());
    }

    #[test]
    fn test_pick_history() {
        let real = vec![
            Message::user("user-1", "first", "2024-06-11T12:00:00Z"),
            Message::agent("agent-2", "reply", None, None, "2024-06-11T12:00:01Z"),
            Message::user("user-3", "second", "2024-06-11T12:00:02Z"),
        ];
        let overlay = DemoOverlay::new(true);
        assert_eq!(overlay.pick_history(&real, 0), Some("first"));
        assert_eq!(overlay.pick_history(&real, 1), Some("second"));
        assert_eq!(overlay.pick_history(&real, 2), None);
    }

    #[test]
    fn test_pick_history_ignored_while_samples_show() {
        let overlay = DemoOverlay::new(true);
        assert_eq!(overlay.pick_history(&[], 0), None);
    }
}
