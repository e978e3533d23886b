//! Plain-text rendering for line mode and single-command mode

use kite_chat::{Message, ResultView, markup};
use kite_tui::widgets::{markup::plain_lines, message_list::NO_CONTENT, result_card::card_text};

/// Body of an agent reply as printable text
pub fn reply_text(message: &Message) -> String {
    if message.is_error {
        return format!("Error: {}", message.content);
    }

    let lines = if let Some(result) = &message.agent_result {
        let view = ResultView::new(result, message.metadata.as_ref());
        if view.is_empty() {
            vec![NO_CONTENT.to_string()]
        } else {
            card_text(&view)
        }
    } else if !message.content.is_empty() {
        plain_lines(&markup::render(&message.content))
    } else {
        vec![NO_CONTENT.to_string()]
    };

    lines.join("\n")
}

/// Whole conversation with speaker prefixes
pub fn transcript_text(messages: &[Message], agent_name: &str) -> String {
    messages
        .iter()
        .map(|msg| {
            if msg.is_user() {
                format!("you> {}", msg.content)
            } else {
                let name = msg
                    .metadata
                    .as_ref()
                    .and_then(|m| m.agent_name.as_deref())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(agent_name);
                format!("{}>\n{}", name, reply_text(msg))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kite_agent::AgentResult;
    use kite_chat::demo::sample_messages;
    use serde_json::json;

    #[test]
    fn test_error_reply() {
        let msg = Message::error("agent-1", "Network error", "2025-01-01T00:00:00Z");
        assert_eq!(reply_text(&msg), "Error: Network error");
    }

    #[test]
    fn test_text_reply_flattens_markup() {
        let msg = Message::agent(
            "agent-1",
            "# Title\n- **one**\n- two",
            None,
            None,
            "2025-01-01T00:00:00Z",
        );
        let text = reply_text(&msg);
        assert!(text.contains("Title"));
        assert!(text.contains("one"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_empty_replies() {
        let msg = Message::agent("agent-1", "", None, None, "2025-01-01T00:00:00Z");
        assert_eq!(reply_text(&msg), NO_CONTENT);

        let empty = AgentResult::from_value(json!({}));
        let msg = Message::agent("agent-2", "", Some(empty), None, "2025-01-01T00:00:00Z");
        assert_eq!(reply_text(&msg), NO_CONTENT);
    }

    #[test]
    fn test_structured_reply_lists_items() {
        let result = AgentResult::from_value(json!({
            "summary": "Found 2 pages",
            "items": [
                {"title": "Roadmap", "url": "https://notion.so/roadmap"},
                {"title": "Notes"}
            ]
        }));
        let msg = Message::agent("agent-1", "", Some(result), None, "2025-01-01T00:00:00Z");
        let text = reply_text(&msg);
        assert!(text.starts_with("Found 2 pages"));
        assert!(text.contains("Results (2)"));
        assert!(text.contains("Roadmap"));
        assert!(text.contains("Notes"));
    }

    #[test]
    fn test_sample_transcript() {
        let text = transcript_text(sample_messages(), "Agent");
        assert!(text.starts_with("you> "));
        assert_eq!(text.matches("you> ").count(), 2);
    }
}
