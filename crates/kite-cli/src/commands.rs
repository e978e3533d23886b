//! Slash commands for line mode

use kite_chat::{Chat, demo};

use crate::output::transcript_text;

/// Result of executing a slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Clear the conversation
    Clear,
    /// Show a message to the user (not sent to agent)
    Message(String),
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Parse and execute a slash command.
///
/// Returns `None` when `input` is not a command and should be sent as a
/// message instead.
pub fn execute_command(input: &str, chat: &Chat, agent_name: &str) -> Option<CommandResult> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let command = rest
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),

        "clear" | "c" => CommandResult::Clear,

        "quit" | "exit" | "q" => CommandResult::Exit,

        "history" => CommandResult::Message(history_message(chat)),

        "samples" => CommandResult::Message(transcript_text(demo::sample_messages(), agent_name)),

        "session" | "s" => CommandResult::Message(session_message(chat)),

        _ => CommandResult::Unknown(command),
    })
}

fn history_message(chat: &Chat) -> String {
    let lines: Vec<String> = demo::history(chat.store().messages())
        .enumerate()
        .map(|(i, msg)| format!("  {}. {}", i + 1, msg.content.replace('\n', " ")))
        .collect();

    if lines.is_empty() {
        crate::prompts::NO_HISTORY.to_string()
    } else {
        lines.join("\n")
    }
}

fn session_message(chat: &Chat) -> String {
    let identity = chat.identity();
    let store = chat.store();
    format!(
        "Session: {}\nUser:    {}\nAgent:   {}\nMessages: {}",
        identity.session_id(),
        identity.user_id(),
        chat.agent_id(),
        store.messages().len()
    )
}

fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?        Show this help message
  /history             List the messages you have sent
  /samples             Show the sample conversation
  /session, /s         Show session and user ids
  /clear, /c           Clear conversation history
  /quit, /exit, /q     Exit kite

Anything else is sent to the agent."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kite_agent::{AgentClient, AgentContext, AgentEnvelope, Result};
    use kite_chat::SessionIdentity;
    use std::sync::Arc;

    struct EchoClient;

    #[async_trait]
    impl AgentClient for EchoClient {
        async fn call(
            &self,
            message: &str,
            _agent_id: &str,
            _context: &AgentContext,
        ) -> Result<AgentEnvelope> {
            Ok(AgentEnvelope::ok(format!("echo: {}", message)))
        }
    }

    fn chat() -> Chat {
        Chat::with_identity(
            Arc::new(EchoClient),
            "agent-1",
            SessionIdentity::from_parts("sess-abc", "user_1_xyz"),
        )
    }

    #[test]
    fn test_not_a_command() {
        assert_eq!(execute_command("hello", &chat(), "Agent"), None);
    }

    #[test]
    fn test_basic_commands() {
        let chat = chat();
        assert_eq!(execute_command("/clear", &chat, "Agent"), Some(CommandResult::Clear));
        assert_eq!(execute_command(" /EXIT ", &chat, "Agent"), Some(CommandResult::Exit));
        assert_eq!(
            execute_command("/frobnicate now", &chat, "Agent"),
            Some(CommandResult::Unknown("frobnicate".into()))
        );
        assert!(matches!(
            execute_command("/help", &chat, "Agent"),
            Some(CommandResult::Message(m)) if m.contains("/samples")
        ));
    }

    #[test]
    fn test_session_shows_ids() {
        let Some(CommandResult::Message(text)) = execute_command("/session", &chat(), "Agent")
        else {
            panic!("expected message");
        };
        assert!(text.contains("sess-abc"));
        assert!(text.contains("user_1_xyz"));
        assert!(text.contains("agent-1"));
    }

    #[tokio::test]
    async fn test_history_lists_user_messages() {
        let mut chat = chat();
        assert_eq!(
            execute_command("/history", &chat, "Agent"),
            Some(CommandResult::Message(crate::prompts::NO_HISTORY.into()))
        );

        chat.send("first").await;
        chat.send("second").await;
        let Some(CommandResult::Message(text)) = execute_command("/history", &chat, "Agent")
        else {
            panic!("expected message");
        };
        assert_eq!(text, "  1. first\n  2. second");
    }

    #[test]
    fn test_samples_prints_transcript() {
        let Some(CommandResult::Message(text)) = execute_command("/samples", &chat(), "Agent")
        else {
            panic!("expected message");
        };
        assert!(text.contains("Search for pages about marketing"));
        assert!(text.contains("Q3 Marketing Strategy"));
    }
}
