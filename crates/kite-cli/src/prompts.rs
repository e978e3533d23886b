//! Canned prompts and screen copy

/// Sidebar shortcut that pre-fills the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    /// Inserted into the input as-is; may be an unfinished sentence
    pub prompt: &'static str,
    pub description: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Create Page",
        prompt: "Create a new page titled \"",
        description: "Create a new Notion page",
    },
    QuickAction {
        label: "Search Pages",
        prompt: "Search for pages about ",
        description: "Search your workspace",
    },
    QuickAction {
        label: "List Databases",
        prompt: "List all my databases in Notion",
        description: "View all databases",
    },
    QuickAction {
        label: "Get Page",
        prompt: "Get the content of the page titled \"",
        description: "Retrieve page details",
    },
    QuickAction {
        label: "Create Database",
        prompt: "Create a new database called \"",
        description: "Create a new database",
    },
    QuickAction {
        label: "Update Page",
        prompt: "Update the page titled \"",
        description: "Modify existing page",
    },
];

/// Submitted directly when picked
pub const SUGGESTIONS: &[&str] = &[
    "What can you help me with?",
    "List all my databases",
    "Search for project pages",
    "Create a new meeting notes page",
];

pub const PLACEHOLDER: &str = "Ask about your Notion workspace...";

pub const TAGLINE: &str = "Manage your Notion workspace with AI";

pub const WELCOME_TEXT: &str = "Your AI assistant for managing Notion workspaces. Create pages, \
search content, manage databases, and organize your workspace -- all through natural language.";

pub const NO_HISTORY: &str = "No conversations yet";

pub fn welcome_title(agent_name: &str) -> String {
    format!("Welcome to {}", agent_name)
}

/// Footer line under the input
pub fn capabilities(agent_name: &str) -> String {
    format!(
        "{} can create pages, search content, manage databases, and organize your workspace.",
        agent_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_actions_have_unique_labels() {
        let mut labels: Vec<_> = QUICK_ACTIONS.iter().map(|a| a.label).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), QUICK_ACTIONS.len());
    }

    #[test]
    fn test_welcome_copy_uses_agent_name() {
        assert_eq!(welcome_title("Helper"), "Welcome to Helper");
        assert!(capabilities("Helper").starts_with("Helper can create pages"));
    }
}
