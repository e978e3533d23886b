//! Message list widget for displaying the conversation

use crate::theme::Theme;
use crate::widgets::markup::render_blocks;
use crate::widgets::result_card::{CardState, card_lines};
use kite_chat::{ItemKey, Message, ResultView, markup};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Shown for an agent reply with neither text nor a structured result
pub const NO_CONTENT: &str = "No response content";

/// A result item that can be copied or opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTarget {
    pub key: ItemKey,
    pub copy_text: String,
    pub url: Option<String>,
}

/// Every result item in `messages`, in display order
pub fn item_targets(messages: &[Message]) -> Vec<ItemTarget> {
    messages
        .iter()
        .filter_map(|msg| msg.agent_result.as_ref().map(|r| (msg, r)))
        .flat_map(|(msg, result)| {
            ResultView::new(result, msg.metadata.as_ref())
                .items
                .into_iter()
                .map(|item| ItemTarget {
                    key: ItemKey::new(msg.id.clone(), item.index),
                    copy_text: item.copy_text,
                    url: item.url,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Widget for displaying a list of chat messages
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    agent_name: &'a str,
    scroll: usize,
    selected: Option<&'a ItemKey>,
    copied: Option<&'a ItemKey>,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            agent_name: "Agent",
            scroll: 0,
            selected: None,
            copied: None,
        }
    }

    /// Fallback header for agent replies without metadata
    pub fn agent_name(mut self, name: &'a str) -> Self {
        self.agent_name = name;
        self
    }

    /// Set scroll offset
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Item under the results cursor
    pub fn selected(mut self, key: Option<&'a ItemKey>) -> Self {
        self.selected = key;
        self
    }

    /// Item showing the copied indicator
    pub fn copied(mut self, key: Option<&'a ItemKey>) -> Self {
        self.copied = key;
        self
    }

    /// Total height of the list at `width`
    pub fn height(&self, width: usize) -> usize {
        self.lines(width).len()
    }

    /// All lines for the list at `width`
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        self.messages
            .iter()
            .flat_map(|msg| self.render_message(msg, width))
            .collect()
    }

    fn card_state(&self, msg: &Message) -> CardState {
        let index_in = |key: Option<&ItemKey>| {
            key.filter(|k| k.message_id == msg.id).map(|k| k.index)
        };
        CardState {
            selected: index_in(self.selected),
            copied: index_in(self.copied),
        }
    }

    fn render_message(&self, msg: &Message, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let content_width = width.saturating_sub(2).max(1);

        let header = if msg.is_user() {
            Span::styled("▶ You", self.theme.accent_bold())
        } else if msg.is_error {
            Span::styled(
                "✗ Error",
                self.theme.error_style().add_modifier(Modifier::BOLD),
            )
        } else {
            let name = msg
                .metadata
                .as_ref()
                .and_then(|m| m.agent_name.as_deref())
                .filter(|n| !n.is_empty())
                .unwrap_or(self.agent_name);
            Span::styled(
                format!("◀ {}", name),
                self.theme.success_style().add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::from(header));

        let body = if msg.is_user() {
            plain_lines(&msg.content, self.theme.base_style(), content_width)
        } else if msg.is_error {
            plain_lines(&msg.content, self.theme.error_style(), content_width)
        } else if let Some(result) = &msg.agent_result {
            let view = ResultView::new(result, msg.metadata.as_ref());
            if view.is_empty() {
                vec![self.no_content()]
            } else {
                card_lines(&view, self.card_state(msg), self.theme, content_width)
            }
        } else if !msg.content.is_empty() {
            render_blocks(&markup::render(&msg.content), self.theme, content_width)
        } else {
            vec![self.no_content()]
        };

        lines.extend(body.into_iter().map(indent));
        lines.push(Line::from(""));
        lines
    }

    fn no_content(&self) -> Line<'static> {
        Line::from(Span::styled(
            NO_CONTENT,
            self.theme.dim_style().add_modifier(Modifier::ITALIC),
        ))
    }
}

fn plain_lines(text: &str, style: ratatui::style::Style, width: usize) -> Vec<Line<'static>> {
    textwrap::wrap(text, width)
        .into_iter()
        .map(|row| Line::from(Span::styled(row.into_owned(), style)))
        .collect()
}

fn indent(line: Line<'static>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    spans.extend(line.spans);
    Line::from(spans)
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let visible: Vec<Line> = self
            .lines(area.width as usize)
            .into_iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible).render(area, buf);
    }
}
