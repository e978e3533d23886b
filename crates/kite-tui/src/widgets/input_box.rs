//! Prompt line under the conversation

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Single-line prompt.
///
/// While disabled (a request is in flight) the text stays visible but
/// every edit is refused and no cursor is drawn.
#[derive(Debug)]
pub struct InputBox {
    text: String,
    /// Byte offset into `text`, always on a char boundary
    cursor: usize,
    placeholder: String,
    /// Key help in the bottom border
    hint: String,
    focused: bool,
    enabled: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            placeholder: String::new(),
            hint: String::new(),
            focused: false,
            enabled: true,
        }
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn content(&self) -> &str {
        &self.text
    }

    /// Replace the prompt, leaving the cursor at the end
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.text = content.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Hand over the prompt for sending and start a fresh one
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Apply an editing action. Returns whether the prompt changed or moved.
    pub fn handle_action(&mut self, action: &Action) -> bool {
        if !self.enabled {
            return false;
        }

        match action {
            Action::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            Action::Paste(pasted) => {
                // The prompt is one line; line breaks become single spaces
                let flat = pasted
                    .split(['\r', '\n'])
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                self.text.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                !flat.is_empty()
            }
            Action::Backspace => match self.before_cursor() {
                Some(c) => {
                    self.cursor -= c.len_utf8();
                    self.text.remove(self.cursor);
                    true
                }
                None => false,
            },
            Action::Delete => {
                if self.after_cursor().is_none() {
                    return false;
                }
                self.text.remove(self.cursor);
                true
            }
            Action::Left => match self.before_cursor() {
                Some(c) => {
                    self.cursor -= c.len_utf8();
                    true
                }
                None => false,
            },
            Action::Right => match self.after_cursor() {
                Some(c) => {
                    self.cursor += c.len_utf8();
                    true
                }
                None => false,
            },
            Action::Home => {
                self.cursor = 0;
                true
            }
            Action::End => {
                self.cursor = self.text.len();
                true
            }
            Action::ClearLine => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    fn before_cursor(&self) -> Option<char> {
        self.text[..self.cursor].chars().next_back()
    }

    fn after_cursor(&self) -> Option<char> {
        self.text[self.cursor..].chars().next()
    }

    /// First visible column and the visible slice for a `width` column line.
    ///
    /// The view only moves when the cursor would leave it off the right edge.
    fn window(&self, width: usize) -> (usize, String) {
        let cursor_col = self.text[..self.cursor].width();
        let offset = (cursor_col + 1).saturating_sub(width);

        let mut col = 0;
        let mut visible = String::new();
        for c in self.text.chars() {
            let w = c.width().unwrap_or(0);
            if col >= offset {
                if col + w > offset + width {
                    break;
                }
                visible.push(c);
            }
            col += w;
        }
        (offset, visible)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let active = self.focused && self.enabled;
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(if active {
                theme.accent_style()
            } else {
                theme.border_style()
            });
        if !self.hint.is_empty() {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", self.hint),
                theme.dim_style(),
            )));
        }
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.text.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(theme.dim_style())
                .render(inner, buf);
        } else {
            let (offset, visible) = self.window(inner.width as usize);
            let style = if self.enabled {
                theme.base_style()
            } else {
                theme.dim_style()
            };
            Paragraph::new(visible).style(style).render(inner, buf);

            if active {
                let col = self.text[..self.cursor].width() - offset;
                self.draw_cursor(inner, col, buf, theme);
            }
            return;
        }

        if active {
            self.draw_cursor(inner, 0, buf, theme);
        }
    }

    fn draw_cursor(&self, inner: Rect, col: usize, buf: &mut Buffer, theme: &Theme) {
        if col >= inner.width as usize {
            return;
        }
        if let Some(cell) = buf.cell_mut((inner.x + col as u16, inner.y)) {
            cell.set_style(Style::default().bg(theme.accent));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_action(&Action::Char(c));
        }
        input
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_typing_and_editing() {
        let mut input = typed("héllo wörld");
        assert_eq!(input.content(), "héllo wörld");

        input.handle_action(&Action::Left);
        input.handle_action(&Action::Left);
        input.handle_action(&Action::Backspace);
        assert_eq!(input.content(), "héllo wöld");

        input.handle_action(&Action::Home);
        input.handle_action(&Action::Right);
        input.handle_action(&Action::Delete);
        assert_eq!(input.content(), "hllo wöld");

        input.handle_action(&Action::End);
        input.handle_action(&Action::Char('!'));
        assert_eq!(input.content(), "hllo wöld!");

        input.handle_action(&Action::ClearLine);
        assert_eq!(input.content(), "");
        assert!(!input.handle_action(&Action::Backspace));
        assert!(!input.handle_action(&Action::Delete));
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = typed("a");
        input.handle_action(&Action::Paste("b\r\nc\n".into()));
        assert_eq!(input.content(), "ab c");
        input.handle_action(&Action::Home);
        input.handle_action(&Action::Paste("> ".into()));
        assert_eq!(input.content(), "> ab c");
    }

    #[test]
    fn test_disabled_refuses_edits() {
        let mut input = typed("draft");
        input.set_enabled(false);
        assert!(!input.handle_action(&Action::Char('x')));
        assert!(!input.handle_action(&Action::ClearLine));
        assert!(!input.handle_action(&Action::Paste("more".into())));
        assert_eq!(input.content(), "draft");

        input.set_enabled(true);
        assert!(input.handle_action(&Action::Char('s')));
        assert_eq!(input.content(), "drafts");
    }

    #[test]
    fn test_take_and_blank() {
        let mut input = typed("  ");
        assert!(input.is_blank());
        input.set_content("Search for pages about ");
        assert!(!input.is_blank());
        assert_eq!(input.take(), "Search for pages about ");
        assert_eq!(input.content(), "");
        assert!(input.is_blank());

        // Cursor is back at the start after taking
        input.handle_action(&Action::Char('x'));
        assert_eq!(input.content(), "x");
    }

    #[test]
    fn test_render_placeholder_and_hint() {
        let theme = Theme::dark();
        let input = InputBox::new()
            .with_placeholder("Ask about your Notion workspace...")
            .with_hint("Enter send");
        let area = Rect::new(0, 0, 50, 3);
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf, &theme);

        assert!(row(&buf, 1).contains("Ask about your Notion workspace..."));
        assert!(row(&buf, 2).contains("Enter send"));
    }

    #[test]
    fn test_long_prompt_keeps_cursor_in_view() {
        let theme = Theme::dark();
        let mut input = typed("abcdefghijklmnop");
        input.set_focused(true);

        // Inner width is 8 columns; the tail and the cursor cell fit
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf, &theme);
        assert_eq!(row(&buf, 1), "│jklmnop │");
        assert_eq!(buf[(8, 1)].bg, theme.accent);

        input.handle_action(&Action::Home);
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf, &theme);
        assert_eq!(row(&buf, 1), "│abcdefgh│");
        assert_eq!(buf[(1, 1)].bg, theme.accent);
    }
}
