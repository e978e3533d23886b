//! Dismissible error banner

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const DISMISS_HINT: &str = "Esc dismiss";

pub struct ErrorBanner<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let reserved = DISMISS_HINT.width() + 3;
        let text = crate::widgets::selector::truncate(
            &format!("⚠ {}", self.message),
            width.saturating_sub(reserved).max(1),
        );
        let gap = width.saturating_sub(text.width() + DISMISS_HINT.width());

        let mut spans = vec![Span::styled(
            text,
            self.theme.error_style().add_modifier(Modifier::BOLD),
        )];
        if gap > 0 {
            spans.push(Span::raw(" ".repeat(gap)));
            spans.push(Span::styled(DISMISS_HINT, self.theme.dim_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
