//! Row of suggestion chips

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Suggestions laid out left to right, one line
pub struct Chips<'a> {
    labels: &'a [&'a str],
    selected: Option<usize>,
    theme: &'a Theme,
}

impl<'a> Chips<'a> {
    pub fn new(labels: &'a [&'a str], theme: &'a Theme) -> Self {
        Self {
            labels,
            selected: None,
            theme,
        }
    }

    /// Highlight one chip (only while the row has focus)
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    fn spans(&self, width: usize) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let mut used = 0;

        // Keep the selected chip visible by starting the row at it when needed
        let start = match self.selected {
            Some(sel) if chip_end(self.labels, sel) > width => sel,
            _ => 0,
        };

        for (i, label) in self.labels.iter().enumerate().skip(start) {
            let chip = format!("( {} )", label);
            let chip_width = chip.width() + 1;
            if used > 0 && used + chip_width > width {
                break;
            }
            let style = if self.selected == Some(i) {
                self.theme.selected_style()
            } else {
                self.theme.dim_style()
            };
            spans.push(Span::styled(chip, style));
            spans.push(Span::raw(" "));
            used += chip_width;
        }
        spans
    }
}

/// Column just past chip `index` when laid out from the start
fn chip_end(labels: &[&str], index: usize) -> usize {
    labels
        .iter()
        .take(index + 1)
        .map(|label| label.width() + 5)
        .sum()
}

impl Widget for Chips<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.labels.is_empty() {
            return;
        }
        Paragraph::new(Line::from(self.spans(area.width as usize))).render(area, buf);
    }
}
