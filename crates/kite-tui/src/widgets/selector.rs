//! Titled list sections for the sidebar, with a shared cursor

use crate::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// An entry in a section
pub struct SelectorItem<'a> {
    /// Display label
    pub label: &'a str,
    /// Optional second line
    pub description: Option<&'a str>,
}

/// One titled section of selectable entries.
///
/// Entries are truncated to the available width; the selected entry is
/// highlighted only while the section has focus.
pub struct Selector<'a> {
    title: &'a str,
    action: Option<&'a str>,
    empty_text: Option<&'a str>,
    items: Vec<SelectorItem<'a>>,
    selected: Option<usize>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Selector<'a> {
    pub fn new(title: &'a str, items: Vec<SelectorItem<'a>>, theme: &'a Theme) -> Self {
        Self {
            title,
            action: None,
            empty_text: None,
            items,
            selected: None,
            focused: false,
            theme,
        }
    }

    /// Right-aligned hint in the title row
    pub fn with_action(mut self, action: Option<&'a str>) -> Self {
        self.action = action;
        self
    }

    /// Text shown when there are no entries
    pub fn with_empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = Some(text);
        self
    }

    /// Highlighted entry, if it belongs to this section
    pub fn with_selected(mut self, index: Option<usize>) -> Self {
        self.selected = index.filter(|i| *i < self.items.len());
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Rows this section needs
    pub fn height(&self) -> u16 {
        let body: usize = if self.items.is_empty() {
            usize::from(self.empty_text.is_some())
        } else {
            self.items
                .iter()
                .map(|item| 1 + usize::from(item.description.is_some()))
                .sum()
        };
        (1 + body) as u16
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let title = self.title.to_uppercase();
        let mut header = vec![Span::styled(
            title.clone(),
            self.theme.dim_style().add_modifier(Modifier::BOLD),
        )];
        if let Some(action) = self.action {
            let gap = width.saturating_sub(title.width() + action.width());
            if gap > 0 {
                header.push(Span::raw(" ".repeat(gap)));
                header.push(Span::styled(action.to_string(), self.theme.accent_style()));
            }
        }
        lines.push(Line::from(header));

        if self.items.is_empty() {
            if let Some(text) = self.empty_text {
                lines.push(Line::from(Span::styled(
                    truncate(text, width),
                    self.theme.dim_style().add_modifier(Modifier::ITALIC),
                )));
            }
            return lines;
        }

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = self.focused && self.selected == Some(i);
            let style = if is_selected {
                self.theme.selected_style()
            } else {
                self.theme.base_style()
            };
            let prefix = if is_selected { "› " } else { "  " };
            let label = truncate(item.label, width.saturating_sub(2));
            lines.push(Line::from(Span::styled(format!("{}{}", prefix, label), style)));
            if let Some(description) = item.description {
                lines.push(Line::from(Span::styled(
                    format!("  {}", truncate(description, width.saturating_sub(2))),
                    self.theme.dim_style(),
                )));
            }
        }

        lines
    }

    /// Body rows to skip so the selected entry is fully shown in `rows`
    fn scroll_offset(&self, rows: usize) -> usize {
        let Some(selected) = self.selected else {
            return 0;
        };
        let entry_height = |item: &SelectorItem| 1 + usize::from(item.description.is_some());
        let start: usize = self.items[..selected].iter().map(entry_height).sum();
        let end = start + entry_height(&self.items[selected]);
        end.saturating_sub(rows)
    }
}

impl Widget for Selector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // The title row stays put while the entries scroll under it
        let mut lines = self.lines(area.width as usize);
        let body = lines.split_off(1);
        Paragraph::new(lines).render(Rect { height: 1, ..area }, buf);

        let body_area = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        if body_area.height == 0 {
            return;
        }
        let offset = self.scroll_offset(body_area.height as usize);
        Paragraph::new(body)
            .scroll((offset as u16, 0))
            .render(body_area, buf);
    }
}

/// Cut `text` to `width` columns, ending in an ellipsis when cut
pub fn truncate(text: &str, width: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.width() <= width {
        return flat;
    }
    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let w = c.to_string().width();
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}

/// Cursor over a list whose length changes
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorState {
    /// Currently selected index
    pub selected: usize,
}

impl SelectorState {
    /// Move selection up, wrapping to the end
    pub fn up(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = item_count - 1;
        }
    }

    /// Move selection down, wrapping to the start
    pub fn down(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }
        if self.selected < item_count - 1 {
            self.selected += 1;
        } else {
            self.selected = 0;
        }
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp(&mut self, item_count: usize) {
        self.selected = self.selected.min(item_count.saturating_sub(1));
    }
}
