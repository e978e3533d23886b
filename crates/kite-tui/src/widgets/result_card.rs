//! Structured agent result rendered as a card of lines

use crate::theme::Theme;
use crate::widgets::markup::render_blocks;
use kite_chat::view::{Badge, ItemView, ResultView};
use ratatui::{
    style::Modifier,
    text::{Line, Span},
};

/// Per-card interaction state
#[derive(Debug, Clone, Copy, Default)]
pub struct CardState {
    /// Item under the results cursor
    pub selected: Option<usize>,
    /// Item currently showing the copied indicator
    pub copied: Option<usize>,
}

/// Lay out `view` as lines at most `width` columns wide
pub fn card_lines(
    view: &ResultView,
    state: CardState,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let width = width.max(1);

    if let Some(summary) = &view.summary {
        for (i, row) in textwrap::wrap(&summary.text, width).into_iter().enumerate() {
            let mut spans = Vec::new();
            if let (0, Some(badge)) = (i, &summary.action) {
                spans.push(badge_span(badge, theme));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                row.into_owned(),
                theme.base_style().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from(spans));
        }
    }

    if !view.details.is_empty() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_blocks(&view.details, theme, width));
    }

    if let Some(page) = &view.page {
        if let Some(title) = &page.title {
            lines.push(Line::from(vec![
                Span::styled("Page: ", theme.dim_style()),
                Span::styled(title.clone(), theme.base_style()),
            ]));
        }
        if let Some(url) = &page.url {
            lines.push(Line::from(vec![
                Span::styled("Open in Notion ", theme.dim_style()),
                Span::styled(url.clone(), theme.link_style()),
            ]));
        }
    }

    if !view.items.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Results ({})", view.items.len()),
            theme.dim_style().add_modifier(Modifier::BOLD),
        )));
        for item in &view.items {
            lines.extend(item_lines(item, state, theme));
        }
    }

    if let Some(footer) = &view.footer {
        lines.push(Line::from(Span::styled(
            format!("{} -- {}", footer.agent_name, footer.timestamp),
            theme.dim_style().add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn item_lines(item: &ItemView, state: CardState, theme: &Theme) -> Vec<Line<'static>> {
    let selected = state.selected == Some(item.index);
    let marker = if selected { "▸ " } else { "  " };

    let mut head = vec![Span::styled(marker, theme.accent_style())];
    if let Some(badge) = &item.badge {
        head.push(badge_span(badge, theme));
        head.push(Span::raw(" "));
    }
    let title_style = if selected {
        theme.selected_style()
    } else {
        theme.base_style()
    };
    head.push(Span::styled(item.title.clone(), title_style));
    if state.copied == Some(item.index) {
        head.push(Span::styled(" ✓ copied", theme.success_style()));
    }

    let mut lines = vec![Line::from(head)];

    let mut meta = Vec::new();
    if let Some(edited) = &item.edited {
        meta.push(Span::styled(format!("Edited {}", edited), theme.dim_style()));
    }
    if let Some(url) = &item.url {
        if !meta.is_empty() {
            meta.push(Span::styled(" · ", theme.dim_style()));
        }
        meta.push(Span::styled(url.clone(), theme.link_style()));
    }
    if !meta.is_empty() {
        let mut row = vec![Span::raw("    ")];
        row.extend(meta);
        lines.push(Line::from(row));
    }

    lines
}

fn badge_span(badge: &Badge, theme: &Theme) -> Span<'static> {
    Span::styled(format!("[{}]", badge.label), theme.badge_style(badge.accent))
}

/// Plain-text rendition for line mode
pub fn card_text(view: &ResultView) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(summary) = &view.summary {
        match &summary.action {
            Some(badge) => out.push(format!("[{}] {}", badge.label, summary.text)),
            None => out.push(summary.text.clone()),
        }
    }
    out.extend(crate::widgets::markup::plain_lines(&view.details));
    if let Some(page) = &view.page {
        if let Some(title) = &page.title {
            out.push(format!("Page: {}", title));
        }
        if let Some(url) = &page.url {
            out.push(format!("Open in Notion: {}", url));
        }
    }
    if !view.items.is_empty() {
        out.push(format!("Results ({})", view.items.len()));
        for item in &view.items {
            let badge = item
                .badge
                .as_ref()
                .map(|b| format!("[{}] ", b.label))
                .unwrap_or_default();
            out.push(format!("  {}. {}{}", item.index + 1, badge, item.title));
            if let Some(edited) = &item.edited {
                out.push(format!("     Edited {}", edited));
            }
            if let Some(url) = &item.url {
                out.push(format!("     {}", url));
            }
        }
    }
    if let Some(footer) = &view.footer {
        out.push(format!("{} -- {}", footer.agent_name, footer.timestamp));
    }
    out
}
