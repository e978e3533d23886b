//! Markup blocks to styled terminal lines

use crate::theme::Theme;
use kite_chat::markup::{Block, Fragment, HeadingLevel};
use ratatui::{
    style::Modifier,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

/// Convert rendered markup blocks to lines, wrapped to `width`.
///
/// Every block yields at least one line, so a blank input line stays a blank
/// output line.
pub fn render_blocks(blocks: &[Block], theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let style = match level {
                    HeadingLevel::Top => theme
                        .accent_style()
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    HeadingLevel::Section => theme.accent_style().add_modifier(Modifier::BOLD),
                    HeadingLevel::Sub => theme.base_style().add_modifier(Modifier::BOLD),
                };
                for row in textwrap::wrap(text, width) {
                    lines.push(Line::from(Span::styled(row.into_owned(), style)));
                }
            }
            Block::Bullet { text, .. } => {
                let body = textwrap::Options::new(width)
                    .initial_indent("• ")
                    .subsequent_indent("  ");
                for (i, row) in textwrap::wrap(text, body).into_iter().enumerate() {
                    let row = row.into_owned();
                    if i == 0 {
                        let rest = row.strip_prefix("• ").unwrap_or(&row).to_string();
                        lines.push(Line::from(vec![
                            Span::styled("• ", theme.dim_style()),
                            Span::styled(rest, theme.base_style()),
                        ]));
                    } else {
                        lines.push(Line::from(Span::styled(row, theme.base_style())));
                    }
                }
            }
            Block::Spacer => lines.push(Line::from("")),
            Block::Paragraph(fragments) => lines.extend(wrap_fragments(fragments, theme, width)),
        }
    }

    lines
}

/// Wrap styled fragments word by word, keeping each word's style
fn wrap_fragments(fragments: &[Fragment], theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for fragment in fragments {
        let style = if fragment.is_bold() {
            theme.base_style().add_modifier(Modifier::BOLD)
        } else {
            theme.base_style()
        };
        for piece in fragment.text().split_inclusive(' ') {
            let piece_width = piece.trim_end().width();
            if used > 0 && used + piece_width > width {
                lines.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            used += piece.width();
            current.push(Span::styled(piece.to_string(), style));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// Flatten blocks to plain text, one line per block
pub fn plain_lines(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .map(|block| match block {
            Block::Bullet { text, .. } => format!("• {}", text),
            other => other.plain_text(),
        })
        .collect()
}
