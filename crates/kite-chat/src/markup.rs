//! Minimal line-oriented markup used in agent replies.
//!
//! Supports `#`/`##`/`###` headings, `-`/`*` bullets, blank-line spacers and
//! `**bold**` spans inside paragraphs. Nothing nests.

/// Heading depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// `# `
    Top,
    /// `## `
    Section,
    /// `### `
    Sub,
}

/// Inline piece of a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Plain(String),
    Bold(String),
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Plain(s) | Fragment::Bold(s) => s,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Fragment::Bold(_))
    }
}

/// One rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    Bullet { marker: char, text: String },
    Spacer,
    Paragraph(Vec<Fragment>),
}

impl Block {
    /// The block's text without any emphasis
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Bullet { text, .. } => text.clone(),
            Block::Spacer => String::new(),
            Block::Paragraph(fragments) => fragments.iter().map(Fragment::text).collect(),
        }
    }
}

const BOLD: &str = "**";

/// Render `text` into blocks, one per line. Empty input yields no blocks.
pub fn render(text: &str) -> Vec<Block> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(render_line).collect()
}

fn render_line(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix("### ") {
        return heading(HeadingLevel::Sub, rest);
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return heading(HeadingLevel::Section, rest);
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return heading(HeadingLevel::Top, rest);
    }
    for marker in ['-', '*'] {
        if let Some(rest) = line.strip_prefix(marker).and_then(|r| r.strip_prefix(' ')) {
            return Block::Bullet {
                marker,
                text: rest.to_string(),
            };
        }
    }
    if line.trim().is_empty() {
        return Block::Spacer;
    }
    Block::Paragraph(scan_bold(line))
}

fn heading(level: HeadingLevel, text: &str) -> Block {
    Block::Heading {
        level,
        text: text.to_string(),
    }
}

/// Split a line into plain and bold fragments.
///
/// Each `**` opens a span that closes at the next `**`. An opening marker
/// without a closing one stays literal. Empty plain runs are dropped.
pub fn scan_bold(line: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find(BOLD) {
        let after_open = &rest[open + BOLD.len()..];
        let Some(close) = after_open.find(BOLD) else {
            break;
        };
        if open > 0 {
            fragments.push(Fragment::Plain(rest[..open].to_string()));
        }
        fragments.push(Fragment::Bold(after_open[..close].to_string()));
        rest = &after_open[close + BOLD.len()..];
    }

    if !rest.is_empty() || fragments.is_empty() {
        fragments.push(Fragment::Plain(rest.to_string()));
    }
    fragments
}
