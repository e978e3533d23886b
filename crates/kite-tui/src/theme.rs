//! Color theme support

use kite_chat::Accent;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Primary text color
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (highlights, prompts)
    pub accent: Color,
    /// Error color
    pub error: Color,
    /// Success color
    pub success: Color,
    /// Warning color
    pub warning: Color,
    /// Border color
    pub border: Color,
    /// Selection/highlight background
    pub selection_bg: Color,
    /// Link color
    pub link: Color,
    /// Badge colors
    pub emerald: Color,
    pub blue: Color,
    pub amber: Color,
    pub red: Color,
    pub purple: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            selection_bg: Color::DarkGray,
            link: Color::Blue,
            emerald: Color::Rgb(52, 211, 153),
            blue: Color::Rgb(96, 165, 250),
            amber: Color::Rgb(251, 191, 36),
            red: Color::Rgb(248, 113, 113),
            purple: Color::Rgb(192, 132, 252),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            error: Color::Red,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            border: Color::Gray,
            selection_bg: Color::LightBlue,
            link: Color::Blue,
            emerald: Color::Rgb(4, 120, 87),
            blue: Color::Rgb(29, 78, 216),
            amber: Color::Rgb(180, 83, 9),
            red: Color::Rgb(185, 28, 28),
            purple: Color::Rgb(109, 40, 217),
        }
    }

    /// Select a theme by name, falling back to dark
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get base style
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get dimmed style
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Get accent style
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Get bold accent style
    pub fn accent_bold(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get error style
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Get success style
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Get warning style
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get link style
    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.link)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Get border style
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the selected row of a focused list
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Color for a badge accent
    pub fn accent_color(&self, accent: Accent) -> Color {
        match accent {
            Accent::Emerald => self.emerald,
            Accent::Blue => self.blue,
            Accent::Amber => self.amber,
            Accent::Red => self.red,
            Accent::Purple => self.purple,
            Accent::Primary => self.accent,
        }
    }

    /// Style for a badge label
    pub fn badge_style(&self, accent: Accent) -> Style {
        Style::default()
            .fg(self.accent_color(accent))
            .add_modifier(Modifier::BOLD)
    }
}
