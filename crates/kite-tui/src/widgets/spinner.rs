//! Animated "working" indicator

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, text::Span, widgets::Widget};
use std::time::{Duration, Instant};

/// Spinner animation frames
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const FRAME_DURATION: Duration = Duration::from_millis(80);

/// Frame to show after `elapsed`
pub fn frame_at(elapsed: Duration) -> &'static str {
    let index = (elapsed.as_millis() / FRAME_DURATION.as_millis()) as usize;
    SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
}

/// Label shown while a request is outstanding
pub fn working_label(agent_name: &str) -> String {
    format!("{} is working...", agent_name)
}

/// Animated spinner with a label
pub struct Spinner<'a> {
    label: &'a str,
    theme: &'a Theme,
    start_time: Instant,
}

impl<'a> Spinner<'a> {
    pub fn new(label: &'a str, theme: &'a Theme) -> Self {
        Self {
            label,
            theme,
            start_time: Instant::now(),
        }
    }

    /// Animate relative to when the request started
    pub fn with_start_time(mut self, start: Instant) -> Self {
        self.start_time = start;
        self
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 {
            return;
        }

        let text = format!("{} {}", frame_at(self.start_time.elapsed()), self.label);
        let span = Span::styled(&text, self.theme.warning_style());
        buf.set_span(area.x, area.y, &span, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cycle() {
        assert_eq!(frame_at(Duration::ZERO), SPINNER_FRAMES[0]);
        assert_eq!(frame_at(Duration::from_millis(85)), SPINNER_FRAMES[1]);
        assert_eq!(
            frame_at(FRAME_DURATION * SPINNER_FRAMES.len() as u32),
            SPINNER_FRAMES[0]
        );
    }

    #[test]
    fn test_working_label() {
        assert_eq!(
            working_label("Notion Power Agent"),
            "Notion Power Agent is working..."
        );
    }

    #[test]
    fn test_render_narrow_area_is_noop() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        Spinner::new("busy", &theme).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
