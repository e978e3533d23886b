//! TUI implementation for kite

use tokio::sync::mpsc;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};
use std::sync::Arc;
use std::time::Instant;

use kite_agent::AgentEnvelope;
use kite_chat::{
    Chat, Clipboard, CopyIndicator, DemoOverlay, Message, SystemClipboard, copy::copy_item, demo,
};
use kite_tui::{
    App, Theme,
    input::{Action, key_to_action},
    widgets::{
        Chips, ErrorBanner, InputBox, ItemTarget, MessageList, Selector, SelectorItem,
        SelectorState, Spinner, item_targets, selector::truncate, spinner::working_label,
    },
};

use crate::config::Settings;
use crate::prompts::{self, QUICK_ACTIONS, SUGGESTIONS};

const SIDEBAR_WIDTH: u16 = 32;

/// Narrowest terminal that still gets a sidebar
const SIDEBAR_MIN_TOTAL: u16 = 72;

const INPUT_HINT: &str =
    "Enter send · Tab focus · Ctrl+B sidebar · Ctrl+T samples · Ctrl+L clear · Ctrl+C quit";

/// Messages delivered to the event loop from background tasks
#[derive(Debug)]
pub enum UiMessage {
    /// Outcome of the in-flight agent call
    Reply(kite_agent::Result<AgentEnvelope>),
}

/// Pane receiving navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Chips,
    Sidebar,
    Results,
}

/// TUI application state
pub struct TuiState {
    chat: Chat,
    overlay: DemoOverlay,
    input: InputBox,
    focus: Focus,
    sidebar_open: bool,
    /// Cursor over quick actions followed by history entries
    sidebar: SelectorState,
    chips: SelectorState,
    /// Cursor over every result item in the displayed log
    results: SelectorState,
    copy: CopyIndicator,
    clipboard: Arc<dyn Clipboard>,
    /// Current scroll position; `usize::MAX` follows the bottom
    scroll: usize,
    /// Terminal width from the last key or frame
    width: u16,
    theme: Theme,
    agent_name: String,
    /// Spinner start time for animation
    spinner_start: Instant,
    /// Channel for replies from spawned calls
    ui_tx: mpsc::Sender<UiMessage>,
}

impl TuiState {
    pub fn new(
        chat: Chat,
        settings: &Settings,
        theme: Theme,
        clipboard: Arc<dyn Clipboard>,
        ui_tx: mpsc::Sender<UiMessage>,
    ) -> Self {
        let mut input = InputBox::new()
            .with_placeholder(prompts::PLACEHOLDER)
            .with_hint(INPUT_HINT);
        input.set_focused(true);

        Self {
            chat,
            overlay: DemoOverlay::new(settings.sample_data),
            input,
            focus: Focus::Input,
            sidebar_open: true,
            sidebar: SelectorState::default(),
            chips: SelectorState::default(),
            results: SelectorState::default(),
            copy: CopyIndicator::new(),
            clipboard,
            scroll: usize::MAX,
            width: 0,
            theme,
            agent_name: settings.agent_name.clone(),
            spinner_start: Instant::now(),
            ui_tx,
        }
    }

    /// The log on screen: real messages or the samples
    fn displayed(&self) -> &[Message] {
        self.overlay.displayed(self.chat.store().messages())
    }

    fn is_loading(&self) -> bool {
        self.chat.store().is_loading()
    }

    fn history_len(&self) -> usize {
        demo::history(self.displayed()).count()
    }

    fn sidebar_len(&self) -> usize {
        QUICK_ACTIONS.len() + self.history_len()
    }

    fn targets(&self) -> Vec<ItemTarget> {
        item_targets(self.displayed())
    }

    /// The error banner shows only for the latest failure and never while loading
    fn banner(&self) -> Option<&str> {
        if self.is_loading() {
            return None;
        }
        self.chat.store().last_error()
    }

    fn scroll_to_bottom(&mut self) {
        // Will be calculated during render based on content height
        self.scroll = usize::MAX;
    }

    /// Panes that can take focus right now, in Tab order
    fn focusable(&self) -> Vec<Focus> {
        let mut panes = vec![Focus::Input];
        if !self.is_loading() {
            panes.push(Focus::Chips);
        }
        if self.sidebar_visible(self.width) {
            panes.push(Focus::Sidebar);
        }
        if !self.targets().is_empty() {
            panes.push(Focus::Results);
        }
        panes
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.input.set_focused(focus == Focus::Input);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let panes = self.focusable();
        let current = panes.iter().position(|p| *p == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % panes.len()
        } else {
            (current + panes.len() - 1) % panes.len()
        };
        self.set_focus(panes[next]);
    }

    /// Drop focus from a pane that is no longer shown
    fn settle_focus(&mut self) {
        if !self.focusable().contains(&self.focus) {
            self.set_focus(Focus::Input);
        }
        self.sidebar.clamp(self.sidebar_len());
        self.results.clamp(self.targets().len());
    }

    /// Submit `text` and run the call in the background
    fn send(&mut self, text: &str) {
        let Some(call) = self.chat.begin(text) else {
            return;
        };

        self.input.set_enabled(false);
        self.spinner_start = Instant::now();
        self.set_focus(Focus::Input);
        self.scroll_to_bottom();

        let tx = self.ui_tx.clone();
        tokio::spawn(async move {
            let outcome = call.await;
            if tx.send(UiMessage::Reply(outcome)).await.is_err() {
                tracing::debug!("Reply arrived after the UI closed");
            }
        });
    }

    /// Apply a message from a background task
    pub fn handle_message(&mut self, message: UiMessage) {
        match message {
            UiMessage::Reply(outcome) => {
                self.chat.finish(outcome);
                self.input.set_enabled(true);
                self.scroll_to_bottom();
                self.settle_focus();
            }
        }
    }

    /// Timer housekeeping
    pub fn tick(&mut self, now: Instant) {
        self.copy.expire(now);
    }

    fn clear(&mut self) {
        self.chat.store_mut().clear();
        self.copy = CopyIndicator::new();
        self.scroll = 0;
        self.settle_focus();
    }

    fn activate_sidebar(&mut self) {
        let index = self.sidebar.selected;
        if let Some(action) = QUICK_ACTIONS.get(index) {
            self.input.set_content(action.prompt);
            self.set_focus(Focus::Input);
            return;
        }

        let history_index = index - QUICK_ACTIONS.len();
        if let Some(text) = self
            .overlay
            .pick_history(self.chat.store().messages(), history_index)
        {
            self.input.set_content(text.to_string());
            self.set_focus(Focus::Input);
        }
    }

    fn selected_target(&self) -> Option<ItemTarget> {
        self.targets().get(self.results.selected).cloned()
    }

    async fn copy_selected(&mut self) {
        let Some(target) = self.selected_target() else {
            return;
        };
        copy_item(
            self.clipboard.as_ref(),
            &mut self.copy,
            target.key,
            &target.copy_text,
        )
        .await;
    }

    fn open_selected(&self) {
        let Some(url) = self.selected_target().and_then(|t| t.url) else {
            return;
        };
        if let Err(e) = crate::utils::open_url(&url) {
            tracing::warn!("Could not open {}: {}", url, e);
        }
    }

    fn sidebar_visible(&self, total_width: u16) -> bool {
        self.sidebar_open && total_width >= SIDEBAR_MIN_TOTAL
    }

    /// Handle keyboard action. Returns false when the app should quit.
    pub async fn handle_action(&mut self, action: Action, width: u16) -> bool {
        if width != self.width {
            self.width = width;
            self.settle_focus();
        }

        match action {
            Action::Quit | Action::Interrupt => return false,
            Action::ToggleSidebar => {
                self.sidebar_open = !self.sidebar_open;
                self.settle_focus();
                return true;
            }
            Action::ToggleSampleData => {
                self.overlay.toggle();
                self.scroll_to_bottom();
                self.settle_focus();
                return true;
            }
            Action::Clear => {
                self.clear();
                return true;
            }
            Action::Escape => {
                if self.banner().is_some() {
                    self.chat.store_mut().dismiss_error();
                } else {
                    self.set_focus(Focus::Input);
                }
                return true;
            }
            Action::Tab => {
                self.cycle_focus(true);
                return true;
            }
            Action::BackTab => {
                self.cycle_focus(false);
                return true;
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(10);
                return true;
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                return true;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => match action {
                Action::Submit => {
                    if self.input.is_enabled() && !self.input.is_blank() {
                        let text = self.input.take();
                        self.send(&text);
                    }
                }
                _ => {
                    self.input.handle_action(&action);
                }
            },
            Focus::Chips => match action {
                Action::Left | Action::Up => self.chips.up(SUGGESTIONS.len()),
                Action::Right | Action::Down => self.chips.down(SUGGESTIONS.len()),
                Action::Submit => {
                    if let Some(text) = SUGGESTIONS.get(self.chips.selected) {
                        self.send(text);
                    }
                }
                _ => {}
            },
            Focus::Sidebar => match action {
                Action::Up => self.sidebar.up(self.sidebar_len()),
                Action::Down => self.sidebar.down(self.sidebar_len()),
                Action::Submit => self.activate_sidebar(),
                _ => {}
            },
            Focus::Results => match action {
                Action::Up | Action::Left => self.results.up(self.targets().len()),
                Action::Down | Action::Right => self.results.down(self.targets().len()),
                Action::Char('c') => self.copy_selected().await,
                Action::Char('o') | Action::Submit => self.open_selected(),
                _ => {}
            },
        }
        true
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        if size.width != self.width {
            self.width = size.width;
            self.settle_focus();
        }

        if self.sidebar_visible(size.width) {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                .split(size);
            self.render_sidebar(frame, columns[0]);
            self.render_main(frame, columns[1]);
        } else {
            self.render_main(frame, size);
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let inner = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };

        let focused = self.focus == Focus::Sidebar;
        let selected = self.sidebar.selected;

        let quick = Selector::new(
            "Quick Actions",
            QUICK_ACTIONS
                .iter()
                .map(|a| SelectorItem {
                    label: a.label,
                    description: Some(a.description),
                })
                .collect(),
            &self.theme,
        )
        .with_selected(Some(selected))
        .focused(focused);

        let real_is_empty = self.chat.store().is_empty();
        let history = Selector::new(
            "History",
            demo::history(self.displayed())
                .map(|m| SelectorItem {
                    label: m.content.as_str(),
                    description: None,
                })
                .collect(),
            &self.theme,
        )
        .with_action((!real_is_empty).then_some("Ctrl+L clear"))
        .with_empty_text(prompts::NO_HISTORY)
        .with_selected(selected.checked_sub(QUICK_ACTIONS.len()))
        .focused(focused);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(quick.height() + 1),
                Constraint::Min(2),
                Constraint::Length(5),
            ])
            .split(inner);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                truncate(&self.agent_name, inner.width as usize),
                self.theme.accent_bold(),
            )),
            Line::from(Span::styled("Workspace Management", self.theme.dim_style())),
        ]);
        frame.render_widget(header, rows[0]);
        frame.render_widget(quick, rows[1]);
        frame.render_widget(history, rows[2]);
        self.render_agent_status(frame, rows[3]);
    }

    fn render_agent_status(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;
        let (dot, status) = if self.chat.store().active_agent_id().is_some() {
            (self.theme.warning_style(), "Processing request...")
        } else {
            (self.theme.success_style(), "Ready")
        };

        let lines = vec![
            Line::from(Span::styled(
                "AGENT STATUS",
                self.theme.dim_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("● ", dot),
                Span::styled(
                    truncate(&self.agent_name, width.saturating_sub(2)),
                    self.theme.base_style(),
                ),
            ]),
            Line::from(Span::styled(status, self.theme.dim_style())),
            Line::from(Span::styled(
                truncate(&format!("ID: {}", self.chat.agent_id()), width),
                self.theme.dim_style(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_main(&mut self, frame: &mut Frame, area: Rect) {
        let loading = self.is_loading();
        let banner = self.banner().is_some();

        let mut constraints = vec![Constraint::Length(3), Constraint::Min(1)];
        if loading {
            constraints.push(Constraint::Length(1));
        }
        if banner {
            constraints.push(Constraint::Length(1));
        }
        if !loading {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        let mut next = 0;
        let mut take = || {
            let rect = chunks[next];
            next += 1;
            rect
        };

        let title_area = take();
        let body_area = take();
        self.render_title(frame, title_area);

        if self.displayed().is_empty() && !loading {
            self.render_welcome(frame, body_area);
        } else {
            self.render_messages(frame, body_area);
        }

        if loading {
            let label = working_label(&self.agent_name);
            let spinner = Spinner::new(&label, &self.theme).with_start_time(self.spinner_start);
            frame.render_widget(spinner, pad(take()));
        }

        if let Some(error) = self.banner() {
            frame.render_widget(ErrorBanner::new(error, &self.theme), pad(take()));
        }

        if !loading {
            let selected = (self.focus == Focus::Chips).then_some(self.chips.selected);
            frame.render_widget(
                Chips::new(SUGGESTIONS, &self.theme).selected(selected),
                pad(take()),
            );
        }

        self.input.render(take(), frame.buffer_mut(), &self.theme);

        let footer = Paragraph::new(Line::from(Span::styled(
            prompts::capabilities(&self.agent_name),
            self.theme.dim_style(),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(footer, take());
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style());
        let inner = pad(block.inner(area));
        frame.render_widget(block, area);

        let toggle = if self.overlay.is_enabled() {
            "Sample Data: On"
        } else {
            "Sample Data: Off"
        };
        let gap = (inner.width as usize)
            .saturating_sub(self.agent_name.chars().count() + toggle.len());

        let lines = vec![
            Line::from(vec![
                Span::styled(self.agent_name.clone(), self.theme.accent_bold()),
                Span::raw(" ".repeat(gap)),
                Span::styled(toggle, self.theme.dim_style()),
            ]),
            Line::from(Span::styled(prompts::TAGLINE, self.theme.dim_style())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_welcome(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                prompts::welcome_title(&self.agent_name),
                self.theme.accent_bold(),
            )),
            Line::from(""),
            Line::from(Span::styled(prompts::WELCOME_TEXT, self.theme.dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Pick a suggestion below or type a message.",
                self.theme.dim_style().add_modifier(Modifier::ITALIC),
            )),
        ];

        let width = area.width.saturating_sub(4).min(72);
        let top = area.height.saturating_sub(7) / 2;
        let centered = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + top,
            width,
            height: area.height.saturating_sub(top),
        };
        let welcome = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(welcome, centered);
    }

    fn render_messages(&mut self, frame: &mut Frame, area: Rect) {
        let inner = pad(area);
        if inner.height == 0 || inner.width < 2 {
            return;
        }
        let list_width = inner.width.saturating_sub(1);
        let viewport = inner.height as usize;

        let now = Instant::now();
        let messages = self.overlay.displayed(self.chat.store().messages());
        let targets = item_targets(messages);
        let selected = if self.focus == Focus::Results {
            targets.get(self.results.selected).map(|t| &t.key)
        } else {
            None
        };
        let copied = self.copy.current(now);

        let list = MessageList::new(messages, &self.theme)
            .agent_name(&self.agent_name)
            .selected(selected)
            .copied(copied);
        let content_height = list.height(list_width as usize);

        if self.scroll == usize::MAX {
            // Auto-scroll to bottom
            self.scroll = content_height.saturating_sub(viewport);
        } else {
            // Clamp scroll
            self.scroll = self.scroll.min(content_height.saturating_sub(viewport));
        }

        let list_area = Rect {
            width: list_width,
            ..inner
        };
        frame.render_widget(list.scroll(self.scroll), list_area);

        // Render scrollbar if content overflows
        if content_height > viewport {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            let mut scrollbar_state = ScrollbarState::new(content_height)
                .position(self.scroll)
                .viewport_content_length(viewport);

            frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
    }
}

/// One column of padding on each side
fn pad(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    }
}

/// Run the TUI application
pub async fn run_tui(chat: Chat, settings: &Settings) -> anyhow::Result<()> {
    let mut app = App::new()?.with_theme(Theme::by_name(&settings.theme));

    // Create channels
    let (ui_tx, mut ui_rx) = mpsc::channel::<UiMessage>(32);

    let clipboard: Arc<dyn Clipboard> = Arc::new(SystemClipboard::new());
    let mut state = TuiState::new(chat, settings, app.theme().clone(), clipboard, ui_tx);

    // Event stream
    let mut event_stream = EventStream::new();

    // Tick interval for the spinner and the copied indicator
    let mut tick_interval = tokio::time::interval(app.tick_rate());

    loop {
        app.draw(|frame| state.render(frame))?;
        let width = app.width()?;

        tokio::select! {
            biased;

            // Replies first so the spinner stops as soon as possible
            msg = ui_rx.recv() => {
                if let Some(msg) = msg {
                    state.handle_message(msg);
                }
            }

            // Handle terminal events (keyboard input)
            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if !state.handle_action(key_to_action(key), width).await {
                            break;
                        }
                    }
                    Some(Ok(Event::Paste(text))) => {
                        state.handle_action(Action::Paste(text), width).await;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        return Err(anyhow::anyhow!("Event error: {}", e));
                    }
                    None => break,
                }
            }

            // Tick for animations and timers
            _ = tick_interval.tick() => {
                state.tick(Instant::now());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CliOverrides, Config};
    use async_trait::async_trait;
    use kite_agent::{AgentClient, AgentContext, Error};
    use kite_chat::SessionIdentity;
    use parking_lot::Mutex;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;
    use std::collections::VecDeque;

    struct MockClient {
        replies: Mutex<VecDeque<kite_agent::Result<AgentEnvelope>>>,
    }

    impl MockClient {
        fn new(replies: Vec<kite_agent::Result<AgentEnvelope>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
            }
        }
    }

    #[async_trait]
    impl AgentClient for MockClient {
        async fn call(
            &self,
            _message: &str,
            _agent_id: &str,
            _context: &AgentContext,
        ) -> kite_agent::Result<AgentEnvelope> {
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Network))
        }
    }

    #[derive(Default)]
    struct MockClipboard {
        written: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for MockClipboard {
        async fn copy(&self, text: &str) -> bool {
            self.written.lock().push(text.to_string());
            true
        }
    }

    struct Harness {
        state: TuiState,
        rx: mpsc::Receiver<UiMessage>,
        clipboard: Arc<MockClipboard>,
    }

    fn harness(replies: Vec<kite_agent::Result<AgentEnvelope>>, sample_data: bool) -> Harness {
        let settings = Config::default().settings_with_env(
            &CliOverrides {
                sample_data,
                ..Default::default()
            },
            |_| None,
        );
        let chat = Chat::with_identity(
            Arc::new(MockClient::new(replies)),
            "agent-1",
            SessionIdentity::from_parts("sess", "user_1_abc"),
        );
        let (tx, rx) = mpsc::channel(8);
        let clipboard = Arc::new(MockClipboard::default());
        let state = TuiState::new(chat, &settings, Theme::dark(), clipboard.clone(), tx);
        Harness {
            state,
            rx,
            clipboard,
        }
    }

    async fn type_text(state: &mut TuiState, text: &str) {
        for c in text.chars() {
            state.handle_action(Action::Char(c), 120).await;
        }
    }

    /// Wait for the spawned call and apply its reply
    async fn deliver(h: &mut Harness) {
        let msg = h.rx.recv().await.unwrap();
        h.state.handle_message(msg);
    }

    fn screen(state: &mut TuiState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| state.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn search_result() -> AgentEnvelope {
        AgentEnvelope::ok(json!({
            "summary": "Found 2 pages",
            "items": [
                {"title": "Roadmap", "url": "https://notion.so/roadmap", "type": "page"},
                {"title": "Notes", "type": "page"}
            ]
        }))
    }

    #[tokio::test]
    async fn test_submit_disables_input_until_reply() {
        let mut h = harness(vec![Ok(AgentEnvelope::ok("Hello there"))], false);
        type_text(&mut h.state, "hi").await;
        h.state.handle_action(Action::Submit, 120).await;

        assert!(h.state.is_loading());
        assert!(!h.state.input.is_enabled());
        assert_eq!(h.state.input.content(), "");

        // Typing and submitting while sending does nothing
        type_text(&mut h.state, "more").await;
        h.state.handle_action(Action::Submit, 120).await;
        assert_eq!(h.state.chat.store().messages().len(), 1);

        deliver(&mut h).await;
        assert!(!h.state.is_loading());
        assert!(h.state.input.is_enabled());
        let messages = h.state.chat.store().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "Hello there");
    }

    #[tokio::test]
    async fn test_blank_submit_is_ignored() {
        let mut h = harness(vec![], false);
        type_text(&mut h.state, "   ").await;
        h.state.handle_action(Action::Submit, 120).await;
        assert!(!h.state.is_loading());
        assert!(h.state.chat.store().is_empty());
    }

    #[tokio::test]
    async fn test_failure_shows_banner_and_escape_dismisses() {
        let mut h = harness(vec![Err(Error::Network)], false);
        type_text(&mut h.state, "hi").await;
        h.state.handle_action(Action::Submit, 120).await;
        deliver(&mut h).await;

        assert!(h.state.banner().is_some());
        assert!(screen(&mut h.state, 100, 30).contains("Esc dismiss"));

        h.state.handle_action(Action::Escape, 120).await;
        assert!(h.state.banner().is_none());
        // The error message itself stays in the log
        assert!(h.state.chat.store().messages()[1].is_error);
    }

    #[tokio::test]
    async fn test_chip_submits_suggestion() {
        let mut h = harness(vec![Ok(AgentEnvelope::ok("Sure"))], false);
        h.state.handle_action(Action::Tab, 120).await;
        assert_eq!(h.state.focus, Focus::Chips);
        h.state.handle_action(Action::Right, 120).await;
        h.state.handle_action(Action::Submit, 120).await;

        assert_eq!(h.state.chat.store().messages()[0].content, SUGGESTIONS[1]);
        assert_eq!(h.state.focus, Focus::Input);
        deliver(&mut h).await;
    }

    #[tokio::test]
    async fn test_quick_action_fills_input() {
        let mut h = harness(vec![], false);
        h.state.set_focus(Focus::Sidebar);
        h.state.handle_action(Action::Down, 120).await;
        h.state.handle_action(Action::Submit, 120).await;

        assert_eq!(h.state.input.content(), QUICK_ACTIONS[1].prompt);
        assert_eq!(h.state.focus, Focus::Input);
        assert!(h.state.chat.store().is_empty());
    }

    #[tokio::test]
    async fn test_history_refills_input() {
        let mut h = harness(vec![Ok(AgentEnvelope::ok("done"))], false);
        type_text(&mut h.state, "list pages").await;
        h.state.handle_action(Action::Submit, 120).await;
        deliver(&mut h).await;

        h.state.set_focus(Focus::Sidebar);
        h.state.sidebar.selected = QUICK_ACTIONS.len();
        h.state.handle_action(Action::Submit, 120).await;
        assert_eq!(h.state.input.content(), "list pages");
    }

    #[tokio::test]
    async fn test_history_pick_is_noop_over_samples() {
        let mut h = harness(vec![], true);
        assert_eq!(h.state.history_len(), 2);

        h.state.set_focus(Focus::Sidebar);
        h.state.sidebar.selected = QUICK_ACTIONS.len();
        h.state.handle_action(Action::Submit, 120).await;
        assert_eq!(h.state.input.content(), "");
        assert_eq!(h.state.focus, Focus::Sidebar);
    }

    #[tokio::test]
    async fn test_sample_toggle_switches_displayed_log() {
        let mut h = harness(vec![], false);
        assert!(h.state.displayed().is_empty());
        assert!(screen(&mut h.state, 100, 30).contains("Welcome to Notion Power Agent"));

        h.state.handle_action(Action::ToggleSampleData, 120).await;
        assert_eq!(h.state.displayed().len(), 4);
        let out = screen(&mut h.state, 100, 40);
        assert!(out.contains("Sample Data: On"));
        assert!(!out.contains("Welcome to"));

        h.state.handle_action(Action::ToggleSampleData, 120).await;
        assert!(h.state.displayed().is_empty());
    }

    #[tokio::test]
    async fn test_copy_selected_item() {
        let mut h = harness(vec![Ok(search_result())], false);
        type_text(&mut h.state, "search").await;
        h.state.handle_action(Action::Submit, 120).await;
        deliver(&mut h).await;

        assert!(h.state.focusable().contains(&Focus::Results));
        h.state.set_focus(Focus::Results);
        h.state.handle_action(Action::Char('c'), 120).await;
        h.state.handle_action(Action::Down, 120).await;
        h.state.handle_action(Action::Char('c'), 120).await;

        assert_eq!(
            *h.clipboard.written.lock(),
            vec!["https://notion.so/roadmap".to_string(), "Notes".to_string()]
        );
        let agent_id = h.state.chat.store().messages()[1].id.clone();
        let current = h.state.copy.current(Instant::now()).cloned();
        assert_eq!(current, Some(kite_chat::ItemKey::new(agent_id, 1)));
        assert!(screen(&mut h.state, 120, 40).contains("copied"));
    }

    #[tokio::test]
    async fn test_clear_resets_log_and_focus() {
        let mut h = harness(vec![Ok(search_result())], false);
        type_text(&mut h.state, "search").await;
        h.state.handle_action(Action::Submit, 120).await;
        deliver(&mut h).await;
        h.state.set_focus(Focus::Results);

        h.state.handle_action(Action::Clear, 120).await;
        assert!(h.state.chat.store().is_empty());
        assert_eq!(h.state.focus, Focus::Input);
    }

    #[tokio::test]
    async fn test_focus_cycle_skips_hidden_panes() {
        let mut h = harness(vec![], false);
        h.state.handle_action(Action::Unknown, 120).await;
        assert_eq!(h.state.focusable(), vec![Focus::Input, Focus::Chips, Focus::Sidebar]);

        h.state.handle_action(Action::ToggleSidebar, 120).await;
        assert_eq!(h.state.focusable(), vec![Focus::Input, Focus::Chips]);

        h.state.handle_action(Action::BackTab, 120).await;
        assert_eq!(h.state.focus, Focus::Chips);
        h.state.handle_action(Action::Tab, 120).await;
        assert_eq!(h.state.focus, Focus::Input);
    }

    #[tokio::test]
    async fn test_narrow_terminal_keeps_focus_off_sidebar() {
        let mut h = harness(vec![], false);
        h.state.handle_action(Action::Tab, 120).await;
        h.state.handle_action(Action::Tab, 120).await;
        assert_eq!(h.state.focus, Focus::Sidebar);

        // Below the sidebar threshold the pane is not drawn and not reachable
        assert!(!screen(&mut h.state, 60, 30).contains("QUICK ACTIONS"));
        assert_eq!(h.state.focus, Focus::Input);
        assert_eq!(h.state.focusable(), vec![Focus::Input, Focus::Chips]);

        h.state.handle_action(Action::Tab, 60).await;
        h.state.handle_action(Action::Tab, 60).await;
        assert_eq!(h.state.focus, Focus::Input);
    }

    #[tokio::test]
    async fn test_long_history_keeps_selection_visible() {
        let replies = (0..12).map(|i| Ok(AgentEnvelope::ok(format!("done {i}")))).collect();
        let mut h = harness(replies, false);
        for i in 0..12 {
            type_text(&mut h.state, &format!("prompt {i:02}")).await;
            h.state.handle_action(Action::Submit, 120).await;
            deliver(&mut h).await;
        }

        h.state.set_focus(Focus::Sidebar);
        h.state.sidebar.selected = QUICK_ACTIONS.len() + 11;
        let out = screen(&mut h.state, 120, 30);
        assert!(out.contains("› prompt 11"));
        assert!(out.contains("HISTORY"));
    }

    #[tokio::test]
    async fn test_loading_screen_shows_spinner_and_status() {
        let mut h = harness(vec![Ok(AgentEnvelope::ok("ok"))], false);
        type_text(&mut h.state, "hello").await;
        h.state.handle_action(Action::Submit, 120).await;

        let out = screen(&mut h.state, 110, 30);
        assert!(out.contains("Notion Power Agent is working..."));
        assert!(out.contains("Processing request..."));
        assert!(!out.contains("What can you help me with?"));

        deliver(&mut h).await;
        let out = screen(&mut h.state, 110, 30);
        assert!(out.contains("Ready"));
        assert!(out.contains("What can you help me with?"));
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut h = harness(vec![], false);
        assert!(!h.state.handle_action(Action::Quit, 120).await);
        assert!(!h.state.handle_action(Action::Interrupt, 120).await);
    }
}
