//! Terminal UI for the tournament platform.
//!
//! The loop owns the [`AppState`], the header, and the mounted page. Key
//! presses mutate them directly; completions of spawned requests arrive on
//! one channel and are routed to whichever controller owns their scope.

use crate::views::{self, modal::JoinInput};
use anyhow::Result;
use dlst::api::ApiClient;
use dlst::forms::{AuthMode, FormError};
use dlst::pages::{Container, Content, Header, PageContext, PageEvent};
use dlst::state::{AppState, Page};
use dlst::tasks::{Envelope, EventReceiver};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::Paragraph,
};
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Append or delete one character of a text input.
fn edit(buffer: Option<&mut String>, code: KeyCode) {
    let Some(buffer) = buffer else {
        return;
    };
    match code {
        KeyCode::Char(c) => buffer.push(c),
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => {}
    }
}

fn cycle(focus: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (focus + 1) % len
    } else {
        (focus + len - 1) % len
    }
}

fn log_rejected(form: &str, result: Result<(), FormError>) {
    if let Err(err) = result {
        tracing::debug!(form, %err, "submission not sent");
    }
}

/// TUI App state
pub struct TuiApp {
    ctx: PageContext,
    rx: EventReceiver<PageEvent>,
    state: AppState,
    /// Store revision the mounted page was last reconciled against
    synced_revision: u64,
    header: Header,
    content: Content,
    /// Focused input of the open modal
    focus: usize,
    rules_scroll: u16,
    tick: usize,
    should_quit: bool,
}

impl TuiApp {
    /// Must be called inside a tokio runtime: the first page mounts, and
    /// starts fetching, immediately.
    pub fn new(api: ApiClient, dismiss_delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let ctx = PageContext::new(api, tx).with_dismiss_delay(dismiss_delay);
        let state = AppState::new();
        let header = Header::new(&ctx);
        let content = Content::for_page(state.current_page(), &ctx);
        Self {
            synced_revision: state.revision(),
            ctx,
            rx,
            state,
            header,
            content,
            focus: 0,
            rules_scroll: 0,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Remount the page if the store says a different one is current.
    fn sync(&mut self) {
        if self.state.revision() == self.synced_revision {
            return;
        }
        self.synced_revision = self.state.revision();
        let page = self.state.current_page();
        if self.content.page() != page {
            tracing::info!(%page, "mounting page");
            self.content = Content::for_page(page, &self.ctx);
            self.focus = 0;
            self.rules_scroll = 0;
        }
    }

    /// Hand a completion to the controller that spawned it. Completions
    /// from torn-down scopes are dropped.
    pub fn route(&mut self, envelope: Envelope<PageEvent>) {
        if self.header.owns(&envelope) {
            self.header.handle(envelope.event, &mut self.state);
        } else if self.content.owns(&envelope) {
            self.content.handle(envelope.event, &mut self.state);
        } else {
            tracing::trace!(scope = ?envelope.scope, "dropping stale completion");
        }
        self.sync();
    }

    /// Wait for the next completion and route it. Returns `false` if the
    /// channel is closed.
    pub async fn next_event(&mut self) -> bool {
        match self.rx.recv().await {
            Some(envelope) => {
                self.route(envelope);
                true
            }
            None => false,
        }
    }

    fn drain_events(&mut self) {
        while let Ok(envelope) = self.rx.try_recv() {
            self.route(envelope);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.header.has_modal() {
            self.auth_key(key);
        } else if self.content.has_modal() {
            self.page_modal_key(key);
        } else {
            self.navigation_key(key);
        }
        self.sync();
    }

    fn navigation_key(&mut self, key: KeyEvent) {
        let current = self.state.current_page();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.header.navigate(&mut self.state, current.next()),
            KeyCode::BackTab => self.header.navigate(&mut self.state, current.prev()),
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(page) = Page::from_digit(c) {
                    self.header.navigate(&mut self.state, page);
                }
            }
            KeyCode::Char('r') => {
                self.header.open_auth(AuthMode::Register);
                self.focus = 0;
            }
            KeyCode::Char('l') => {
                self.header.open_auth(AuthMode::Login);
                self.focus = 0;
            }
            code => self.page_key(code),
        }
    }

    fn page_key(&mut self, code: KeyCode) {
        match &mut self.content {
            Content::AnnouncementsPage(page) => {
                if matches!(code, KeyCode::Char('s') | KeyCode::Enter) {
                    page.start_now(&mut self.state);
                } else if code == KeyCode::Esc {
                    self.should_quit = true;
                }
            }
            Content::TournamentsPage(page) if page.detail().is_some() => match code {
                KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => page.close_detail(),
                KeyCode::Char('j') => {
                    page.open_join();
                    self.focus = 0;
                }
                _ => {}
            },
            Content::TournamentsPage(page) => match code {
                KeyCode::Up => page.move_cursor(false),
                KeyCode::Down => page.move_cursor(true),
                KeyCode::Enter => page.view_selected(),
                KeyCode::Char('j') => {
                    page.open_join();
                    self.focus = 0;
                }
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            Content::RulesPage(page) => match code {
                KeyCode::Up => self.rules_scroll = self.rules_scroll.saturating_sub(1),
                KeyCode::Down => self.rules_scroll = self.rules_scroll.saturating_add(1),
                KeyCode::Char(c) => {
                    if let Some(kind) = dlst::entities::ReportKind::ALL
                        .into_iter()
                        .find(|k| views::rules::report_key(*k) == c)
                    {
                        page.open_report(kind);
                        self.focus = 0;
                    }
                }
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            Content::StandingsPage(_) => {
                if code == KeyCode::Esc {
                    self.should_quit = true;
                }
            }
        }
    }

    fn auth_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let Some(form) = self.header.auth_mut() else {
            return;
        };
        let fields = form.mode().fields();
        match key.code {
            KeyCode::Esc => self.header.close_auth(),
            KeyCode::Char('l') if ctrl => {
                form.toggle_mode();
                self.focus = 0;
            }
            KeyCode::Tab | KeyCode::Down => self.focus = cycle(self.focus, fields.len(), true),
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = cycle(self.focus, fields.len(), false)
            }
            KeyCode::Enter => log_rejected("auth", self.header.submit_auth()),
            code @ (KeyCode::Char(_) | KeyCode::Backspace) if !ctrl => {
                if let Some(field) = fields.get(self.focus) {
                    edit(form.field_mut(*field), code);
                }
            }
            _ => {}
        }
    }

    fn page_modal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match &mut self.content {
            Content::TournamentsPage(page) => {
                let Some(flow) = page.join_mut() else {
                    return;
                };
                let creating = flow.is_creating_team();
                let inputs = views::modal::join_inputs(flow);
                match key.code {
                    KeyCode::Esc if creating => {
                        flow.cancel_team_creation();
                        self.focus = 0;
                    }
                    KeyCode::Esc => page.close_join(),
                    KeyCode::Char('t') if ctrl => {
                        flow.start_team_creation();
                        self.focus = 0;
                    }
                    KeyCode::Char('b') if ctrl => {
                        flow.cancel_team_creation();
                        self.focus = 0;
                    }
                    KeyCode::Tab | KeyCode::Down => {
                        self.focus = cycle(self.focus, inputs.len(), true)
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        self.focus = cycle(self.focus, inputs.len(), false)
                    }
                    KeyCode::Left | KeyCode::Right
                        if inputs.get(self.focus) == Some(&JoinInput::Team) =>
                    {
                        page.cycle_team(key.code == KeyCode::Right);
                    }
                    KeyCode::Enter if creating => log_rejected("team", page.submit_new_team()),
                    KeyCode::Enter => log_rejected("join", page.submit_join()),
                    code @ (KeyCode::Char(_) | KeyCode::Backspace) if !ctrl => {
                        if let Some(JoinInput::Field(field)) = inputs.get(self.focus) {
                            edit(flow.field_mut(*field), code);
                        }
                    }
                    _ => {}
                }
            }
            Content::RulesPage(page) => {
                let Some(form) = page.report_mut() else {
                    return;
                };
                let fields = views::modal::REPORT_FIELDS;
                match key.code {
                    KeyCode::Esc => page.close_report(),
                    KeyCode::Tab | KeyCode::Down => {
                        self.focus = cycle(self.focus, fields.len(), true)
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        self.focus = cycle(self.focus, fields.len(), false)
                    }
                    KeyCode::Enter => log_rejected("report", page.submit_report()),
                    code @ (KeyCode::Char(_) | KeyCode::Backspace) if !ctrl => {
                        if let Some(field) = fields.get(self.focus) {
                            edit(form.field_mut(*field), code);
                        }
                    }
                    _ => {}
                }
            }
            Content::AnnouncementsPage(_) | Content::StandingsPage(_) => {}
        }
    }

    /// Render the status bar at the bottom
    fn draw_help_bar(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let help_message = vec![
            "Tab".bold().white(),
            "/".into(),
            "1-4".bold().white(),
            " switch page, ".into(),
            "r".bold().white(),
            " register, ".into(),
            "l".bold().white(),
            " login, ".into(),
            "q".bold().white(),
            " to exit".into(),
        ];
        frame.render_widget(Paragraph::new(Line::from(help_message)), area);
    }

    /// Main draw function - orchestrates rendering of all UI components
    pub fn draw(&self, frame: &mut Frame) {
        let window = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Page
            Constraint::Length(1), // Help bar
        ]);
        let [header_area, page_area, help_area] = window.areas(frame.area());

        views::header::draw(frame, header_area, &self.state);
        match &self.content {
            Content::AnnouncementsPage(page) => views::announcements::draw(frame, page_area, page),
            Content::TournamentsPage(page) => views::tournaments::draw(frame, page_area, page),
            Content::StandingsPage(page) => {
                views::standings::draw(frame, page_area, page, self.tick)
            }
            Content::RulesPage(_) => views::rules::draw(frame, page_area, self.rules_scroll),
        }
        self.draw_help_bar(frame, help_area);

        // Modal overlay, if any
        if let Some(form) = self.header.auth() {
            views::modal::draw_auth(frame, form, self.focus, self.tick);
            return;
        }
        match &self.content {
            Content::TournamentsPage(page) => {
                if let Some(flow) = page.join() {
                    views::modal::draw_join(frame, flow, page.teams(), self.focus, self.tick);
                }
            }
            Content::RulesPage(page) => {
                if let Some(form) = page.report() {
                    views::modal::draw_report(frame, form, self.focus, self.tick);
                }
            }
            Content::AnnouncementsPage(_) | Content::StandingsPage(_) => {}
        }
    }

    /// Run the TUI application
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            // Check for keyboard input
            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            // Apply finished requests
            self.drain_events();
            self.tick = self.tick.wrapping_add(1);

            if self.should_quit {
                tracing::info!("exiting");
                return Ok(());
            }
        }
    }
}
