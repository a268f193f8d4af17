//! Application state: cursor, transient notices, and input handling.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use gomoku_tui::session::{Phase, SessionState, SessionSync};
use gomoku_tui::status::TurnStatus;
use gomoku_tui::types::BOARD_SIZE;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};
use tracing::{debug, warn};

use super::board;

/// How long a transient notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    sync: SessionSync,
    candidates: Vec<String>,
    cursor: (u16, u16),
    grid: Rect,
    notice: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    /// Creates the application around a synchronizer and the candidate
    /// server list used for manual discovery retries.
    pub fn new(sync: SessionSync, candidates: Vec<String>) -> Self {
        Self {
            sync,
            candidates,
            cursor: (BOARD_SIZE / 2, BOARD_SIZE / 2),
            grid: Rect::default(),
            notice: None,
            should_quit: false,
        }
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draws one frame from a cloned session state.
    pub fn render(&mut self, f: &mut Frame, state: &SessionState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.size());

        let status = Paragraph::new(self.status_text(state)).style(Style::default().fg(Color::Cyan));
        f.render_widget(status, chunks[0]);

        self.grid = board::render_board(f, chunks[1], state.board_view(), self.cursor);

        let help = Paragraph::new("f: find game  arrows/hjkl: move  enter/space: place  q: quit")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(help, chunks[2]);
    }

    /// Handles a key press (release events are filtered by the caller).
    pub fn handle_key(&mut self, key: KeyEvent, state: &SessionState) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('f') => self.start_pressed(state),
            KeyCode::Left | KeyCode::Char('h') => self.cursor.0 = self.cursor.0.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor.0 = (self.cursor.0 + 1).min(BOARD_SIZE - 1)
            }
            KeyCode::Up | KeyCode::Char('k') => self.cursor.1 = self.cursor.1.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor.1 = (self.cursor.1 + 1).min(BOARD_SIZE - 1)
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place_at(self.cursor.0, self.cursor.1, state)
            }
            _ => {}
        }
    }

    /// Handles a mouse event: left click places at the clicked cell.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, state: &SessionState) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
            && let Some((col, row)) = board::hit_test(self.grid, mouse.column, mouse.row)
        {
            self.cursor = (col, row);
            self.place_at(col, row, state);
        }
    }

    /// The start button: discover when idle, matchmake when a server is
    /// bound or the last game finished.
    fn start_pressed(&mut self, state: &SessionState) {
        match state.phase() {
            Phase::Idle => {
                let sync = self.sync.clone();
                let candidates = self.candidates.clone();
                tokio::spawn(async move {
                    let _ = sync.discover(&candidates).await;
                });
            }
            Phase::Ready | Phase::Finished => {
                let sync = self.sync.clone();
                tokio::spawn(async move {
                    let _ = sync.find_game().await;
                });
            }
            phase => debug!(phase = ?phase, "Start pressed in inert phase"),
        }
    }

    /// Attempts a placement at `(col, row)`.
    ///
    /// The UI gate mirrors the synchronizer's own gate: out of turn or with
    /// no game bound, the attempt never leaves the process and a notice is
    /// shown instead.
    fn place_at(&mut self, col: u16, row: u16, state: &SessionState) {
        if state.game_id().is_none() || !state.is_my_turn() {
            self.set_notice("Can't place now");
            return;
        }
        let sync = self.sync.clone();
        tokio::spawn(async move {
            if let Err(e) = sync.place_move(col, row).await {
                warn!(error = %e, "Move submission failed");
            }
        });
    }

    fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some((text.into(), Instant::now()));
    }

    /// Status-line text: a fresh notice wins, otherwise the session state.
    fn status_text(&mut self, state: &SessionState) -> String {
        if let Some((text, at)) = &self.notice {
            if at.elapsed() < NOTICE_TTL {
                return text.clone();
            }
            self.notice = None;
        }
        status_line(state)
    }
}

/// Maps the session state onto the user-facing status line.
pub fn status_line(state: &SessionState) -> String {
    let stone = state
        .role()
        .map(|r| r.stone_label())
        .unwrap_or("black");

    let mut text = match state.phase() {
        Phase::Idle => "Press 'f' to look for a server".to_string(),
        Phase::Discovering => "Looking for a server...".to_string(),
        Phase::Ready => "Server connected. Press 'f' to find a game".to_string(),
        Phase::Searching => "Searching for an opponent...".to_string(),
        Phase::InGame | Phase::Finished => match state.turn() {
            Some(TurnStatus::WaitingForOpponent) => "Waiting for an opponent...".to_string(),
            Some(TurnStatus::MyTurn) => format!("Your turn ({stone})"),
            Some(TurnStatus::OpponentTurn) => format!("Opponent's turn ({stone})"),
            Some(TurnStatus::Won) => "You win! Press 'f' for a new game".to_string(),
            Some(TurnStatus::Lost) => "You lose... Press 'f' for a new game".to_string(),
            Some(TurnStatus::Drawn) => "Draw. Press 'f' for a new game".to_string(),
            None => "Game starting...".to_string(),
        },
    };

    if let Some(err) = state.last_error() {
        text = format!("{text} [{err}]");
    }
    text
}
