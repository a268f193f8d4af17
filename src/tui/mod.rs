//! Terminal lifecycle and the TUI event loop.

mod app;
mod board;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gomoku_tui::session::SessionSync;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{Duration, sleep};
use tracing::{error, info};

use app::App;

/// Runs the TUI against the given ordered server candidates until the user
/// quits. Restores the terminal on exit, also on error.
pub async fn run_tui(candidates: Vec<String>) -> Result<()> {
    let sync = SessionSync::new();
    info!(player_id = %sync.player_id(), "Starting Gomoku TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Probe in the background so the first frame draws immediately.
    {
        let sync = sync.clone();
        let candidates = candidates.clone();
        tokio::spawn(async move {
            let _ = sync.discover(&candidates).await;
        });
    }

    let res = run_event_loop(&mut terminal, &sync, candidates).await;

    sync.stop();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Event loop error");
        eprintln!("Error: {:?}", err);
    }
    Ok(())
}

/// Draw, poll input with a short timeout, repeat.
async fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    sync: &SessionSync,
    candidates: Vec<String>,
) -> Result<()> {
    let mut app = App::new(sync.clone(), candidates);

    loop {
        let state = sync.state();
        terminal.draw(|f| app.render(f, &state))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Skip key release events (crossterm fires both press and release).
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    app.handle_key(key, &state);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, &state),
                _ => {}
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        sleep(Duration::from_millis(10)).await;
    }
}
