//! Terminal User Interface Module
//!
//! Interactive inspector built with Ratatui.
//!
//! # Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Weaviate Spy  http://localhost:8000  ● Connected               │
//! ├──────────────┬──────────────────────────────────────────────────┤
//! │ Collections  │ ┌ Mode ──┐┌ Query ─────────────────┐┌ Certainty ┐ │
//! │ ▶ Article    │ │Semantic││ vector databases       ││ 0.65      │ │
//! │   Author     │ └────────┘└────────────────────────┘└───────────┘ │
//! │              │ ┌ Article ─────────────────────────────────────┐ │
//! │              │ │ ID     title      tags        Score           │ │
//! │              │ │ 6f1c.. Hello      [a] [b]     ██████░░ 0.81   │ │
//! │              │ └───────────────────────────────────────────────┘ │
//! │              │  Total: 42 items │ Page 1/3 │ Showing 1-20        │
//! ├──────────────┴──────────────────────────────────────────────────┤
//! │ Ready │ [Tab] Focus [m] Mode [F2] Schema [Ctrl+Q] Quit [F1] Help │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, Focus, View};
pub use event::{AppAction, EventHandler};

use crate::api::SpyApi;
use crate::config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: Config, api: Arc<dyn SpyApi>) -> anyhow::Result<()> {
    info!(api_url = %config.api_url, "Starting TUI mode");

    let mut terminal = init_terminal()?;
    let mut app = App::new(config, api);
    let mut events = EventHandler::new(std::time::Duration::from_millis(100));

    app.load_schema();
    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            Some(action) = events.next() => app.handle_action(action),
            Some(event) = app.next_event() => app.handle_event(event),
            else => break,
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
