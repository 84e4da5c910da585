//! Event Handling
//!
//! Turns crossterm key events and a timer into [`AppAction`]s. Keys that
//! mean different things depending on focus (letters, arrows, backspace) are
//! passed through as [`AppAction::Input`] and interpreted by the app.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Quit,
    ForceQuit,
    /// Enter: open collection / run query / show row detail
    Submit,
    ToggleHelp,
    /// Switch between the browser and the schema overview
    ToggleSchema,
    /// Property list of the selected collection
    ShowProperties,
    /// Close popups
    Escape,
    NextFocus,
    PrevFocus,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    /// Anything focus-dependent
    Input(KeyEvent),
    /// Redraw timer
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = Self::map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Wait for the next action
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }

    fn map_event(event: Event) -> Option<AppAction> {
        match event {
            Event::Key(key) => map_key_event(key),
            _ => None,
        }
    }
}

/// Map a key event to an app action. Release and repeat events are ignored.
pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),
        (_, KeyCode::BackTab) => Some(AppAction::PrevFocus),

        (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc => Some(AppAction::Escape),
            KeyCode::Enter => Some(AppAction::Submit),
            KeyCode::F(1) => Some(AppAction::ToggleHelp),
            KeyCode::F(2) => Some(AppAction::ToggleSchema),
            KeyCode::F(3) => Some(AppAction::ShowProperties),
            KeyCode::Tab => Some(AppAction::NextFocus),
            KeyCode::Up => Some(AppAction::MoveUp),
            KeyCode::Down => Some(AppAction::MoveDown),
            KeyCode::PageUp => Some(AppAction::PrevPage),
            KeyCode::PageDown => Some(AppAction::NextPage),
            _ => Some(AppAction::Input(key)),
        },

        _ => Some(AppAction::Input(key)),
    }
}
