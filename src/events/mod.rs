//! Event handling layer for the TUI.
//!
//! `handle_event` routes key presses by screen; list and detail keys live in
//! their own submodules.

use crossterm::event::{Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::state::{AppState, FetchRequest, Screen};

mod detail;
mod list;

/// What: Dispatch a single terminal event and mutate the [`AppState`].
///
/// Inputs:
/// - `ev`: Terminal event
/// - `app`: Mutable application state
/// - `fetch_tx`: Channel to the fetch worker
///
/// Output:
/// - `true` to signal the application should exit; otherwise `false`.
///
/// Details:
/// - Only key presses are handled; releases and repeats on some terminals are ignored.
/// - `Ctrl+C` exits from anywhere.
pub fn handle_event(
    ev: CEvent,
    app: &mut AppState,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
) -> bool {
    let CEvent::Key(ke) = ev else {
        return false;
    };
    if ke.kind != KeyEventKind::Press {
        return false;
    }
    if ke.modifiers.contains(KeyModifiers::CONTROL) && ke.code == KeyCode::Char('c') {
        app.should_quit = true;
        return true;
    }
    app.toast_message = None;
    let exit = match app.screen {
        Screen::List => list::handle_list_key(ke, app, fetch_tx),
        Screen::Detail => detail::handle_detail_key(ke, app, fetch_tx),
    };
    if exit {
        app.should_quit = true;
    }
    exit
}
