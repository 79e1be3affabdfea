use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic::query;
use crate::state::{AppState, FetchRequest, Focus};

/// What: Handle a key on the list screen.
///
/// Output:
/// - `true` when the key requests exit.
///
/// Details:
/// - With the search box focused every printable key is text; shortcuts apply only
///   to the results list.
pub(super) fn handle_list_key(
    ke: KeyEvent,
    app: &mut AppState,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
) -> bool {
    match app.focus {
        Focus::Search => {
            handle_search_key(ke, app);
            false
        }
        Focus::Results => handle_results_key(ke, app, fetch_tx),
    }
}

fn handle_search_key(ke: KeyEvent, app: &mut AppState) {
    match ke.code {
        KeyCode::Char(ch) if !ke.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.push(ch);
            query::on_input_changed(app, Instant::now());
        }
        KeyCode::Backspace => {
            if app.input.pop().is_some() {
                query::on_input_changed(app, Instant::now());
            }
        }
        KeyCode::Enter => {
            query::apply_query_now(app);
            app.focus = Focus::Results;
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::Esc => app.focus = Focus::Results,
        _ => {}
    }
}

fn move_selection(app: &mut AppState, delta: isize) {
    let shown = app.view.visible_count;
    if shown == 0 {
        return;
    }
    let next = app.selected.saturating_add_signed(delta).min(shown - 1);
    app.selected = next;
    app.list_state.select(Some(next));
}

fn handle_results_key(
    ke: KeyEvent,
    app: &mut AppState,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
) -> bool {
    match ke.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab | KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Up | KeyCode::Char('k') => {
            if app.selected == 0 {
                app.focus = Focus::Search;
            } else {
                move_selection(app, -1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => move_selection(app, 1),
        KeyCode::PageUp => move_selection(app, -10),
        KeyCode::PageDown => move_selection(app, 10),
        KeyCode::Home | KeyCode::Char('g') => move_selection(app, isize::MIN),
        KeyCode::End | KeyCode::Char('G') => move_selection(app, isize::MAX),
        KeyCode::Enter => {
            if let Some(id) = app.selected_product().map(|p| p.id) {
                query::open_detail(app, id, fetch_tx);
            }
        }
        KeyCode::Char('f') => {
            if let Some(id) = app.selected_product().map(|p| p.id) {
                query::toggle_favorite(app, id);
            }
        }
        KeyCode::Char('F') => {
            app.favorites.clear();
            query::refresh_view(app);
            app.toast_message = Some("Favorites cleared".to_string());
        }
        KeyCode::Char('c') => query::cycle_category(app, true),
        KeyCode::Char('C') => query::cycle_category(app, false),
        KeyCode::Char('s') => query::cycle_sort(app),
        KeyCode::Char('o') => query::toggle_favorites_only(app),
        KeyCode::Char('m') | KeyCode::Char(' ') => {
            query::load_more(app);
        }
        KeyCode::Char('x') => query::reset_filters(app),
        KeyCode::Char('r') => query::request_products(app, fetch_tx),
        _ => {}
    }
    false
}
