//! Rendering of the list and detail screens.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{AppState, Screen};

mod detail;
mod list;

pub use detail::nav_label;

/// What: Draw the whole frame for the current screen.
///
/// Inputs:
/// - `f`: Frame to draw into
/// - `app`: Application state; mutable because the list widget keeps scroll state
///
/// Details:
/// - The bottom line shows the toast message when present, otherwise key hints.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(f.area());
    match app.screen {
        Screen::List => list::render_list(f, app, chunks[0]),
        Screen::Detail => detail::render_detail(f, app, chunks[0]),
    }
    render_status_line(f, app, chunks[1]);
}

fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.toast_message {
        Some(msg) => Line::from(Span::styled(
            msg.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            key_hints(app),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn key_hints(app: &AppState) -> &'static str {
    match (app.screen, app.focus) {
        (Screen::Detail, _) if app.detail.quantity_input.is_some() => {
            "0-9 type quantity  Backspace delete  Enter set  Esc cancel"
        }
        (Screen::Detail, _) => {
            "←/h prev  →/l next  f favorite  +/- or 0-9 qty  a add to cart  b buy now  r retry  Esc back"
        }
        (Screen::List, crate::state::Focus::Search) => {
            "type to search  Enter apply  Tab results  Ctrl+C quit"
        }
        (Screen::List, crate::state::Focus::Results) => {
            "j/k move  Enter open  f fav  c/C category  s sort  o favs only  m more  x reset  r reload  / search  q quit"
        }
    }
}

#[cfg(test)]
pub(crate) fn render_to_string(app: &mut AppState, width: u16, height: u16) -> String {
    use ratatui::{Terminal, backend::TestBackend};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal.draw(|f| ui(f, app)).expect("draw");
    let buf = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
