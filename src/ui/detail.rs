use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::logic::navigation::DetailNavigation;
use crate::logic::purchase::subtotal;
use crate::state::{AppState, LoadStatus, ProductRecord};
use crate::util::{format_price, format_rate, stars};

/// What: Text of the detail pagination bar.
///
/// Output:
/// - `"Product {position} of {total}"`; position shows as 1 before it is known and an
///   empty list shows the total as `—`.
pub fn nav_label(nav: &DetailNavigation) -> String {
    let position = if nav.position == 0 { 1 } else { nav.position };
    let total = if nav.total == 0 {
        "—".to_string()
    } else {
        nav.total.to_string()
    };
    format!("Product {position} of {total}")
}

pub(super) fn render_detail(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Product ");

    let body: Vec<Line> = match (&app.detail.status, app.detail.product.as_ref()) {
        (LoadStatus::Invalid(msg), _) => vec![
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
            Line::from("Esc: back to products"),
        ],
        (LoadStatus::Failed(msg), _) => vec![
            Line::from(Span::styled(
                "Couldn't load product",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(msg.clone()),
            Line::from(""),
            Line::from("r: retry   Esc: back to products"),
        ],
        (LoadStatus::Ready, Some(p)) => product_lines(app, p),
        (LoadStatus::Ready, None) => vec![Line::from("Product not found")],
        _ => vec![Line::from("Loading product…")],
    };
    f.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: false }).block(block),
        chunks[0],
    );

    let nav = &app.detail.navigation;
    let mut bar = vec![Span::raw(format!(" {}", nav_label(nav)))];
    if let Some(prev) = nav.prev_id {
        bar.push(Span::styled(
            format!("   ← #{prev}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(next) = nav.next_id {
        bar.push(Span::styled(
            format!("   #{next} →"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(bar)), chunks[1]);
}

fn product_lines(app: &AppState, p: &ProductRecord) -> Vec<Line<'static>> {
    let favorite = if app.favorites.is_favorite(p.id) {
        Span::styled("♥ Saved", Style::default().fg(Color::Magenta))
    } else {
        Span::styled("♡ Not saved", Style::default().fg(Color::DarkGray))
    };
    let qty = app.detail.quantity;
    vec![
        Line::from(Span::styled(
            p.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            p.category.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format_price(p.price), Style::default().fg(Color::Yellow)),
            Span::raw("   "),
            Span::raw(stars(p.rate_or_zero())),
            Span::raw(format!(
                " {} ({} reviews)",
                format_rate(p.rating.as_ref().map(|r| r.rate)),
                p.review_count()
            )),
            Span::raw("   "),
            favorite,
        ]),
        Line::from(""),
        Line::from(p.description.clone()),
        Line::from(""),
        match &app.detail.quantity_input {
            Some(buf) => Line::from(vec![
                Span::styled(format!("Quantity: {buf}_"), Style::default().fg(Color::Yellow)),
                Span::styled("   Enter set  Esc cancel", Style::default().fg(Color::DarkGray)),
            ]),
            None => Line::from(format!(
                "Quantity: {qty}   Subtotal: {}",
                format_price(subtotal(p.price, qty))
            )),
        },
    ]
}
