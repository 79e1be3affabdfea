use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::favorites::is_favorite;
use crate::logic::summary::average_rating;
use crate::state::{AppState, Focus, LoadStatus, ProductRecord};
use crate::util::{format_price, format_rate, stars};

fn focused_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

/// What: Draw the search box, the filter summary and the product list.
///
/// Details:
/// - A pending (not yet applied) search is marked with `…` after the input.
pub(super) fn render_list(f: &mut Frame, app: &mut AppState, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let mut input = vec![Span::raw(app.input.clone())];
    if app.input_dirty {
        input.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(
        Paragraph::new(Line::from(input))
            .block(focused_block(" Search ", app.focus == Focus::Search)),
        chunks[0],
    );

    f.render_widget(Paragraph::new(filter_summary(app)), chunks[1]);

    let body = chunks[2];
    let block = focused_block(" Products ", app.focus == Focus::Results);
    match &app.list_status {
        LoadStatus::Idle | LoadStatus::Loading => {
            f.render_widget(Paragraph::new("Loading products…").block(block), body);
        }
        LoadStatus::Failed(msg) | LoadStatus::Invalid(msg) => {
            let text = vec![
                Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
                Line::from("Press r to retry."),
            ];
            f.render_widget(
                Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
                body,
            );
        }
        LoadStatus::Ready if app.view.is_empty() => {
            f.render_widget(
                Paragraph::new("No products match. Press x to reset filters.").block(block),
                body,
            );
        }
        LoadStatus::Ready => {
            let favorites = app.favorites.favorites();
            let items: Vec<ListItem> = app
                .view
                .shown()
                .iter()
                .map(|p| ListItem::new(product_line(p, is_favorite(favorites, p.id))))
                .collect();
            let list = List::new(items).block(block).highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
            f.render_stateful_widget(list, body, &mut app.list_state);
        }
    }

    f.render_widget(Paragraph::new(paging_line(app)), chunks[3]);
}

fn product_line(p: &ProductRecord, favorite: bool) -> Line<'static> {
    let heart = if favorite { "♥ " } else { "  " };
    let price = format!("{:>10} ", format_price(p.price));
    Line::from(vec![
        Span::styled(heart, Style::default().fg(Color::Magenta)),
        Span::styled(price, Style::default().fg(Color::Yellow)),
        Span::raw(format!("{} ", stars(p.rate_or_zero()))),
        Span::raw(p.title.clone()),
        Span::styled(format!("  [{}]", p.category), Style::default().fg(Color::DarkGray)),
    ])
}

fn filter_summary(app: &AppState) -> Line<'static> {
    let c = &app.catalog;
    Line::from(vec![
        Span::raw(format!(" Category: {}", c.category)),
        Span::raw(format!("  Sort: {}", c.sort.label())),
        Span::raw(format!(
            "  Favorites only: {}",
            if c.favorites_only { "on" } else { "off" }
        )),
        Span::raw(format!("  Saved: {}", app.favorites.favorites().len())),
        Span::raw(format!(
            "  Avg rating: {}",
            format_rate(Some(average_rating(&app.products)))
        )),
    ])
}

/// "Showing 8 of 10" plus a load-more hint while more pages exist.
fn paging_line(app: &AppState) -> String {
    let v = &app.view;
    let mut s = format!(" Showing {} of {}", v.visible_count, v.filtered.len());
    if v.can_load_more() {
        s.push_str("  (m: load more)");
    }
    s
}

#[cfg(test)]
mod tests {
    use crate::logic::query::{apply_outcome, request_products};
    use crate::state::{AppState, FetchOutcome, FetchRequest, LoadStatus, ProductRecord, Rating};
    use crate::ui::render_to_string;
    use tokio::sync::mpsc;

    fn loaded(n: i64) -> AppState {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        request_products(&mut app, &tx);
        let Ok(FetchRequest::List { request_id, .. }) = rx.try_recv() else {
            panic!("request");
        };
        let list = (1..=n)
            .map(|i| ProductRecord {
                id: i,
                title: format!("Widget {i}"),
                price: 1234.5,
                category: "tools".into(),
                image: String::new(),
                description: String::new(),
                rating: Some(Rating { rate: 3.5, count: 2 }),
            })
            .collect();
        apply_outcome(
            &mut app,
            FetchOutcome::List {
                request_id,
                result: Ok(list),
            },
        );
        app
    }

    #[test]
    /// What: The list screen shows products, prices, stars and paging.
    ///
    /// Inputs:
    /// - Ten products priced 1234.5 rated 3.5.
    ///
    /// Output:
    /// - Rendered text contains the first title, `$1,234.50`, `★★★⯪☆` and "Showing 8 of 10".
    fn list_renders_products_and_paging() {
        let mut app = loaded(10);
        let screen = render_to_string(&mut app, 120, 20);
        assert!(screen.contains("Widget 1"));
        assert!(screen.contains("$1,234.50"));
        assert!(screen.contains("★★★⯪☆"));
        assert!(screen.contains("Showing 8 of 10"));
        assert!(screen.contains("load more"));
        assert!(screen.contains("Avg rating: 3.5"));
    }

    #[test]
    fn list_renders_loading_failure_and_empty_states() {
        let mut app = AppState::default();
        app.list_status = LoadStatus::Loading;
        assert!(render_to_string(&mut app, 100, 12).contains("Loading products"));

        app.list_status = LoadStatus::Failed("Couldn't load products: HTTP 500".into());
        let screen = render_to_string(&mut app, 100, 12);
        assert!(screen.contains("HTTP 500"));
        assert!(screen.contains("Press r to retry"));

        let mut app = loaded(2);
        app.input = "nothing like this".into();
        crate::logic::query::apply_query_now(&mut app);
        assert!(render_to_string(&mut app, 100, 12).contains("No products match"));
    }
}
