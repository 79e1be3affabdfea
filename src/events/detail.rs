use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::logic::purchase::{self, CartAction};
use crate::logic::query;
use crate::state::{AppState, FetchRequest};

/// What: Handle a key on the detail screen.
///
/// Output:
/// - Always `false`; leaving the detail screen returns to the list instead of exiting.
///
/// Details:
/// - Favorite, quantity and cart keys need a loaded product and are ignored otherwise.
/// - A digit starts a direct quantity entry; see `handle_quantity_entry`.
pub(super) fn handle_detail_key(
    ke: KeyEvent,
    app: &mut AppState,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
) -> bool {
    if app.detail.quantity_input.is_some() {
        handle_quantity_entry(ke, app);
        return false;
    }
    match ke.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => query::leave_detail(app),
        KeyCode::Left | KeyCode::Char('h') => {
            query::navigate_prev(app, fetch_tx);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            query::navigate_next(app, fetch_tx);
        }
        KeyCode::Char('r') => query::retry(app, fetch_tx),
        KeyCode::Char('f') => {
            if let Some(id) = app.detail.product.as_ref().map(|p| p.id) {
                let added = query::toggle_favorite(app, id);
                app.toast_message = Some(
                    if added {
                        "Saved to favorites"
                    } else {
                        "Removed from favorites"
                    }
                    .to_string(),
                );
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            app.detail.quantity = purchase::increment(app.detail.quantity);
        }
        KeyCode::Char('-') | KeyCode::Down => {
            app.detail.quantity = purchase::decrement(app.detail.quantity);
        }
        KeyCode::Char(c) if c.is_ascii_digit() && app.detail.product.is_some() => {
            app.detail.quantity_input = Some(c.to_string());
        }
        KeyCode::Char('a') | KeyCode::Char('b') => {
            let action = if ke.code == KeyCode::Char('a') {
                CartAction::AddToCart
            } else {
                CartAction::BuyNow
            };
            if let Some(product) = app.detail.product.as_ref() {
                app.toast_message = Some(purchase::record_cart_intent(
                    action,
                    product,
                    app.detail.quantity,
                ));
            }
        }
        _ => {}
    }
    false
}

/// What: Edit a typed quantity.
///
/// Details:
/// - Digits append up to `MAX_QUANTITY_DIGITS`; Backspace deletes one.
/// - Enter commits through `purchase::commit_quantity`; Esc discards the entry.
/// - Other keys are ignored while editing.
fn handle_quantity_entry(ke: KeyEvent, app: &mut AppState) {
    let Some(buf) = app.detail.quantity_input.as_mut() else {
        return;
    };
    match ke.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if buf.len() < purchase::MAX_QUANTITY_DIGITS {
                buf.push(c);
            }
        }
        KeyCode::Backspace => {
            buf.pop();
        }
        KeyCode::Enter => {
            if let Some(text) = app.detail.quantity_input.take() {
                app.detail.quantity = purchase::commit_quantity(app.detail.quantity, &text);
            }
        }
        KeyCode::Esc => app.detail.quantity_input = None,
        _ => {}
    }
}
