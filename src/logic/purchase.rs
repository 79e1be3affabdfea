//! Quantity selection and cart intent on the detail screen.
//!
//! There is no cart: both actions only emit a structured log event.

use crate::state::ProductRecord;

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 99;
/// Longest digit string accepted by direct quantity entry.
pub const MAX_QUANTITY_DIGITS: usize = 3;

/// Clamp any requested quantity into `[MIN_QUANTITY, MAX_QUANTITY]`.
pub fn clamp_quantity(requested: i64) -> u32 {
    requested.clamp(MIN_QUANTITY as i64, MAX_QUANTITY as i64) as u32
}

pub fn increment(qty: u32) -> u32 {
    clamp_quantity(qty as i64 + 1)
}

pub fn decrement(qty: u32) -> u32 {
    clamp_quantity(qty as i64 - 1)
}

/// What: Parse a typed quantity.
///
/// Output:
/// - `None` for non-numeric input (the previous quantity stays); otherwise the clamped value.
pub fn parse_quantity(input: &str) -> Option<u32> {
    input.trim().parse::<i64>().ok().map(clamp_quantity)
}

/// What: Commit a direct quantity entry.
///
/// Inputs:
/// - `current`: Quantity before the entry.
/// - `input`: Typed text.
///
/// Output:
/// - The parsed and clamped quantity, or `current` when the text is not a number.
pub fn commit_quantity(current: u32, input: &str) -> u32 {
    parse_quantity(input).unwrap_or(current)
}

pub fn subtotal(price: f64, qty: u32) -> f64 {
    price * qty as f64
}

/// Which purchase button was pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartAction {
    AddToCart,
    BuyNow,
}

impl CartAction {
    pub fn label(&self) -> &'static str {
        match self {
            CartAction::AddToCart => "Add to cart",
            CartAction::BuyNow => "Buy now",
        }
    }
}

/// What: Record a purchase intent.
///
/// Inputs:
/// - `action`: Button pressed.
/// - `product`: Product on screen.
/// - `qty`: Selected quantity.
///
/// Output:
/// - A toast message for the status line.
///
/// Details:
/// - Emits one `info` event on the `cart` target and does nothing else.
pub fn record_cart_intent(action: CartAction, product: &ProductRecord, qty: u32) -> String {
    let qty = clamp_quantity(qty as i64);
    tracing::info!(
        target: "cart",
        action = action.label(),
        product_id = product.id,
        qty,
        title = %product.title,
        price = product.price,
        "cart intent"
    );
    format!(
        "{}: {} x {} ({})",
        action.label(),
        qty,
        product.title,
        crate::util::format_price(subtotal(product.price, qty))
    )
}
