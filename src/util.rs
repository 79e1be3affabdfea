//! Small helpers for display formatting, id parsing and curl invocation.
//!
//! Kept free of state so the UI, the fetch layer and tests can share them.

use crate::error::CatalogError;

/// Maximum number of characters of an error body shown to the user.
pub const BODY_EXCERPT_CHARS: usize = 120;

/// What: Format a price as a US dollar amount.
///
/// Inputs:
/// - `value`: Price in dollars.
///
/// Output:
/// - String like `$1,234.50`; negatives render as `-$3.00`.
///
/// Details:
/// - Rounds to whole cents first so `0.005` style artefacts never show a third digit.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let rem = cents % 100;
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{rem:02}")
}

/// Rating with one decimal, `"0.0"` when absent.
pub fn format_rate(rate: Option<f64>) -> String {
    format!("{:.1}", rate.unwrap_or(0.0))
}

/// One of the five star slots in a rating display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

impl StarFill {
    pub fn glyph(&self) -> char {
        match self {
            StarFill::Full => '★',
            StarFill::Half => '⯪',
            StarFill::Empty => '☆',
        }
    }
}

/// What: Split a rating into five star slots.
///
/// Details:
/// - `floor(rate)` full stars, then one half star if the remainder is at least 0.5.
pub fn star_slots(rate: f64) -> [StarFill; 5] {
    let rate = if rate.is_finite() {
        rate.clamp(0.0, 5.0)
    } else {
        0.0
    };
    let full = rate.floor() as usize;
    let half = rate - rate.floor() >= 0.5;
    let mut out = [StarFill::Empty; 5];
    for (i, slot) in out.iter_mut().enumerate() {
        if i < full {
            *slot = StarFill::Full;
        } else if i == full && half {
            *slot = StarFill::Half;
        }
    }
    out
}

/// Star glyphs for a rating, e.g. `★★★⯪☆`.
pub fn stars(rate: f64) -> String {
    star_slots(rate).iter().map(StarFill::glyph).collect()
}

/// What: Leading part of a response body for error display.
///
/// Output:
/// - Trimmed body truncated to `max_chars` characters (never splits a UTF-8 sequence).
pub fn excerpt(body: &str, max_chars: usize) -> String {
    body.trim().chars().take(max_chars).collect()
}

/// What: Validate a product id supplied by the user or the command line.
///
/// Inputs:
/// - `raw`: Text such as `"7"`.
///
/// Output:
/// - `Ok(id)` for positive integers; `Err(CatalogError::InvalidIdentifier)` otherwise.
///
/// Details:
/// - Integral decimals like `"3.0"` are accepted; `"0"`, `"-1"`, `"abc"` and `"1.5"` are not.
pub fn parse_product_id(raw: &str) -> Result<i64, CatalogError> {
    let trimmed = raw.trim();
    let invalid = || CatalogError::InvalidIdentifier(trimmed.to_string());
    let id = match trimmed.parse::<i64>() {
        Ok(i) => i,
        Err(_) => {
            let f: f64 = trimmed.parse().map_err(|_| invalid())?;
            if !f.is_finite() || f.fract() != 0.0 || f.abs() >= i64::MAX as f64 {
                return Err(invalid());
            }
            f as i64
        }
    };
    if id > 0 { Ok(id) } else { Err(invalid()) }
}

/// What: Build curl arguments for an API request.
///
/// Inputs:
/// - `url`: The URL to fetch.
/// - `extra_args`: Additional arguments placed before the URL.
///
/// Output:
/// - Argument vector for `Command::args()`.
///
/// Details:
/// - Base arguments: `-sSL` (silent, show errors, follow redirects). No `-f`:
///   error bodies and status codes reach the caller.
/// - Appends `-w "\n%{http_code}"` so the status is the last line of stdout.
/// - Windows adds `-k` to skip certificate verification (curl exit code 77 otherwise).
pub fn curl_args(url: &str, extra_args: &[&str]) -> Vec<String> {
    let mut args = vec!["-sSL".to_string()];

    #[cfg(target_os = "windows")]
    {
        args.push("-k".to_string());
    }

    for arg in extra_args {
        args.push((*arg).to_string());
    }
    args.push("-w".to_string());
    args.push("\n%{http_code}".to_string());

    args.push(url.to_string());
    args
}
