//! Error taxonomy for the fetch boundary.
//!
//! Failures are converted into display strings on `AppState` before any data
//! reaches the filter/sort/navigation logic, so only the network and id-parsing
//! layers ever construct these values.

use thiserror::Error;

/// Errors produced while talking to the product API or parsing user-supplied ids.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Non-2xx response. `excerpt` is the leading part of the body, possibly empty.
    #[error("HTTP {status}{}", excerpt_suffix(.excerpt))]
    Http { status: u16, excerpt: String },

    /// curl could not complete the request (DNS, TLS, connection reset, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The body was not the JSON shape we expected.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A product id that is not a positive integer.
    #[error("Invalid product id: {0}")]
    InvalidIdentifier(String),

    /// The request was superseded or its screen was closed.
    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// HTTP status carried by the failure, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures that should render as "not found / invalid" rather than a network error.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, CatalogError::InvalidIdentifier(_))
    }
}

fn excerpt_suffix(excerpt: &str) -> String {
    if excerpt.is_empty() {
        String::new()
    } else {
        format!(": {excerpt}")
    }
}
