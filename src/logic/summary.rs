//! Catalog-wide figures shown above the product list.

use std::collections::BTreeSet;

use crate::state::ProductRecord;
use crate::state::types::ALL_CATEGORIES;

/// Shown when no product in the snapshot carries a rating.
pub const FALLBACK_AVERAGE_RATING: f64 = 4.5;

/// What: Category choices for the category selector.
///
/// Inputs:
/// - `products`: Current snapshot.
///
/// Output:
/// - `"All"` followed by each distinct category, sorted lexicographically.
pub fn categories(products: &[ProductRecord]) -> Vec<String> {
    let uniq: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(uniq.into_iter().map(str::to_string))
        .collect()
}

/// What: Mean rating over rated products, rounded to one decimal.
///
/// Output:
/// - `FALLBACK_AVERAGE_RATING` when nothing is rated.
pub fn average_rating(products: &[ProductRecord]) -> f64 {
    let rates: Vec<f64> = products
        .iter()
        .filter_map(|p| p.rating.as_ref().map(|r| r.rate))
        .collect();
    if rates.is_empty() {
        return FALLBACK_AVERAGE_RATING;
    }
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    (mean * 10.0).round() / 10.0
}
