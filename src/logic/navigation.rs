//! Previous/next navigation between product detail screens.

use std::collections::BTreeSet;

use crate::state::ProductRecord;

/// What: Neighbour information for the detail screen's pagination bar.
///
/// Details:
/// - `position` is 1-based; `0` together with `total == 0` means "nothing to navigate".
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DetailNavigation {
    /// Distinct positive ids, ascending.
    pub sorted_ids: Vec<i64>,
    pub current_index: Option<usize>,
    pub prev_id: Option<i64>,
    pub next_id: Option<i64>,
    pub position: usize,
    pub total: usize,
}

/// What: Compute detail navigation for `current` within `products`.
///
/// Inputs:
/// - `products`: Full product list (any order, duplicates and bad ids tolerated).
/// - `current`: Id of the displayed product; `None` (or a non-positive id) while it is not
///   loaded.
///
/// Output:
/// - `DetailNavigation` with neighbours, 1-based position and total.
///
/// Details:
/// - Only ids greater than zero take part; the rest are dropped silently.
/// - When `current` is not in the list, the closest id not smaller than it is used.
///   If every id is smaller, the first id is used. There is no "closest below" fallback.
pub fn compute_navigation(products: &[ProductRecord], current: Option<i64>) -> DetailNavigation {
    let sorted_ids: Vec<i64> = products
        .iter()
        .map(|p| p.id)
        .filter(|id| *id > 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let total = sorted_ids.len();

    let Some(current) = current.filter(|id| *id > 0 && total > 0) else {
        return DetailNavigation {
            sorted_ids,
            total,
            ..DetailNavigation::default()
        };
    };

    let idx = match sorted_ids.binary_search(&current) {
        Ok(i) => i,
        Err(insert_at) if insert_at < total => insert_at,
        Err(_) => 0,
    };

    DetailNavigation {
        prev_id: idx.checked_sub(1).map(|i| sorted_ids[i]),
        next_id: sorted_ids.get(idx + 1).copied(),
        current_index: Some(idx),
        position: idx + 1,
        total,
        sorted_ids,
    }
}
