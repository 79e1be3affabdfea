//! Filter stage of the catalog view plus the derived `CatalogView` projection.

use std::collections::HashSet;

use crate::favorites::FavoriteSet;
use crate::logic::paging::Pagination;
use crate::logic::sort::sort_products;
use crate::state::types::{ALL_CATEGORIES, is_all_categories};
use crate::state::{ProductRecord, QueryScope, SortMode};

/// What: User-chosen inputs that determine the catalog view.
///
/// Details:
/// - `query` is the applied (debounced) search text, not the raw input buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogQuery {
    pub query: String,
    pub category: String,
    pub sort: SortMode,
    pub favorites_only: bool,
    pub scope: QueryScope,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort: SortMode::Featured,
            favorites_only: false,
            scope: QueryScope::default(),
        }
    }
}

/// Trim and case-fold text for substring matching.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// What: Decide whether a product passes the search text.
///
/// Inputs:
/// - `product`: Candidate.
/// - `needle`: Already-normalized query; empty matches everything.
/// - `scope`: Fields to search.
///
/// Output:
/// - `true` when `needle` is a substring of any searched field.
pub fn matches_query(product: &ProductRecord, needle: &str, scope: QueryScope) -> bool {
    if needle.is_empty() {
        return true;
    }
    if normalize(&product.title).contains(needle) {
        return true;
    }
    match scope {
        QueryScope::Title => false,
        QueryScope::TitleCategoryDescription => {
            normalize(&product.category).contains(needle)
                || normalize(&product.description).contains(needle)
        }
    }
}

/// What: Compute the filtered, sorted product list for the given inputs.
///
/// Inputs:
/// - `products`: Full fetched snapshot, in source order.
/// - `query`: Search text, category, sort mode, favorites-only flag and scope.
/// - `favorites`: Current favorite ids, consulted only in favorites-only mode.
///
/// Output:
/// - New vector with the products that pass every filter, in sort order.
///
/// Details:
/// - Category comparison is exact and case-sensitive; `"All"` disables it.
/// - Whitespace-only queries behave as empty.
/// - Repeated ids keep only their first occurrence.
/// - Pure: identical inputs always give identical output.
pub fn compute_view(
    products: &[ProductRecord],
    query: &CatalogQuery,
    favorites: &FavoriteSet,
) -> Vec<ProductRecord> {
    let needle = normalize(&query.query);
    let any_category = is_all_categories(&query.category);
    let mut seen: HashSet<i64> = HashSet::with_capacity(products.len());

    let mut list: Vec<ProductRecord> = products
        .iter()
        .filter(|p| any_category || p.category == query.category)
        .filter(|p| matches_query(p, &needle, query.scope))
        .filter(|p| !query.favorites_only || favorites.contains(p.id))
        .filter(|p| seen.insert(p.id))
        .cloned()
        .collect();

    sort_products(&mut list, query.sort);
    list
}

/// What: Read-only projection rendered by the list screen.
///
/// Details:
/// - Rebuilt from scratch on every input change; never mutated in place.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CatalogView {
    pub query: CatalogQuery,
    pub filtered: Vec<ProductRecord>,
    pub visible_count: usize,
}

impl CatalogView {
    pub fn build(
        products: &[ProductRecord],
        query: &CatalogQuery,
        favorites: &FavoriteSet,
        pagination: &Pagination,
    ) -> Self {
        let filtered = compute_view(products, query, favorites);
        let visible_count = pagination.visible_count(filtered.len());
        Self {
            query: query.clone(),
            filtered,
            visible_count,
        }
    }

    /// The page of products currently on screen.
    pub fn shown(&self) -> &[ProductRecord] {
        &self.filtered[..self.visible_count]
    }

    pub fn can_load_more(&self) -> bool {
        self.visible_count < self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}
