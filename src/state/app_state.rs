//! Central `AppState` container mutated by the event, fetch and UI layers.

use ratatui::widgets::ListState;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::favorites::{FavoritesStore, MemorySlot};
use crate::logic::filter::{CatalogQuery, CatalogView};
use crate::logic::navigation::DetailNavigation;
use crate::logic::paging::Pagination;
use crate::logic::purchase::MIN_QUANTITY;
use crate::logic::requests::RequestTracker;
use crate::state::types::{Focus, LoadStatus, ProductRecord, Screen};

/// State of the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    /// Id the screen was opened for; `None` while on the list screen.
    pub requested_id: Option<i64>,
    /// Loaded product, `None` until the fetch completes.
    pub product: Option<ProductRecord>,
    /// Full list fetched alongside the product, used for prev/next.
    pub all_products: Vec<ProductRecord>,
    pub status: LoadStatus,
    pub navigation: DetailNavigation,
    /// Selected purchase quantity, always within `[1, 99]`.
    pub quantity: u32,
    /// Digits typed for a direct quantity entry; `None` when not editing.
    pub quantity_input: Option<String>,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            requested_id: None,
            product: None,
            all_products: Vec::new(),
            status: LoadStatus::Idle,
            navigation: DetailNavigation::default(),
            quantity: MIN_QUANTITY,
            quantity_input: None,
        }
    }
}

/// Global application state shared by the event, networking, and UI layers.
///
/// The product snapshot and the catalog inputs are the only sources of truth for the
/// list screen; `view` is derived from them and rebuilt on every change.
#[derive(Debug)]
pub struct AppState {
    /// Product API root.
    pub api_base: String,
    /// Last fetched product list, in source order.
    pub products: Vec<ProductRecord>,
    pub list_status: LoadStatus,

    /// Raw search input as typed.
    pub input: String,
    /// Timestamp of the last input edit, used for debouncing.
    pub last_input_change: Instant,
    /// `input` differs from the applied query and awaits the debounce window.
    pub input_dirty: bool,
    pub search_debounce: Duration,

    /// Applied query, category, sort, favorites-only flag and scope.
    pub catalog: CatalogQuery,
    pub pagination: Pagination,
    /// Derived projection rendered by the list screen.
    pub view: CatalogView,
    /// `"All"` followed by the distinct categories of `products`.
    pub categories: Vec<String>,

    /// Index into `view.shown()` that is highlighted.
    pub selected: usize,
    pub list_state: ListState,
    pub focus: Focus,
    pub screen: Screen,

    pub detail: DetailState,
    pub favorites: FavoritesStore,
    /// Latest request per purpose; stale results are dropped.
    pub requests: RequestTracker,

    /// Short message for the status line (cart intents, favorites sync).
    pub toast_message: Option<String>,
    /// Set by quit keys; the runtime exits on the next iteration.
    pub should_quit: bool,
}

impl AppState {
    /// What: Build the initial state from settings and a loaded favorites store.
    ///
    /// Inputs:
    /// - `settings`: Parsed `settings.conf`.
    /// - `favorites`: Store already loaded from its slot.
    ///
    /// Output:
    /// - State on the list screen with an empty snapshot and `Idle` status.
    pub fn new(settings: &Settings, favorites: FavoritesStore) -> Self {
        let catalog = CatalogQuery {
            sort: settings.sort_mode,
            scope: settings.search_scope,
            ..CatalogQuery::default()
        };
        let pagination = Pagination::new(settings.page_size);
        let view = CatalogView::build(&[], &catalog, favorites.favorites(), &pagination);
        Self {
            api_base: settings.api_base.clone(),
            products: Vec::new(),
            list_status: LoadStatus::Idle,
            input: String::new(),
            last_input_change: Instant::now(),
            input_dirty: false,
            search_debounce: Duration::from_millis(settings.search_debounce_ms),
            catalog,
            pagination,
            view,
            categories: vec![crate::state::types::ALL_CATEGORIES.to_string()],
            selected: 0,
            list_state: ListState::default(),
            focus: Focus::Search,
            screen: Screen::List,
            detail: DetailState::default(),
            favorites,
            requests: RequestTracker::default(),
            toast_message: None,
            should_quit: false,
        }
    }

    /// Product under the list cursor, if any.
    pub fn selected_product(&self) -> Option<&ProductRecord> {
        self.view.shown().get(self.selected)
    }
}

impl Default for AppState {
    /// Default settings with an in-memory favorites store; used by tests.
    fn default() -> Self {
        Self::new(
            &Settings::default(),
            FavoritesStore::load(Arc::new(MemorySlot::new())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{QueryScope, SortMode};

    #[test]
    /// What: Initial state mirrors the settings it was built from.
    ///
    /// Inputs:
    /// - Settings with a custom page size, sort mode, scope and debounce.
    ///
    /// Output:
    /// - Catalog inputs, pagination and debounce reflect the settings; view is empty.
    fn app_state_new_applies_settings() {
        let settings = Settings {
            api_base: "http://localhost:9".into(),
            page_size: 4,
            sort_mode: SortMode::Rating,
            search_scope: QueryScope::Title,
            search_debounce_ms: 50,
            log_level: String::new(),
        };
        let app = AppState::new(
            &settings,
            FavoritesStore::load(Arc::new(MemorySlot::new())),
        );
        assert_eq!(app.api_base, "http://localhost:9");
        assert_eq!(app.pagination.page_size(), 4);
        assert_eq!(app.catalog.sort, SortMode::Rating);
        assert_eq!(app.catalog.scope, QueryScope::Title);
        assert_eq!(app.catalog.category, "All");
        assert_eq!(app.search_debounce, Duration::from_millis(50));
        assert!(app.view.is_empty());
        assert_eq!(app.detail.quantity, 1);
        assert!(app.selected_product().is_none());
    }
}
