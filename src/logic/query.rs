//! State transitions behind user actions: search, filters, paging, fetch dispatch and
//! application of fetch outcomes.

use std::time::Instant;

use tokio::sync::mpsc;

use crate::error::CatalogError;
use crate::logic::filter::{CatalogQuery, CatalogView};
use crate::logic::navigation::compute_navigation;
use crate::logic::requests::RequestKey;
use crate::logic::summary::categories;
use crate::state::types::{ALL_CATEGORIES, is_all_categories};
use crate::state::{
    AppState, DetailBundle, DetailState, FetchOutcome, FetchRequest, LoadStatus, ProductRecord,
    Screen,
};

/// What: Rebuild the derived view from the snapshot, catalog inputs and favorites.
///
/// Details:
/// - Keeps the cursor inside the visible page and syncs the list widget selection.
pub fn refresh_view(app: &mut AppState) {
    app.view = CatalogView::build(
        &app.products,
        &app.catalog,
        app.favorites.favorites(),
        &app.pagination,
    );
    let shown = app.view.visible_count;
    if shown == 0 {
        app.selected = 0;
        app.list_state.select(None);
    } else {
        app.selected = app.selected.min(shown - 1);
        app.list_state.select(Some(app.selected));
    }
}

/// Filter, sort or search changed: back to the first page and the top of the list.
fn apply_filter_change(app: &mut AppState) {
    app.pagination.reset();
    app.selected = 0;
    refresh_view(app);
}

/// Record an edit of the raw search input; the query is applied after the debounce window.
pub fn on_input_changed(app: &mut AppState, now: Instant) {
    app.last_input_change = now;
    app.input_dirty = true;
}

/// What: Apply the typed search text once the input has been idle long enough.
///
/// Inputs:
/// - `now`: Current instant (injected for tests).
///
/// Output:
/// - `true` when the applied query changed and the view was rebuilt.
///
/// Details:
/// - Typing that returns to the already applied text clears the pending flag without a reset.
pub fn apply_debounced_query(app: &mut AppState, now: Instant) -> bool {
    if !app.input_dirty || now.duration_since(app.last_input_change) < app.search_debounce {
        return false;
    }
    apply_query_now(app)
}

/// Apply the typed search text immediately (Enter in the search box).
pub fn apply_query_now(app: &mut AppState) -> bool {
    app.input_dirty = false;
    if app.catalog.query == app.input {
        return false;
    }
    app.catalog.query = app.input.clone();
    tracing::debug!(query = %app.catalog.query, "search applied");
    apply_filter_change(app);
    true
}

/// Select a category; unknown names are accepted and simply match nothing.
pub fn set_category(app: &mut AppState, category: &str) {
    let category = if is_all_categories(category) {
        ALL_CATEGORIES
    } else {
        category
    };
    if app.catalog.category == category {
        return;
    }
    app.catalog.category = category.to_string();
    apply_filter_change(app);
}

/// What: Step through the category list.
///
/// Inputs:
/// - `forward`: `true` for the next category, `false` for the previous one.
///
/// Details:
/// - Wraps at both ends; a selection missing from the list restarts at `"All"`.
pub fn cycle_category(app: &mut AppState, forward: bool) {
    if app.categories.is_empty() {
        return;
    }
    let len = app.categories.len();
    let next = match app.categories.iter().position(|c| *c == app.catalog.category) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    let cat = app.categories[next].clone();
    set_category(app, &cat);
}

pub fn cycle_sort(app: &mut AppState) {
    app.catalog.sort = app.catalog.sort.next();
    apply_filter_change(app);
}

pub fn toggle_favorites_only(app: &mut AppState) {
    app.catalog.favorites_only = !app.catalog.favorites_only;
    apply_filter_change(app);
}

/// What: Restore the default query, category, sort and favorites-only flag.
///
/// Details:
/// - The search scope is a setting and survives; the raw input is cleared too.
pub fn reset_filters(app: &mut AppState) {
    app.catalog = CatalogQuery {
        scope: app.catalog.scope,
        ..CatalogQuery::default()
    };
    app.input.clear();
    app.input_dirty = false;
    apply_filter_change(app);
}

/// Show one more page. No effect once everything is visible.
pub fn load_more(app: &mut AppState) -> bool {
    if !app.view.can_load_more() {
        return false;
    }
    app.pagination.load_more(app.view.filtered.len());
    refresh_view(app);
    true
}

/// What: Toggle a product's favorite flag and refresh anything derived from it.
///
/// Output:
/// - `true` when the product is now a favorite.
///
/// Details:
/// - Not a filter change: pagination is kept; in favorites-only mode the view shrinks or grows.
pub fn toggle_favorite(app: &mut AppState, id: i64) -> bool {
    let now = app.favorites.toggle(id).contains(id);
    refresh_view(app);
    now
}

/// Rebuild after the favorites file changed on disk; returns whether anything changed.
pub fn reload_favorites(app: &mut AppState) -> bool {
    if !app.favorites.reload() {
        return false;
    }
    refresh_view(app);
    app.toast_message = Some(format!(
        "Favorites synced ({} saved)",
        app.favorites.favorites().len()
    ));
    true
}

/// What: Issue (or reissue) the product list fetch.
///
/// Inputs:
/// - `fetch_tx`: Channel to the fetch worker.
///
/// Details:
/// - Supersedes any list fetch still in flight; its result will be dropped.
pub fn request_products(app: &mut AppState, fetch_tx: &mpsc::UnboundedSender<FetchRequest>) {
    let (request_id, token) = app.requests.begin(RequestKey::ProductList);
    app.list_status = LoadStatus::Loading;
    tracing::debug!(request_id, "requesting product list");
    let _ = fetch_tx.send(FetchRequest::List { request_id, token });
}

/// What: Switch to the detail screen for `product_id` and fetch it.
///
/// Inputs:
/// - `product_id`: Id to show; non-positive ids are rejected.
/// - `fetch_tx`: Channel to the fetch worker.
///
/// Details:
/// - An invalid id produces the `Invalid` state without issuing a fetch.
/// - The previous bundle list is kept while loading so the bar does not flicker.
pub fn open_detail(
    app: &mut AppState,
    product_id: i64,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
) {
    app.screen = Screen::Detail;
    let keep_list = std::mem::take(&mut app.detail.all_products);
    app.detail = DetailState {
        requested_id: Some(product_id),
        ..DetailState::default()
    };
    if product_id <= 0 {
        app.requests.cancel(RequestKey::ProductDetail);
        let err = CatalogError::InvalidIdentifier(product_id.to_string());
        app.detail.status = LoadStatus::Invalid(err.to_string());
        return;
    }
    app.detail.navigation = compute_navigation(&keep_list, Some(product_id));
    app.detail.all_products = keep_list;
    app.detail.status = LoadStatus::Loading;
    let (request_id, token) = app.requests.begin(RequestKey::ProductDetail);
    tracing::debug!(request_id, product_id, "requesting product detail");
    let _ = fetch_tx.send(FetchRequest::Detail {
        request_id,
        product_id,
        token,
    });
}

/// Open the detail screen from raw text such as a command line argument.
pub fn open_detail_from_input(
    app: &mut AppState,
    raw: &str,
    fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
) {
    match crate::util::parse_product_id(raw) {
        Ok(id) => open_detail(app, id, fetch_tx),
        Err(e) => {
            app.requests.cancel(RequestKey::ProductDetail);
            app.screen = Screen::Detail;
            app.detail = DetailState {
                status: LoadStatus::Invalid(e.to_string()),
                ..DetailState::default()
            };
        }
    }
}

/// Refetch whatever the current screen shows.
pub fn retry(app: &mut AppState, fetch_tx: &mpsc::UnboundedSender<FetchRequest>) {
    match app.screen {
        Screen::List => request_products(app, fetch_tx),
        Screen::Detail => {
            if let Some(id) = app.detail.requested_id {
                open_detail(app, id, fetch_tx);
            }
        }
    }
}

pub fn navigate_prev(app: &mut AppState, fetch_tx: &mpsc::UnboundedSender<FetchRequest>) -> bool {
    match app.detail.navigation.prev_id {
        Some(id) => {
            open_detail(app, id, fetch_tx);
            true
        }
        None => false,
    }
}

pub fn navigate_next(app: &mut AppState, fetch_tx: &mpsc::UnboundedSender<FetchRequest>) -> bool {
    match app.detail.navigation.next_id {
        Some(id) => {
            open_detail(app, id, fetch_tx);
            true
        }
        None => false,
    }
}

/// Back to the list; an in-flight detail fetch is cancelled and its result ignored.
pub fn leave_detail(app: &mut AppState) {
    app.requests.cancel(RequestKey::ProductDetail);
    app.detail = DetailState::default();
    app.screen = Screen::List;
}

/// A fresh snapshot (or an empty one after a failure) starts again at the first page.
fn apply_product_list(app: &mut AppState, list: Vec<ProductRecord>, status: LoadStatus) {
    app.categories = categories(&list);
    app.products = list;
    app.list_status = status;
    app.pagination.reset();
    app.selected = 0;
    refresh_view(app);
}

fn apply_detail_bundle(app: &mut AppState, bundle: DetailBundle) {
    let DetailBundle {
        product,
        all_products,
    } = bundle;
    app.detail.navigation = compute_navigation(&all_products, Some(product.id));
    app.detail.requested_id = Some(product.id);
    app.detail.product = Some(product);
    app.detail.all_products = all_products;
    app.detail.status = LoadStatus::Ready;
}

/// What: Apply a fetch result if it is still the authoritative one.
///
/// Inputs:
/// - `outcome`: Result tagged with its request id.
///
/// Output:
/// - `true` when state changed; `false` for superseded or cancelled results.
///
/// Details:
/// - Failures become `LoadStatus::Failed` with a user-facing message.
pub fn apply_outcome(app: &mut AppState, outcome: FetchOutcome) -> bool {
    match outcome {
        FetchOutcome::List { request_id, result } => {
            if !app.requests.finish(RequestKey::ProductList, request_id) {
                tracing::debug!(request_id, "dropping stale product list result");
                return false;
            }
            match result {
                Ok(list) => apply_product_list(app, list, LoadStatus::Ready),
                Err(CatalogError::Cancelled) => return false,
                Err(e) => {
                    tracing::warn!(
                        request_id,
                        status = ?e.status(),
                        error = %e,
                        "product list fetch failed"
                    );
                    let status = LoadStatus::Failed(format!("Couldn't load products: {e}"));
                    apply_product_list(app, Vec::new(), status);
                }
            }
            true
        }
        FetchOutcome::Detail { request_id, result } => {
            if !app.requests.finish(RequestKey::ProductDetail, request_id) {
                tracing::debug!(request_id, "dropping stale product detail result");
                return false;
            }
            match result {
                Ok(bundle) => apply_detail_bundle(app, bundle),
                Err(CatalogError::Cancelled) => return false,
                Err(e) if e.is_invalid_identifier() => {
                    app.detail.status = LoadStatus::Invalid(e.to_string());
                }
                Err(e) => {
                    tracing::warn!(
                        request_id,
                        status = ?e.status(),
                        error = %e,
                        "product detail fetch failed"
                    );
                    app.detail.product = None;
                    app.detail.all_products.clear();
                    app.detail.navigation = compute_navigation(&[], None);
                    app.detail.status = LoadStatus::Failed(format!("Product fetch failed: {e}"));
                }
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Rating, SortMode};
    use std::time::Duration;

    fn product(id: i64, category: &str, price: f64) -> ProductRecord {
        ProductRecord {
            id,
            title: format!("Item {id}"),
            price,
            category: category.into(),
            image: String::new(),
            description: String::new(),
            rating: Some(Rating {
                rate: id as f64 % 5.0,
                count: 10,
            }),
        }
    }

    fn loaded_app(n: i64) -> AppState {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        request_products(&mut app, &tx);
        let Some(FetchRequest::List { request_id, .. }) = rx.try_recv().ok() else {
            panic!("expected list request");
        };
        let list = (1..=n)
            .map(|i| product(i, if i % 2 == 0 { "b" } else { "a" }, i as f64))
            .collect();
        assert!(apply_outcome(
            &mut app,
            FetchOutcome::List {
                request_id,
                result: Ok(list),
            }
        ));
        app
    }

    #[test]
    /// What: Load more grows by one page and stops at the filtered length.
    ///
    /// Inputs:
    /// - Ten products with the default page size of eight.
    ///
    /// Output:
    /// - 8 visible, then 10 after one load more, then no further growth.
    fn list_load_more_and_reset_on_filter_change() {
        let mut app = loaded_app(10);
        assert_eq!(app.list_status, LoadStatus::Ready);
        assert_eq!(app.categories, vec!["All", "a", "b"]);
        assert_eq!(app.view.visible_count, 8);
        assert!(load_more(&mut app));
        assert_eq!(app.view.visible_count, 10);
        assert!(!load_more(&mut app));

        cycle_sort(&mut app);
        assert_eq!(app.catalog.sort, SortMode::PriceAsc);
        assert_eq!(app.view.visible_count, 8);

        load_more(&mut app);
        cycle_category(&mut app, true);
        assert_eq!(app.catalog.category, "a");
        assert_eq!(app.view.visible_count, 5);
        cycle_category(&mut app, false);
        assert_eq!(app.catalog.category, "All");
        assert_eq!(app.view.visible_count, 8);
    }

    #[test]
    /// What: Typed text is applied only after the debounce window.
    ///
    /// Inputs:
    /// - Input "item 1" typed at t0; checks at t0+100ms and t0+debounce.
    ///
    /// Output:
    /// - No change before the window; afterwards the query matches "Item 1" and "Item 10".
    fn search_is_debounced() {
        let mut app = loaded_app(10);
        let t0 = Instant::now();
        app.input = "item 1".into();
        on_input_changed(&mut app, t0);
        assert!(!apply_debounced_query(&mut app, t0 + Duration::from_millis(100)));
        assert_eq!(app.view.filtered.len(), 10);

        let debounce = app.search_debounce;
        assert!(apply_debounced_query(&mut app, t0 + debounce));
        assert_eq!(app.catalog.query, "item 1");
        let ids: Vec<i64> = app.view.filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 10]);
        assert!(!app.input_dirty);

        on_input_changed(&mut app, t0);
        assert!(!apply_debounced_query(&mut app, t0 + Duration::from_secs(5)));
    }

    #[test]
    fn favorites_only_and_reset_filters() {
        let mut app = loaded_app(10);
        assert!(toggle_favorite(&mut app, 3));
        assert!(toggle_favorite(&mut app, 7));
        toggle_favorites_only(&mut app);
        let ids: Vec<i64> = app.view.filtered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 7]);

        assert!(!toggle_favorite(&mut app, 3));
        assert_eq!(app.view.filtered.len(), 1);

        app.input = "zzz".into();
        apply_query_now(&mut app);
        reset_filters(&mut app);
        assert_eq!(app.catalog, CatalogQuery::default());
        assert!(app.input.is_empty());
        assert_eq!(app.view.filtered.len(), 10);
    }

    #[test]
    /// What: A superseded list fetch never overwrites the newer result.
    ///
    /// Inputs:
    /// - Two list requests; the second result arrives first, then the first one.
    ///
    /// Output:
    /// - Only the second result is applied.
    fn stale_list_results_are_dropped() {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        request_products(&mut app, &tx);
        request_products(&mut app, &tx);
        let Ok(FetchRequest::List {
            request_id: first,
            token: first_token,
        }) = rx.try_recv()
        else {
            panic!("first request");
        };
        let Ok(FetchRequest::List {
            request_id: second, ..
        }) = rx.try_recv()
        else {
            panic!("second request");
        };
        assert!(first_token.is_cancelled());

        assert!(apply_outcome(
            &mut app,
            FetchOutcome::List {
                request_id: second,
                result: Ok(vec![product(2, "a", 1.0)]),
            }
        ));
        assert!(!apply_outcome(
            &mut app,
            FetchOutcome::List {
                request_id: first,
                result: Ok(vec![product(1, "a", 1.0), product(5, "a", 1.0)]),
            }
        ));
        assert_eq!(app.products.len(), 1);
        assert_eq!(app.products[0].id, 2);
    }

    #[test]
    fn list_failure_sets_failed_status() {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        request_products(&mut app, &tx);
        let Ok(FetchRequest::List { request_id, .. }) = rx.try_recv() else {
            panic!("request");
        };
        apply_outcome(
            &mut app,
            FetchOutcome::List {
                request_id,
                result: Err(CatalogError::Http {
                    status: 503,
                    excerpt: "busy".into(),
                }),
            },
        );
        assert_eq!(
            app.list_status,
            LoadStatus::Failed("Couldn't load products: HTTP 503: busy".into())
        );
    }

    fn reload(app: &mut AppState, result: Result<Vec<ProductRecord>, CatalogError>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        retry(app, &tx);
        let Ok(FetchRequest::List { request_id, .. }) = rx.try_recv() else {
            panic!("reload request");
        };
        assert!(apply_outcome(app, FetchOutcome::List { request_id, result }));
    }

    #[test]
    /// What: A successful reload starts again at the first page.
    ///
    /// Inputs:
    /// - Twenty products, one load more, cursor moved down; then a reload of twenty.
    ///
    /// Output:
    /// - Eight visible and the cursor back at the top.
    fn reload_resets_pagination_and_cursor() {
        let mut app = loaded_app(20);
        assert!(load_more(&mut app));
        assert_eq!(app.view.visible_count, 16);
        app.selected = 12;

        let list = (1..=20).map(|i| product(i, "a", i as f64)).collect();
        reload(&mut app, Ok(list));
        assert_eq!(app.view.visible_count, 8);
        assert_eq!(app.selected, 0);
        assert_eq!(app.categories, vec!["All", "a"]);
    }

    #[test]
    /// What: A failed reload empties the list instead of leaving stale rows selectable.
    ///
    /// Inputs:
    /// - Five loaded products, then a reload that fails with a transport error.
    ///
    /// Output:
    /// - `Failed` status, no products, only the "All" category and no selection.
    fn failed_reload_clears_snapshot() {
        let mut app = loaded_app(5);
        assert!(app.selected_product().is_some());

        reload(&mut app, Err(CatalogError::Transport("down".into())));
        assert_eq!(
            app.list_status,
            LoadStatus::Failed("Couldn't load products: request failed: down".into())
        );
        assert!(app.products.is_empty());
        assert_eq!(app.categories, vec!["All"]);
        assert_eq!(app.view.visible_count, 0);
        assert!(app.selected_product().is_none());
    }

    #[test]
    /// What: Invalid ids never reach the fetch worker.
    ///
    /// Inputs:
    /// - `open_detail` with id 0 and `open_detail_from_input` with "abc".
    ///
    /// Output:
    /// - Detail screen in the `Invalid` state; the channel stays empty.
    fn invalid_ids_do_not_fetch() {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        open_detail(&mut app, 0, &tx);
        assert_eq!(app.screen, Screen::Detail);
        assert!(matches!(app.detail.status, LoadStatus::Invalid(_)));
        open_detail_from_input(&mut app, "abc", &tx);
        assert_eq!(
            app.detail.status,
            LoadStatus::Invalid("Invalid product id: abc".into())
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    /// What: Detail loads, navigates, and ignores results after leaving the screen.
    ///
    /// Inputs:
    /// - Open product 3 of ids 1..=5; navigate next; leave before the result arrives.
    ///
    /// Output:
    /// - Position 3 of 5 with neighbours 2 and 4; the late result for product 4 is dropped.
    fn detail_flow_and_cancellation_on_leave() {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let all: Vec<ProductRecord> = (1..=5).map(|i| product(i, "a", 1.0)).collect();

        open_detail(&mut app, 3, &tx);
        let Ok(FetchRequest::Detail {
            request_id,
            product_id,
            ..
        }) = rx.try_recv()
        else {
            panic!("detail request");
        };
        assert_eq!(product_id, 3);
        assert!(apply_outcome(
            &mut app,
            FetchOutcome::Detail {
                request_id,
                result: Ok(DetailBundle {
                    product: all[2].clone(),
                    all_products: all.clone(),
                }),
            }
        ));
        let nav = &app.detail.navigation;
        assert_eq!((nav.prev_id, nav.next_id), (Some(2), Some(4)));
        assert_eq!((nav.position, nav.total), (3, 5));

        assert!(navigate_next(&mut app, &tx));
        let Ok(FetchRequest::Detail {
            request_id, token, ..
        }) = rx.try_recv()
        else {
            panic!("next request");
        };
        assert_eq!(app.detail.requested_id, Some(4));
        assert_eq!(app.detail.navigation.position, 4);

        leave_detail(&mut app);
        assert!(token.is_cancelled());
        assert_eq!(app.screen, Screen::List);
        assert!(!apply_outcome(
            &mut app,
            FetchOutcome::Detail {
                request_id,
                result: Ok(DetailBundle {
                    product: all[3].clone(),
                    all_products: all,
                }),
            }
        ));
        assert!(app.detail.product.is_none());
    }

    #[test]
    fn detail_invalid_identifier_outcome_is_not_a_network_failure() {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        open_detail(&mut app, 7, &tx);
        let Ok(FetchRequest::Detail { request_id, .. }) = rx.try_recv() else {
            panic!("detail request");
        };
        assert!(apply_outcome(
            &mut app,
            FetchOutcome::Detail {
                request_id,
                result: Err(CatalogError::InvalidIdentifier("7x".into())),
            }
        ));
        assert_eq!(
            app.detail.status,
            LoadStatus::Invalid("Invalid product id: 7x".into())
        );
    }

    #[test]
    fn detail_failure_clears_product_and_navigation() {
        let mut app = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        open_detail(&mut app, 9, &tx);
        let Ok(FetchRequest::Detail { request_id, .. }) = rx.try_recv() else {
            panic!("detail request");
        };
        apply_outcome(
            &mut app,
            FetchOutcome::Detail {
                request_id,
                result: Err(CatalogError::Transport("timeout".into())),
            },
        );
        assert_eq!(
            app.detail.status,
            LoadStatus::Failed("Product fetch failed: request failed: timeout".into())
        );
        assert_eq!(app.detail.navigation.total, 0);

        retry(&mut app, &tx);
        assert!(matches!(
            rx.try_recv(),
            Ok(FetchRequest::Detail { product_id: 9, .. })
        ));
    }
}
