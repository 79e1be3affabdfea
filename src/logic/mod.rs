//! Core non-UI logic split into modular submodules.

pub mod filter;
pub mod navigation;
pub mod paging;
pub mod purchase;
pub mod query;
pub mod requests;
pub mod sort;
pub mod summary;

pub use filter::{CatalogQuery, CatalogView, compute_view};
pub use navigation::{DetailNavigation, compute_navigation};
pub use paging::Pagination;
pub use requests::{FetchToken, RequestKey, RequestTracker};
pub use sort::sort_products;
pub use summary::{average_rating, categories};
