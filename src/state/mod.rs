//! Application state and the plain data types it is built from.

pub mod app_state;
pub mod types;

pub use app_state::{AppState, DetailState};
pub use types::{
    DetailBundle, FetchOutcome, FetchRequest, Focus, LoadStatus, ProductRecord, QueryScope, Rating,
    Screen, SortMode,
};
