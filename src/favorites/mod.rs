//! Favorited product ids: in-memory set, persisted slot, and change notification.
//!
//! The set is the only durable state of the application. It lives in a single
//! JSON file (`lists/favorites.json`) holding an array of integer ids, and every
//! instance of the browser watches that file so toggles made elsewhere show up
//! without a restart.

mod set;
mod slot;
mod store;
mod watch;

pub use set::FavoriteSet;
pub use slot::{FavoritesSlot, FileSlot, MemorySlot};
pub use store::{FavoritesStore, read_favorites};
pub use watch::watch_favorites_file;

/// What: Membership test against a favorite set.
///
/// Inputs:
/// - `set`: Favorite ids.
/// - `id`: Product id to look up.
///
/// Output:
/// - `true` when `id` is favorited.
pub fn is_favorite(set: &FavoriteSet, id: i64) -> bool {
    set.contains(id)
}
