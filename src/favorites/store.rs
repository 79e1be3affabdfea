use std::sync::Arc;

use tokio::sync::watch;

use super::set::FavoriteSet;
use super::slot::FavoritesSlot;

/// What: Read the persisted favorites from a slot.
///
/// Inputs:
/// - `slot`: Storage slot to read.
///
/// Output:
/// - The stored set; an empty set when the slot is missing, unreadable, malformed or not an array.
///
/// Details:
/// - Never fails the caller. Malformed contents are logged and replaced by an empty set
///   in memory only; the slot is left untouched until the next mutation.
pub fn read_favorites(slot: &dyn FavoritesSlot) -> FavoriteSet {
    match slot.read() {
        Ok(Some(raw)) => FavoriteSet::parse(&raw).unwrap_or_else(|| {
            tracing::warn!("favorites storage is malformed; starting from an empty set");
            FavoriteSet::new()
        }),
        Ok(None) => FavoriteSet::new(),
        Err(e) => {
            tracing::warn!(error = %e, "favorites storage unreadable; starting from an empty set");
            FavoriteSet::new()
        }
    }
}

/// What: Owner of the favorites set for one view instance.
///
/// Inputs:
/// - Built over an injectable `FavoritesSlot`; several stores may share one slot.
///
/// Output:
/// - Current set via `favorites`, change notifications via `subscribe`.
///
/// Details:
/// - Every mutation writes the slot exactly once, synchronously, before returning.
/// - A failed write is logged; the in-memory set stays authoritative for this instance.
/// - `reload` is the external-change path: the runtime calls it when the backing file
///   changes, and subscribers are notified only when membership actually changed.
#[derive(Debug)]
pub struct FavoritesStore {
    slot: Arc<dyn FavoritesSlot>,
    current: FavoriteSet,
    tx: watch::Sender<FavoriteSet>,
}

impl FavoritesStore {
    /// Load the store, reading the slot once.
    pub fn load(slot: Arc<dyn FavoritesSlot>) -> Self {
        let current = read_favorites(slot.as_ref());
        tracing::debug!(count = current.len(), "favorites loaded");
        let (tx, _rx) = watch::channel(current.clone());
        Self { slot, current, tx }
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.current
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.current.contains(id)
    }

    pub fn slot(&self) -> &Arc<dyn FavoritesSlot> {
        &self.slot
    }

    /// Receiver that observes every change to this store's set.
    pub fn subscribe(&self) -> watch::Receiver<FavoriteSet> {
        self.tx.subscribe()
    }

    /// Add `id` if absent, remove it if present. Returns the new set.
    pub fn toggle(&mut self, id: i64) -> FavoriteSet {
        let added = self.current.flip(id);
        tracing::debug!(id, added, "favorite toggled");
        self.persist();
        self.publish();
        self.current.clone()
    }

    /// Empty the set. Returns the new (empty) set.
    pub fn clear(&mut self) -> FavoriteSet {
        self.current.clear();
        tracing::debug!("favorites cleared");
        self.persist();
        self.publish();
        self.current.clone()
    }

    /// What: Re-read the slot after an external change.
    ///
    /// Output:
    /// - `true` when the in-memory set changed and subscribers were notified.
    ///
    /// Details:
    /// - A slot that cannot be read keeps the current set; a missing or malformed slot
    ///   converges to empty like `read_favorites`.
    pub fn reload(&mut self) -> bool {
        let next = match self.slot.read() {
            Ok(Some(raw)) => FavoriteSet::parse(&raw).unwrap_or_default(),
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                tracing::warn!(error = %e, "favorites reload failed; keeping current set");
                return false;
            }
        };
        if next == self.current {
            return false;
        }
        tracing::info!(count = next.len(), "favorites changed externally");
        self.current = next;
        self.publish();
        true
    }

    fn persist(&self) {
        if let Err(e) = self.slot.write(&self.current.to_json()) {
            tracing::warn!(error = %e, "failed to persist favorites; keeping in-memory state");
        }
    }

    fn publish(&self) {
        self.tx.send_replace(self.current.clone());
    }
}
