//! Supersession and cancellation of in-flight fetches.
//!
//! Each logical fetch purpose (the product list, the detail screen) has at most one
//! authoritative request. Starting a new one cancels the previous token, and the
//! runtime applies a result only when `finish` accepts its id.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation handle passed into each fetch and checked before results are applied.
#[derive(Clone, Debug, Default)]
pub struct FetchToken(Arc<AtomicBool>);

impl FetchToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Logical purpose of a fetch; one authoritative request per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKey {
    ProductList,
    ProductDetail,
}

/// What: Track the latest request per key.
///
/// Inputs:
/// - `begin` when a fetch is issued, `cancel` when its screen goes away, `finish` when a
///   result arrives.
///
/// Output:
/// - `finish` tells the caller whether to apply the result.
///
/// Details:
/// - Ids are allocated from one counter starting at 1, so an id is never reused across keys.
#[derive(Debug)]
pub struct RequestTracker {
    next_id: u64,
    active: HashMap<RequestKey, (u64, FetchToken)>,
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self {
            next_id: 1,
            active: HashMap::new(),
        }
    }
}

impl RequestTracker {
    /// Start a request for `key`, cancelling whatever was in flight for it.
    pub fn begin(&mut self, key: RequestKey) -> (u64, FetchToken) {
        let id = self.next_id;
        self.next_id += 1;
        let token = FetchToken::new();
        if let Some((old_id, old)) = self.active.insert(key, (id, token.clone())) {
            old.cancel();
            tracing::debug!(?key, old_id, new_id = id, "superseded in-flight request");
        }
        (id, token)
    }

    /// Cancel the in-flight request for `key`, if any.
    pub fn cancel(&mut self, key: RequestKey) {
        if let Some((id, token)) = self.active.remove(&key) {
            token.cancel();
            tracing::debug!(?key, id, "cancelled in-flight request");
        }
    }

    /// Whether `id` is the live request for `key`.
    pub fn is_current(&self, key: RequestKey, id: u64) -> bool {
        self.active
            .get(&key)
            .is_some_and(|(cur, token)| *cur == id && !token.is_cancelled())
    }

    /// What: Settle a finished request.
    ///
    /// Output:
    /// - `true` when the result belongs to the live request and should be applied.
    ///   Stale or cancelled results return `false` and leave the live entry untouched.
    pub fn finish(&mut self, key: RequestKey, id: u64) -> bool {
        if self.is_current(key, id) {
            self.active.remove(&key);
            true
        } else {
            tracing::debug!(?key, id, "discarding stale response");
            false
        }
    }
}
