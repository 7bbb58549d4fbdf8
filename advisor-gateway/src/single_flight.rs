//! Coalesces concurrent fetches of one key into a single upstream call.
//!
//! The first caller for a key becomes the leader and gets a [`LeaderGuard`].
//! Later callers get a receiver and wait for the leader's result. Dropping
//! the guard without completing (cancellation, budget exceeded) removes the
//! in-flight entry and wakes waiters, who then retry.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;

/// In-flight table keyed by cache key.
pub struct SingleFlight<T> {
    inflight: DashMap<String, watch::Receiver<Option<T>>>,
}

/// What a caller should do for a key.
pub enum Flight<'a, T> {
    Leader(LeaderGuard<'a, T>),
    Follower(watch::Receiver<Option<T>>),
}

impl<T: Clone + Send + Sync> SingleFlight<T> {
    pub fn new() -> Self {
        Self {
            inflight: DashMap::new(),
        }
    }

    pub fn join(&self, key: &str) -> Flight<'_, T> {
        match self.inflight.entry(key.to_string()) {
            Entry::Occupied(e) => Flight::Follower(e.get().clone()),
            Entry::Vacant(v) => {
                let (tx, rx) = watch::channel(None);
                v.insert(rx);
                Flight::Leader(LeaderGuard {
                    key: key.to_string(),
                    tx,
                    table: &self.inflight,
                })
            }
        }
    }

    /// Wait for a leader's result. `None` if the leader gave up.
    pub async fn wait(mut rx: watch::Receiver<Option<T>>) -> Option<T> {
        rx.wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|v| (*v).clone())
    }

    /// Number of keys currently being fetched.
    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }
}

impl<T: Clone + Send + Sync> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by the leader. Removes the in-flight entry on drop.
pub struct LeaderGuard<'a, T> {
    key: String,
    tx: watch::Sender<Option<T>>,
    table: &'a DashMap<String, watch::Receiver<Option<T>>>,
}

impl<T> LeaderGuard<'_, T> {
    /// Publish the result to every waiter.
    pub fn complete(self, value: T) {
        self.tx.send_replace(Some(value));
    }
}

impl<T> Drop for LeaderGuard<'_, T> {
    fn drop(&mut self) {
        self.table.remove(&self.key);
    }
}
