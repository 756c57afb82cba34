//! Keyed query cache with request deduplication and tag invalidation.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::debug;

use super::lock::mutex_lock;
use super::registry::TagRegistry;
use super::tags::Tag;

const LOCK_TARGET: &str = "trailpost_client::cache::query";

/// A cache key that knows which tags its entry provides.
pub trait TaggedKey: Clone + Eq + Hash + Send + Sync + 'static {
    fn provides(&self) -> Vec<Tag>;
}

type SharedFetch<V, E> = Shared<BoxFuture<'static, Result<V, E>>>;

struct InFlight<V, E> {
    id: u64,
    fetch: SharedFetch<V, E>,
    invalidated: bool,
}

struct Slot<V, E> {
    value: Option<V>,
    stale: bool,
    in_flight: Option<InFlight<V, E>>,
}

struct State<K, V, E> {
    slots: HashMap<K, Slot<V, E>>,
    registry: TagRegistry<K>,
    next_id: u64,
}

/// Shared, clonable query cache.
///
/// Fresh entries are served without fetching. Concurrent reads of a key
/// with no fresh entry join one fetch. Failed fetches leave the entry as
/// it was.
pub struct QueryCache<K, V, E> {
    state: Arc<Mutex<State<K, V, E>>>,
}

impl<K, V, E> Clone for QueryCache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<K, V, E> Default for QueryCache<K, V, E>
where
    K: TaggedKey,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> QueryCache<K, V, E>
where
    K: TaggedKey,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                slots: HashMap::new(),
                registry: TagRegistry::new(),
                next_id: 0,
            })),
        }
    }

    /// Serve `key` from cache, join its in-flight fetch, or start `fetch`.
    ///
    /// `fetch` is called under the cache lock and must only build the future.
    pub async fn query<F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let (id, shared) = {
            let mut guard = mutex_lock(&self.state, LOCK_TARGET, "query");
            let state = &mut *guard;

            let slot = state.slots.entry(key.clone()).or_insert_with(|| Slot {
                value: None,
                stale: false,
                in_flight: None,
            });

            if let Some(value) = slot.value.as_ref() {
                if !slot.stale {
                    return Ok(value.clone());
                }
            }

            // A fetch invalidated in flight predates the mutation; later reads start a new one.
            match slot.in_flight.as_ref().filter(|in_flight| !in_flight.invalidated) {
                Some(in_flight) => (in_flight.id, in_flight.fetch.clone()),
                None => {
                    let id = state.next_id;
                    state.next_id += 1;
                    let shared = fetch().boxed().shared();
                    slot.in_flight = Some(InFlight {
                        id,
                        fetch: shared.clone(),
                        invalidated: false,
                    });
                    state.registry.register(key.clone(), key.provides());
                    (id, shared)
                }
            }
        };

        let result = shared.await;
        self.settle(&key, id, &result);
        result
    }

    /// Await `operation`; on success invalidate the tags `invalidates` derives from its output.
    pub async fn mutate<T, Err, Fut, I>(&self, operation: Fut, invalidates: I) -> Result<T, Err>
    where
        Fut: Future<Output = Result<T, Err>>,
        I: FnOnce(&T) -> Vec<Tag>,
    {
        let output = operation.await?;
        self.invalidate(&invalidates(&output));
        Ok(output)
    }

    /// Mark every entry reached by `tags` stale, including fetches still in flight.
    pub fn invalidate(&self, tags: &[Tag]) {
        let mut guard = mutex_lock(&self.state, LOCK_TARGET, "invalidate");
        let state = &mut *guard;

        for tag in tags {
            for key in state.registry.keys_for(tag) {
                if let Some(slot) = state.slots.get_mut(&key) {
                    if slot.value.is_some() {
                        slot.stale = true;
                    }
                    if let Some(in_flight) = slot.in_flight.as_mut() {
                        in_flight.invalidated = true;
                    }
                }
            }
            debug!(target: LOCK_TARGET, tag = %tag, "invalidated cache tag");
        }
    }

    /// True when `key` holds a value that will refetch on next access.
    pub fn is_stale(&self, key: &K) -> bool {
        let guard = mutex_lock(&self.state, LOCK_TARGET, "is_stale");
        guard
            .slots
            .get(key)
            .is_some_and(|slot| slot.value.is_some() && slot.stale)
    }

    /// True when `key` holds a value that is served without fetching.
    pub fn is_fresh(&self, key: &K) -> bool {
        let guard = mutex_lock(&self.state, LOCK_TARGET, "is_fresh");
        guard
            .slots
            .get(key)
            .is_some_and(|slot| slot.value.is_some() && !slot.stale)
    }

    fn settle(&self, key: &K, id: u64, result: &Result<V, E>) {
        let mut guard = mutex_lock(&self.state, LOCK_TARGET, "settle");
        let state = &mut *guard;

        let Some(slot) = state.slots.get_mut(key) else {
            return;
        };
        // Joined callers settle too; only the matching fetch is applied.
        if slot.in_flight.as_ref().is_none_or(|in_flight| in_flight.id != id) {
            return;
        }
        let Some(in_flight) = slot.in_flight.take() else {
            return;
        };

        if let Ok(value) = result {
            slot.value = Some(value.clone());
            slot.stale = in_flight.invalidated;
        } else if slot.value.is_none() {
            state.slots.remove(key);
            state.registry.unregister(key);
        }
    }
}
