//! A typed, hash-indexed cache of [`Node`]s sharing one class, built on
//! `lru::LruCache` for bounded-size, LRU-order storage.

use crate::node::{Node, PinnedNode};
use fontcore::error::Result;
use fontcore::FaceId;
use lru::LruCache;
use parking_lot::Mutex;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A value a [`TypedCache`] can weigh for the manager's byte budget.
pub trait Weighted {
    fn cache_weight(&self) -> usize;
}

/// A cache key that can report which face it is scoped to, so
/// `reset_face` can find and drop everything tied to an evicted face.
pub trait FaceScoped {
    fn face_id(&self) -> FaceId;
}

/// Shared behavior the manager needs without knowing a cache's `K`/`V`.
pub trait ErasedCache: Send + Sync {
    fn name(&self) -> &'static str;
    fn total_weight(&self) -> usize;
    fn num_nodes(&self) -> usize;
    /// Evict the least-recently-used node that isn't pinned, walking past
    /// any pinned nodes it finds along the way. Returns the weight freed,
    /// or `None` if nothing unpinned was found to evict.
    fn evict_one(&self) -> Option<usize>;
    fn invalidate_face(&self, face_id: FaceId);
}

/// One typed cache: keys `K` to values `V`, bounded by entry count and
/// contributing to the manager's shared weight budget.
pub struct TypedCache<K, V> {
    name: &'static str,
    inner: Mutex<LruCache<K, Node<V>>>,
    cur_weight: AtomicUsize,
}

impl<K, V> TypedCache<K, V>
where
K: Eq + Hash + Clone + Send + Sync + 'static,
V: Weighted + Send + Sync + 'static,
{
    /// Backed by an unbounded `lru::LruCache`: entry-count eviction would
    /// desync `cur_weight` (the `lru` crate frees silently on overflow
    /// without a callback), so the manager's weight budget is the only
    /// eviction trigger and `evict_one` the only path that removes a node.
    pub fn new(name: &'static str) -> Arc<TypedCache<K, V>> {
        Arc::new(TypedCache {
            name,
            inner: Mutex::new(LruCache::unbounded()),
            cur_weight: AtomicUsize::new(0),
        })
    }

    /// The lookup algorithm of: a hit promotes the node to the front
    /// and returns it; a miss calls `init`, and on success inserts a
    /// fresh node and reports its weight back to the manager via the
    /// returned delta.
    pub fn lookup(&self, key: K, init: impl FnOnce() -> Result<V>) -> Result<(Arc<V>, usize)> {
        {
            let mut guard = self.inner.lock();
            if let Some(node) = guard.get(&key) {
                return Ok((node.value.clone(), 0));
            }
        }
        let value = init()?;
        let weight = value.cache_weight();
        let node = Node::new(value, weight);
        let arc = node.value.clone();
        let mut guard = self.inner.lock();
        // Another caller may have raced us to the same key; keep theirs.
        if let Some(existing) = guard.get(&key) {
            return Ok((existing.value.clone(), 0));
        }
        guard.put(key, node);
        self.cur_weight.fetch_add(weight, Ordering::Relaxed);
        Ok((arc, weight))
    }

    /// Pin a cached entry so it survives eviction until the returned
    /// handle is dropped.
    pub fn pin(self: &Arc<Self>, key: &K) -> Option<PinnedNode<V>> {
        let mut guard = self.inner.lock();
        let node = guard.get_mut(key)?;
        node.ref_count += 1;
        let value = node.value.clone();
        drop(guard);
        let cache = self.clone();
        let key = key.clone();
        Some(PinnedNode::new(value, Box::new(move || cache.release_pin(&key))))
    }

    /// Drop one pin on `key`. The node stays indexed in `inner` for as
    /// long as it is pinned, so there is nothing to do here but decrement
    /// its ref count; `evict_one` is the only thing that ever removes it.
    fn release_pin(&self, key: &K) {
        let mut inner = self.inner.lock();
        if let Some(node) = inner.get_mut(key) {
            node.ref_count = node.ref_count.saturating_sub(1);
        }
    }

    /// Re-weigh an entry already in the cache, for values (like a
    /// bitmap set) whose size grows after materialization rather than
    /// being fixed at insertion.
    pub fn reweigh(&self, key: &K, new_weight: usize) {
        let mut guard = self.inner.lock();
        let Some(node) = guard.get_mut(key) else { return };
        let old = node.weight;
        node.weight = new_weight;
        drop(guard);
        if new_weight >= old {
            self.cur_weight.fetch_add(new_weight - old, Ordering::Relaxed);
        } else {
            self.cur_weight.fetch_sub(old - new_weight, Ordering::Relaxed);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> ErasedCache for TypedCache<K, V>
where
K: Eq + Hash + Clone + Send + Sync + FaceScoped + 'static,
V: Weighted + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn total_weight(&self) -> usize {
        self.cur_weight.load(Ordering::Relaxed)
    }

    fn num_nodes(&self) -> usize {
        self.len()
    }

    /// Walks the LRU order from oldest to newest, skipping any node that
    /// is still pinned, and evicts the first one that isn't. A pinned
    /// node is left exactly where it was, so a later `lookup` on its key
    /// remains a hit returning the same `Arc`.
    fn evict_one(&self) -> Option<usize> {
        let mut guard = self.inner.lock();
        let key = guard
            .iter()
            .rev()
            .find(|(_, node)| node.ref_count == 0)
            .map(|(k, _)| k.clone())?;
        let node = guard.pop(&key)?;
        drop(guard);
        self.cur_weight.fetch_sub(node.weight, Ordering::Relaxed);
        Some(node.weight)
    }

    fn invalidate_face(&self, face_id: FaceId) {
        let mut guard = self.inner.lock();
        let doomed: Vec<K> = guard
            .iter()
            .filter(|(k, _)| k.face_id() == face_id)
            .map(|(k, _)| k.clone())
            .collect();
        for key in doomed {
            if let Some(node) = guard.pop(&key) {
                self.cur_weight.fetch_sub(node.weight, Ordering::Relaxed);
            }
        }
    }
}
