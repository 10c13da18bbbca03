use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Bounded memo table that evicts in insertion order.
///
/// Re-inserting a key updates its value but keeps its original slot in the
/// eviction queue; lookups never refresh it.
#[derive(Debug, Clone)]
pub(crate) struct FifoCache<K, V> {
    map: HashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
}

impl<K: Eq + Hash + Clone, V: Copy> FifoCache<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self { map: HashMap::new(), order: VecDeque::new(), capacity }
    }

    #[inline]
    pub(crate) fn get(&self, key: &K) -> Option<V> { self.map.get(key).copied() }

    /// Insert, then evict the oldest entries while over capacity.
    ///
    /// Returns how many entries were evicted.
    pub(crate) fn insert(&mut self, key: K, value: V) -> usize {
        if self.capacity == 0 {
            return 0;
        }
        if self.map.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }
        let mut evicted = 0;
        while self.map.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    if self.map.remove(&oldest).is_some() {
                        evicted += 1;
                    }
                }
                None => break,
            }
        }
        evicted
    }

    #[inline]
    pub(crate) fn len(&self) -> usize { self.map.len() }

    #[inline]
    pub(crate) fn capacity(&self) -> usize { self.capacity }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}
