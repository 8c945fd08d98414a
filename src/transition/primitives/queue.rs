use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

#[derive(Debug)]
struct SmallestHolder<K> {
    priority: f64,
    generation: u64,
    key: K,
}

impl<K> PartialEq for SmallestHolder<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for SmallestHolder<K> {}

impl<K> PartialOrd for SmallestHolder<K> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for SmallestHolder<K> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed, so the max-heap yields the smallest priority. Ties
        // are broken toward the earliest insertion.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.generation.cmp(&self.generation))
    }
}

/// A min-priority queue supporting updates of queued keys.
///
/// Updating a key pushes a fresh entry and marks the previous one stale
/// by its generation. Stale entries are discarded as they surface, so at
/// most one live entry exists per key.
#[derive(Debug)]
pub struct PriorityQueue<K> {
    heap: BinaryHeap<SmallestHolder<K>>,
    live: FxHashMap<K, u64>,
    generation: u64,
}

impl<K> Default for PriorityQueue<K>
where
    K: Hash + Eq + Copy,
{
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: FxHashMap::default(),
            generation: 0,
        }
    }
}

impl<K> PriorityQueue<K>
where
    K: Hash + Eq + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `key` at `priority`, replacing any entry already queued for it.
    pub fn add_or_update(&mut self, key: K, priority: f64) {
        self.generation += 1;
        self.live.insert(key, self.generation);
        self.heap.push(SmallestHolder {
            priority,
            generation: self.generation,
            key,
        });
    }

    /// Removes `key` from the queue, returning whether it was queued.
    pub fn remove(&mut self, key: &K) -> bool {
        self.live.remove(key).is_some()
    }

    /// Removes and returns the live entry of least priority.
    pub fn pop(&mut self) -> Option<(K, f64)> {
        while let Some(SmallestHolder {
            priority,
            generation,
            key,
        }) = self.heap.pop()
        {
            if self.live.get(&key) == Some(&generation) {
                self.live.remove(&key);
                return Some((key, priority));
            }
        }

        None
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// The number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
