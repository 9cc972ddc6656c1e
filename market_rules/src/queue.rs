//! Bounded FIFO container shared by every capped feed in the run state.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Capacity of the UI news queue.
pub const NEWS_QUEUE_CAPACITY: usize = 32;

/// Capacity of the news id log used for deduplication.
pub const NEWS_LOG_CAPACITY: usize = 64;

/// Capacity of the whale dialogue queue.
pub const DIALOGUE_QUEUE_CAPACITY: usize = 6;

/// Capacity of the whale action log.
pub const ACTION_LOG_CAPACITY: usize = 12;

/// A FIFO with a fixed capacity. Pushing past capacity evicts from the front.
///
/// Push and eviction happen inside one `&mut self` call, so a reader can never
/// observe the queue above capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "RawBoundedQueue<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct BoundedQueue<T> {
    capacity: usize,
    items: VecDeque<T>,
}

#[derive(Deserialize)]
struct RawBoundedQueue<T> {
    capacity: usize,
    #[serde(default = "VecDeque::new")]
    items: VecDeque<T>,
}

impl<T> From<RawBoundedQueue<T>> for BoundedQueue<T> {
    fn from(raw: RawBoundedQueue<T>) -> Self {
        let mut queue = Self {
            capacity: raw.capacity.max(1),
            items: raw.items,
        };
        queue.trim();
        queue
    }
}

impl<T> BoundedQueue<T> {
    /// Create an empty queue. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an item, returning whatever was evicted to stay within capacity.
    pub fn push(&mut self, item: T) -> Vec<T> {
        self.items.push_back(item);
        self.trim()
    }

    /// Append every item in order, returning everything evicted.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        self.items.extend(items);
        self.trim()
    }

    fn trim(&mut self) -> Vec<T> {
        let overflow = self.items.len().saturating_sub(self.capacity);
        self.items.drain(..overflow).collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// Most recently pushed item.
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// The newest `count` items, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &T> {
        let skip = self.items.len().saturating_sub(count);
        self.items.iter().skip(skip)
    }
}

impl<T: PartialEq> BoundedQueue<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<'a, T> IntoIterator for &'a BoundedQueue<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
