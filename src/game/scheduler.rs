//! Cooperative timer queue on a logical millisecond clock.
//!
//! Every entry carries the epoch of the round that scheduled it. The queue
//! itself does not interpret epochs; the session drops entries whose epoch
//! is no longer current when they come due.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A scheduled callback, due at `due_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled<T> {
    /// Logical time the entry fires.
    pub due_ms: u64,
    /// Round epoch the entry belongs to.
    pub epoch: u64,
    /// The work to perform.
    pub task: T,
}

#[derive(Debug)]
struct Entry<T> {
    due_ms: u64,
    seq: u64,
    epoch: u64,
    task: T,
}

impl<T> Entry<T> {
    const fn key(&self) -> (u64, u64) {
        (self.due_ms, self.seq)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-heap of pending tasks ordered by due time, then insertion order.
#[derive(Debug)]
pub struct Scheduler<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire at `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, epoch: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            due_ms,
            seq,
            epoch,
            task,
        }));
    }

    /// Remove and return the earliest entry due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Scheduled<T>> {
        if self.heap.peek()?.0.due_ms > now_ms {
            return None;
        }
        self.heap.pop().map(|Reverse(e)| Scheduled {
            due_ms: e.due_ms,
            epoch: e.epoch,
            task: e.task,
        })
    }

    /// Due time of the earliest pending entry.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(e)| e.due_ms)
    }

    /// Number of pending entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending entry.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(300, 1, 'c');
        s.schedule(100, 1, 'a');
        s.schedule(200, 1, 'b');

        assert_eq!(s.next_due(), Some(100));
        assert!(s.pop_due(50).is_none());

        let order: Vec<char> = std::iter::from_fn(|| s.pop_due(1000).map(|e| e.task)).collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
        assert!(s.is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(100, 1, 1);
        s.schedule(100, 1, 2);
        s.schedule(100, 1, 3);

        let order: Vec<i32> = std::iter::from_fn(|| s.pop_due(100).map(|e| e.task)).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_only_due_entries_pop() {
        let mut s = Scheduler::new();
        s.schedule(100, 1, "early");
        s.schedule(500, 2, "late");

        let first = s.pop_due(200).unwrap();
        assert_eq!(first.task, "early");
        assert_eq!(first.epoch, 1);
        assert!(s.pop_due(200).is_none());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut s = Scheduler::new();
        s.schedule(1, 0, ());
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.next_due(), None);
    }
}
