//! Open set for the search loop.
//!
//! Coordinates are stored in a min-heap keyed by `(f, discovery_order)`.
//! Lower `f` pops first; ties go to the coordinate discovered first.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use toroid_core::Coord;

#[derive(Clone, Copy, Debug)]
struct Key {
    f: f32,
    /// Set when the coordinate is first queued and kept when its priority
    /// is lowered.
    seq: u64,
}

impl Key {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

#[derive(Debug)]
struct Entry {
    key: Key,
    coord: Coord,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp_key(&other.key)
    }
}

/// A stable min-priority queue of coordinates.
///
/// Each coordinate has at most one live entry. Pushing a queued coordinate
/// with a lower `f` lowers its priority in place; entries superseded that
/// way stay in the heap and are skipped when popped.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    live: HashMap<Coord, Key>,
    seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `coord` with priority `f`.
    ///
    /// Returns `false` if it was already queued with an `f` no greater than
    /// this one, in which case nothing changes.
    pub fn push(&mut self, coord: Coord, f: f32) -> bool {
        let key = match self.live.get(&coord) {
            Some(old) if old.f <= f => return false,
            Some(old) => Key { f, seq: old.seq },
            None => {
                let seq = self.seq;
                self.seq += 1;
                Key { f, seq }
            }
        };
        self.live.insert(coord, key);
        self.heap.push(Reverse(Entry { key, coord }));
        true
    }

    /// Remove and return the coordinate with the lowest `f`.
    pub fn pop(&mut self) -> Option<(Coord, f32)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            let current = self.live.get(&entry.coord);
            if current.is_some_and(|k| k.cmp_key(&entry.key) == Ordering::Equal) {
                self.live.remove(&entry.coord);
                return Some((entry.coord, entry.key.f));
            }
        }
        None
    }

    /// Whether `coord` has a live entry.
    pub fn contains(&self, coord: Coord) -> bool {
        self.live.contains_key(&coord)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drop every entry. The discovery counter restarts.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
        self.seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32) -> Coord {
        Coord::new(x, 0, 0)
    }

    #[test]
    fn pops_lowest_f_first() {
        let mut q = Frontier::new();
        q.push(c(1), 5.0);
        q.push(c(2), 1.0);
        q.push(c(3), 3.0);
        assert_eq!(q.pop(), Some((c(2), 1.0)));
        assert_eq!(q.pop(), Some((c(3), 3.0)));
        assert_eq!(q.pop(), Some((c(1), 5.0)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn ties_pop_in_discovery_order() {
        let mut q = Frontier::new();
        for x in 0..5 {
            q.push(c(x), 2.0);
        }
        let order: Vec<_> = std::iter::from_fn(|| q.pop()).map(|(p, _)| p.x).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn lowering_priority_keeps_one_entry() {
        let mut q = Frontier::new();
        q.push(c(0), 4.0);
        q.push(c(1), 4.0);
        assert!(q.push(c(1), 2.0));
        assert!(!q.push(c(1), 3.0));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some((c(1), 2.0)));
        assert_eq!(q.pop(), Some((c(0), 4.0)));
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn lowered_entry_keeps_discovery_rank() {
        let mut q = Frontier::new();
        q.push(c(0), 9.0);
        q.push(c(1), 3.0);
        q.push(c(0), 3.0);
        assert_eq!(q.pop().map(|(p, _)| p), Some(c(0)));
    }

    #[test]
    fn clear_empties() {
        let mut q = Frontier::new();
        q.push(c(0), 1.0);
        q.clear();
        assert!(!q.contains(c(0)));
        assert_eq!(q.pop(), None);
    }
}
