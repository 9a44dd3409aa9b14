//! A min-priority queue with in-place priority updates.
//!
//! Entries live in a [BinaryHeap] that is invalidated lazily: every insert or update pushes a
//! fresh heap entry and records the element's current priority in an index map, and heap
//! entries that no longer match the map are discarded when they surface. Ties between equal
//! priorities go to the element that was inserted first.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

struct HeapEntry<T, P> {
    priority: P,
    sequence: u64,
    element: T,
}

impl<T, P: PartialEq> Eq for HeapEntry<T, P> {}

impl<T, P: PartialEq> PartialEq for HeapEntry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.sequence == other.sequence
    }
}

impl<T, P: Ord> PartialOrd for HeapEntry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> Ord for HeapEntry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the max-heap pops the smallest priority, then the oldest entry
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Min-queue over hashable elements. Each element is resident at most once.
pub struct PriorityQueue<T, P> {
    heap: BinaryHeap<HeapEntry<T, P>>,
    resident: FxIndexMap<T, (P, u64)>,
    next_sequence: u64,
}

impl<T, P> Default for PriorityQueue<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> PriorityQueue<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord + Copy,
{
    pub fn new() -> PriorityQueue<T, P> {
        PriorityQueue {
            heap: BinaryHeap::new(),
            resident: FxIndexMap::default(),
            next_sequence: 0,
        }
    }

    /// Number of resident elements.
    pub fn len(&self) -> usize {
        self.resident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }

    pub fn contains(&self, element: &T) -> bool {
        self.resident.contains_key(element)
    }

    /// Current priority of a resident element.
    pub fn priority(&self, element: &T) -> Option<P> {
        self.resident.get(element).map(|&(p, _)| p)
    }

    /// Inserts an element. Inserting an element that is already resident behaves like
    /// [update_priority](Self::update_priority).
    pub fn insert(&mut self, element: T, priority: P) {
        if self.update_priority(&element, priority) {
            return;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.resident.insert(element.clone(), (priority, sequence));
        self.heap.push(HeapEntry {
            priority,
            sequence,
            element,
        });
    }

    /// Changes the priority of a resident element, keeping its insertion rank for tie-breaking.
    /// Returns `false` and does nothing if the element is not resident.
    pub fn update_priority(&mut self, element: &T, priority: P) -> bool {
        match self.resident.get_mut(element) {
            Some(entry) => {
                if entry.0 != priority {
                    entry.0 = priority;
                    self.heap.push(HeapEntry {
                        priority,
                        sequence: entry.1,
                        element: element.clone(),
                    });
                }
                true
            }
            None => false,
        }
    }

    /// Removes and returns the resident element with the smallest priority.
    pub fn extract_min(&mut self) -> Option<T> {
        self.extract_min_with_priority().map(|(element, _)| element)
    }

    pub fn extract_min_with_priority(&mut self) -> Option<(T, P)> {
        self.discard_stale();
        let entry = self.heap.pop()?;
        self.resident.swap_remove(&entry.element);
        Some((entry.element, entry.priority))
    }

    /// The element that [extract_min](Self::extract_min) would return.
    pub fn peek_min(&mut self) -> Option<(&T, P)> {
        self.discard_stale();
        self.heap.peek().map(|entry| (&entry.element, entry.priority))
    }

    /// Pops heap entries until the top one reflects the current state of its element.
    fn discard_stale(&mut self) {
        while let Some(top) = self.heap.peek() {
            let current = self.resident.get(&top.element);
            if current == Some(&(top.priority, top.sequence)) {
                break;
            }
            self.heap.pop();
        }
    }

    /// Drops all elements.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.resident.clear();
    }
}
