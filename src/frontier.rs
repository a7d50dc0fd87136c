use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A frontier entry pointing at a node by its index in the search's node map.
#[derive(Clone, Copy, Debug)]
pub struct FrontierEntry<C> {
    /// Estimated total cost, `g + h`.
    pub f: C,
    /// Heuristic estimate to the goal.
    pub h: C,
    /// Cost from the start at the time the entry was pushed.
    pub g: C,
    pub index: usize,
}

impl<C: PartialEq> Eq for FrontierEntry<C> {}

impl<C: PartialEq> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f.eq(&other.f) && self.h.eq(&other.h) && self.index == other.index
    }
}

impl<C: Ord> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the smallest f wins, among equal f the entry closest to
        // the goal by estimate, and after that the node discovered first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Min-priority queue of [FrontierEntry] ordered by `f`, then `h`, then node index, all
/// ascending. Nodes are indexed in discovery order, which follows the neighbour enumeration
/// order, so the pop order is fully determined.
/// Stale duplicates are allowed; the search skips them when popped.
#[derive(Clone, Debug)]
pub struct Frontier<C> {
    heap: BinaryHeap<FrontierEntry<C>>,
}

impl<C: Ord> Default for Frontier<C> {
    fn default() -> Frontier<C> {
        Frontier::new()
    }
}

impl<C: Ord> Frontier<C> {
    pub fn new() -> Frontier<C> {
        Frontier {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Frontier<C> {
        Frontier {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: FrontierEntry<C>) {
        self.heap.push(entry);
    }

    /// Removes the entry with the lowest `f` (lowest `h`, then index, among ties), or [None] when
    /// empty.
    pub fn pop_min(&mut self) -> Option<FrontierEntry<C>> {
        self.heap.pop()
    }

    pub fn peek_min(&self) -> Option<&FrontierEntry<C>> {
        self.heap.peek()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Empties the frontier, keeping its allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
