use std::{cmp::Ordering, collections::BinaryHeap};

use crate::graphs::{Vertex, Weight};

#[derive(Copy, Clone, Debug)]
pub struct QueueElement {
    pub weight: Weight,
    pub vertex: Vertex,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for QueueElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip the ordering on weights. Ties are broken by vertex to keep
        // `Ord` and `PartialEq` consistent.
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for QueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueElement {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueElement {}

/// A priority queue of vertices keyed by weight.
///
/// There is no decrease key operation. Callers insert a vertex again when
/// its weight improves and drop stale entries when they pop them.
pub trait VertexWeightQueue {
    fn insert(&mut self, vertex: Vertex, weight: Weight);

    /// Removes and returns the entry with the smallest weight.
    fn pop(&mut self) -> Option<QueueElement>;

    fn is_empty(&self) -> bool;
}

#[derive(Clone, Default)]
pub struct BinaryHeapQueue {
    heap: BinaryHeap<QueueElement>,
}

impl BinaryHeapQueue {
    pub fn new() -> Self {
        BinaryHeapQueue {
            heap: BinaryHeap::new(),
        }
    }
}

impl VertexWeightQueue for BinaryHeapQueue {
    fn insert(&mut self, vertex: Vertex, weight: Weight) {
        self.heap.push(QueueElement { weight, vertex });
    }

    fn pop(&mut self) -> Option<QueueElement> {
        self.heap.pop()
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_weight_first() {
        let mut queue = BinaryHeapQueue::new();
        queue.insert(1, 5.0);
        queue.insert(2, 0.5);
        queue.insert(3, 2.0);
        queue.insert(2, 0.25);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop())
            .map(|element| (element.vertex, element.weight))
            .collect();
        assert_eq!(order, vec![(2, 0.25), (2, 0.5), (3, 2.0), (1, 5.0)]);
        assert!(queue.is_empty());
    }
}
