use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One frontier entry. `node` is the arena handle of the search node it was pushed for, `g` the
/// cost that node had at push time so that superseded entries can be recognised on pop.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierEntry<C> {
    pub estimated_cost: C,
    pub cost: C,
    pub seq: usize,
    pub node: usize,
}

impl<C: PartialOrd> Eq for FrontierEntry<C> {}

impl<C: PartialOrd> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: PartialOrd> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PartialOrd> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest entry, so the smallest estimated cost must compare
        // greatest. Ties go to the larger cost (deeper node), then to the earlier push.
        let by = |a: &C, b: &C| a.partial_cmp(b).unwrap_or(Ordering::Equal);
        by(&other.estimated_cost, &self.estimated_cost)
            .then_with(|| by(&self.cost, &other.cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-ordered open set. Entries pop in a fixed total order: lowest `f`, then highest `g`, then
/// insertion order.
#[derive(Debug)]
pub(crate) struct Frontier<C> {
    heap: BinaryHeap<FrontierEntry<C>>,
    next_seq: usize,
}

impl<C: PartialOrd + Copy> Frontier<C> {
    pub fn new() -> Frontier<C> {
        Frontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, node: usize, cost: C, estimated_cost: C) {
        self.heap.push(FrontierEntry {
            estimated_cost,
            cost,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    pub fn pop_min(&mut self) -> Option<FrontierEntry<C>> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
