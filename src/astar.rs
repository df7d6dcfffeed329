//! The A* loop shared by every solver. Nodes live in an arena owned by a [SearchContext] and
//! refer to their parent by index, so the search tree needs no shared ownership. A cell maps to
//! at most one live node at a time through an [IndexMap] keyed by cell.
use crate::frontier::Frontier;
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, trace};
use num_traits::Zero;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Arena handle of a [SearchNode].
pub type NodeId = usize;

/// A cell paired with its cost bookkeeping. The origin node is its own parent.
#[derive(Clone, Debug)]
pub struct SearchNode<N, C> {
    pub cell: N,
    pub parent: NodeId,
    pub g: C,
    pub h: C,
    pub f: C,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    node: NodeId,
    state: SlotState,
}

/// How a single search ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome<N, C> {
    /// Cells from the step after the start up to and including the goal, with the goal's `g`.
    Found { path: Vec<N>, cost: C },
    /// The frontier ran dry before the goal was reached.
    Exhausted,
    /// The expansion cap was hit before the goal was reached.
    LimitReached,
}

/// Counters gathered during the last search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    /// Open nodes re-linked to a cheaper parent.
    pub relinked: usize,
    /// Closed cells pushed back onto the frontier.
    pub reopened: usize,
}

/// All state of one search: node arena, cell index, frontier and closed set.
#[derive(Debug)]
pub struct SearchContext<N, C> {
    nodes: Vec<SearchNode<N, C>>,
    slots: FxIndexMap<N, Slot>,
    frontier: Frontier<C>,
    stats: SearchStats,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: Zero + Copy + PartialOrd + Add<Output = C> + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: Zero + Copy + PartialOrd + Add<Output = C> + Debug,
{
    pub fn new() -> SearchContext<N, C> {
        SearchContext {
            nodes: Vec::new(),
            slots: FxIndexMap::default(),
            frontier: Frontier::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of nodes allocated by the last search, reopened cells counted once per reopening.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.slots.clear();
        self.frontier = Frontier::new();
        self.stats = SearchStats::default();
    }

    /// Runs A* from `start`, whose node starts at `g = start_cost`. `successors` yields
    /// neighbouring cells with the cost of moving there, in the order they should be considered.
    /// The first popped cell for which `success` holds ends the search. When `max_expansions` is
    /// set, the search stops after expanding that many nodes.
    pub fn astar<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        start_cost: C,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
        max_expansions: Option<usize>,
    ) -> SearchOutcome<N, C>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.reset();
        let h = heuristic(start);
        self.nodes.push(SearchNode {
            cell: start.clone(),
            parent: 0,
            g: start_cost,
            h,
            f: start_cost + h,
        });
        self.frontier.push(0, start_cost, start_cost + h);
        self.slots.insert(
            start.clone(),
            Slot {
                node: 0,
                state: SlotState::Open,
            },
        );

        while let Some(entry) = self.frontier.pop_min() {
            let index = entry.node;
            let (cell, g) = {
                let node = &self.nodes[index];
                // A cell may sit in the heap several times. Only the entry matching the cell's
                // current open node at its current cost is live.
                match self.slots.get(&node.cell) {
                    Some(slot) if slot.node == index && slot.state == SlotState::Open => {}
                    _ => continue,
                }
                if entry.cost > node.g {
                    continue;
                }
                if success(&node.cell) {
                    let path = self.reconstruct(index);
                    debug!(
                        "Reached {:?} from {:?} after {} expansions, path of {} cells",
                        node.cell,
                        start,
                        self.stats.expanded,
                        path.len()
                    );
                    return SearchOutcome::Found { path, cost: node.g };
                }
                (node.cell.clone(), node.g)
            };
            if max_expansions.is_some_and(|limit| self.stats.expanded >= limit) {
                debug!(
                    "Expansion cap of {} reached with {} entries still queued",
                    self.stats.expanded,
                    self.frontier.len()
                );
                return SearchOutcome::LimitReached;
            }
            self.stats.expanded += 1;

            for (successor, move_cost) in successors(&cell) {
                let new_cost = g + move_cost;
                match self.slots.entry(successor) {
                    Vacant(e) => {
                        let h = heuristic(e.key());
                        let n = self.nodes.len();
                        self.nodes.push(SearchNode {
                            cell: e.key().clone(),
                            parent: index,
                            g: new_cost,
                            h,
                            f: new_cost + h,
                        });
                        self.frontier.push(n, new_cost, new_cost + h);
                        e.insert(Slot {
                            node: n,
                            state: SlotState::Open,
                        });
                    }
                    Occupied(mut e) => {
                        let slot = *e.get();
                        if new_cost >= self.nodes[slot.node].g {
                            continue;
                        }
                        let h = heuristic(e.key());
                        match slot.state {
                            SlotState::Open => {
                                trace!("Re-linking open {:?} at cost {:?}", e.key(), new_cost);
                                let node = &mut self.nodes[slot.node];
                                node.parent = index;
                                node.g = new_cost;
                                node.h = h;
                                node.f = new_cost + h;
                                self.frontier.push(slot.node, new_cost, new_cost + h);
                                self.stats.relinked += 1;
                            }
                            SlotState::Closed => {
                                trace!("Reopening closed {:?} at cost {:?}", e.key(), new_cost);
                                let n = self.nodes.len();
                                self.nodes.push(SearchNode {
                                    cell: e.key().clone(),
                                    parent: index,
                                    g: new_cost,
                                    h,
                                    f: new_cost + h,
                                });
                                self.frontier.push(n, new_cost, new_cost + h);
                                e.insert(Slot {
                                    node: n,
                                    state: SlotState::Open,
                                });
                                self.stats.reopened += 1;
                            }
                        }
                    }
                }
            }
            if let Some(slot) = self.slots.get_mut(&cell) {
                slot.state = SlotState::Closed;
            }
        }
        debug!(
            "Frontier exhausted after {} expansions from {:?}",
            self.stats.expanded, start
        );
        SearchOutcome::Exhausted
    }

    /// Walks parent links from `goal` back to the origin, leaving the origin out, and returns the
    /// cells in travel order.
    fn reconstruct(&self, goal: NodeId) -> Vec<N> {
        let mut path = Vec::new();
        let mut index = goal;
        while self.nodes[index].parent != index {
            path.push(self.nodes[index].cell.clone());
            index = self.nodes[index].parent;
        }
        path.reverse();
        path
    }
}
