use fxhash::FxBuildHasher;
/// This module implements a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// that keeps an explicit closed set and hands back the path from the goal towards the start,
/// which is the order in which the game consumes it.
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then favours the node with the largest cost so far,
        // then the node that was discovered first.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => match self.cost.cmp(&other.cost) {
                Ordering::Equal => other.index.cmp(&self.index),
                s => s,
            },
            s => s,
        }
    }
}

/// Bookkeeping for a discovered node: the index of its predecessor, the best known cost from
/// the start and whether the node has been expanded.
#[derive(Clone, Copy, Debug)]
struct Visit<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

/// Counters describing the work done by the last search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes that were popped from the open set and expanded.
    pub expanded: usize,
    /// Distinct nodes that received a cost.
    pub discovered: usize,
}

/// Transient state of a single A* search. A context is meant to be created for one search and
/// dropped afterwards; [SearchContext::astar] resets it before running.
pub struct SearchContext<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    parents: FxIndexMap<N, Visit<C>>,
    expanded: usize,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> SearchContext<N, C> {
        SearchContext {
            to_see: BinaryHeap::new(),
            parents: FxIndexMap::default(),
            expanded: 0,
        }
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            expanded: self.expanded,
            discovered: self.parents.len(),
        }
    }

    /// Best known cost from the start for a node discovered by the last search.
    pub fn cost_to(&self, node: &N) -> Option<C> {
        self.parents.get(node).map(|visit| visit.cost)
    }

    /// Whether the node was expanded, and its cost thereby finalized, in the last search.
    pub fn is_closed(&self, node: &N) -> bool {
        self.parents.get(node).is_some_and(|visit| visit.closed)
    }

    /// Follows the predecessor links from `index` up to, but excluding, the root of the search.
    fn backtrack(&self, index: usize) -> Vec<N> {
        std::iter::successors(Some(index), |&i| {
            self.parents.get_index(i).map(|(_, visit)| visit.parent)
        })
        .map_while(|i| self.parents.get_index(i))
        .filter(|(_, visit)| visit.parent != usize::MAX)
        .map(|(node, _)| node.clone())
        .collect()
    }

    /// Runs A* from `start` until a node satisfying `success` is popped from the open set.
    ///
    /// Returns the path from the reached node back to the node right after `start` together
    /// with its total cost, or [None] if the open set runs dry first. `heuristic` has to be
    /// consistent for the costs of closed nodes to be final.
    pub fn astar<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> Option<(Vec<N>, C)>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.to_see.clear();
        self.parents.clear();
        self.expanded = 0;

        self.to_see.push(SmallestCostHolder {
            estimated_cost: Zero::zero(),
            cost: Zero::zero(),
            index: 0,
        });
        self.parents.insert(
            start.clone(),
            Visit {
                parent: usize::MAX,
                cost: Zero::zero(),
                closed: false,
            },
        );
        while let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() {
            let successors = {
                let (node, visit) = self.parents.get_index_mut(index)?;
                // A node may sit in the heap several times if a cheaper way to it was found
                // after it was first pushed. Only the entry carrying the best cost is expanded.
                if visit.closed || cost > visit.cost {
                    continue;
                }
                if success(node) {
                    let path = self.backtrack(index);
                    return Some((path, cost));
                }
                visit.closed = true;
                self.expanded += 1;
                successors(node)
            };
            for (successor, move_cost) in successors {
                let new_cost = cost + move_cost;
                let h; // heuristic(&successor)
                let n; // index for successor
                match self.parents.entry(successor) {
                    Vacant(e) => {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert(Visit {
                            parent: index,
                            cost: new_cost,
                            closed: false,
                        });
                    }
                    Occupied(mut e) => {
                        if e.get().cost > new_cost {
                            h = heuristic(e.key());
                            n = e.index();
                            e.insert(Visit {
                                parent: index,
                                cost: new_cost,
                                closed: false,
                            });
                        } else {
                            continue;
                        }
                    }
                }

                self.to_see.push(SmallestCostHolder {
                    estimated_cost: new_cost + h,
                    cost: new_cost,
                    index: n,
                });
            }
        }
        None
    }
}
