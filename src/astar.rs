use fxhash::FxBuildHasher;
/// This module implements a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// with a deterministic frontier: among nodes of equal estimated cost the one that was
/// discovered first is expanded first.
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
        self.estimated_cost.eq(&other.estimated_cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the smallest estimated cost must compare greatest, and
        // among equal estimates the lowest insertion index.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Per-node bookkeeping: index of the parent in the map, best known cost from the start and
/// whether the node has been expanded.
struct Visit<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

/// Scratch state of one search. Built at the start of [astar] and dropped when it returns.
struct SearchState<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    parents: FxIndexMap<N, Visit<C>>,
}

impl<N, C> SearchState<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    fn new(start: &N) -> Self {
        let mut to_see = BinaryHeap::new();
        to_see.push(SmallestCostHolder {
            estimated_cost: Zero::zero(),
            cost: Zero::zero(),
            index: 0,
        });
        let mut parents: FxIndexMap<N, Visit<C>> = FxIndexMap::default();
        parents.insert(
            start.clone(),
            Visit {
                parent: usize::MAX,
                cost: Zero::zero(),
                closed: false,
            },
        );
        SearchState { to_see, parents }
    }

    /// Follows parent links from `index` back to the start. The start itself is left out.
    fn reverse_path(&self, index: usize) -> Vec<N> {
        let mut i = index;
        let mut path: Vec<N> = std::iter::from_fn(|| {
            self.parents.get_index(i).and_then(|(node, visit)| {
                if visit.parent == usize::MAX {
                    None
                } else {
                    i = visit.parent;
                    Some(node.clone())
                }
            })
        })
        .collect();
        path.reverse();
        path
    }
}

/// Returns the path from `start` (exclusive) to the first node accepted by `success`
/// (inclusive) together with its cost, or [None] once the frontier runs dry.
pub(crate) fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut state = SearchState::new(start);
    while let Some(SmallestCostHolder { cost, index, .. }) = state.to_see.pop() {
        let successors = {
            let (node, visit) = state.parents.get_index_mut(index)?;
            // A node may sit in the heap several times if a cheaper way to it was found later.
            // Only the first pop, which carries the best cost, is expanded.
            if visit.closed || cost > visit.cost {
                continue;
            }
            visit.closed = true;
            if success(node) {
                return Some((state.reverse_path(index), cost));
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match state.parents.entry(successor) {
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
                    let visit = e.get_mut();
                    if !visit.closed && visit.cost > new_cost {
                        visit.parent = index;
                        visit.cost = new_cost;
                        h = heuristic(e.key());
                        n = e.index();
                    } else {
                        continue;
                    }
                }
            }

            state.to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    None
}
