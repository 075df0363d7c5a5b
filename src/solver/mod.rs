use crate::astar::astar as run_astar;
use crate::{grid_graph::GridGraph, Cell, N_SMALLVEC_SIZE};
use log::{debug, warn};
use smallvec::SmallVec;

pub mod astar;

/// A search strategy over a [GridGraph]. Implementors provide the heuristic and the successor
/// function; [find_path](Self::find_path) runs the shared A* loop with a fresh search state on
/// every call, so a solver can be reused freely by any number of agents.
pub trait PathFinder {
    type Successors: IntoIterator<Item = (Cell, i32)>;

    fn heuristic(&self, p1: &Cell, p2: &Cell) -> i32;

    fn successors(&self, graph: &GridGraph, node: &Cell) -> Self::Successors;

    /// Number of steps of a path as returned by [find_path](Self::find_path).
    fn path_cost(&self, path: &[Cell]) -> i32 {
        path.len() as i32 * crate::STEP_COST
    }

    /// Computes the cells leading from `start` (exclusive) to `goal` (inclusive). [None] means the
    /// goal cannot be reached, which callers treat as "hold position" rather than as an error.
    fn find_path(&self, graph: &GridGraph, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        debug_assert!(graph.in_bounds(start), "search start {:?} out of bounds", start);
        debug_assert!(graph.in_bounds(goal), "search goal {:?} out of bounds", goal);
        // Check if start and goal are on the same connected component.
        if graph.unreachable(start, goal) {
            debug!("{:?} is not reachable from {:?}", goal, start);
            return None;
        }
        let result = run_astar(
            &start,
            |node| self.successors(graph, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        if result.is_none() {
            warn!(
                "Reachable goal {:?} could not be pathed to from {:?}, are the components correct?",
                goal, start
            );
        }
        result.map(|(path, _cost)| path)
    }
}

pub(crate) type CardinalSuccessors = SmallVec<[(Cell, i32); N_SMALLVEC_SIZE]>;
