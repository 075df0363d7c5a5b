use crate::grid_graph::GridGraph;
use crate::solver::{CardinalSuccessors, PathFinder};
use crate::{Cell, STEP_COST};

/// A* over the 4-connected grid with the Manhattan distance as heuristic. Since every step costs
/// the same and there are no diagonal moves, the heuristic is admissible and consistent and the
/// returned paths are shortest paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManhattanAstar;

impl ManhattanAstar {
    pub fn new() -> ManhattanAstar {
        ManhattanAstar
    }
}

impl PathFinder for ManhattanAstar {
    type Successors = CardinalSuccessors;

    fn successors(&self, graph: &GridGraph, node: &Cell) -> Self::Successors {
        graph
            .neighbors(*node)
            .into_iter()
            .map(|n| (n, STEP_COST))
            .collect()
    }

    fn heuristic(&self, p1: &Cell, p2: &Cell) -> i32 {
        p1.manhattan_distance(p2) * STEP_COST
    }
}
