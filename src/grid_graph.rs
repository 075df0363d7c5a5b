use crate::error::GridError;
use crate::{Cell, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [GridGraph] is the immutable walkability grid of a round. The raw [bool] values in the
/// [BoolGrid] mark a cell as blocked ([true]) or open ([false]). Connected components of the
/// open cells are computed once with a [UnionFind] so that searches between disconnected
/// regions can be rejected without flood-filling.
#[derive(Clone, Debug)]
pub struct GridGraph {
    grid: BoolGrid,
    components: UnionFind<usize>,
}

impl GridGraph {
    /// Builds the graph from rows of occupancy flags, `true` meaning blocked. Every row must
    /// have the same length as the first one.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<GridGraph, GridError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut grid = BoolGrid::new(width, height, false);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &blocked) in row.iter().enumerate() {
                grid.set(x, y, blocked);
            }
        }
        let mut graph = GridGraph {
            grid,
            components: UnionFind::new(width * height),
        };
        graph.generate_components();
        debug!("Built {}x{} grid graph", width, height);
        Ok(graph)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.grid.point_in_bounds(cell)
    }

    /// Open means in bounds and not a wall.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.grid.point_in_bounds(cell) && !self.grid.get_point(cell)
    }

    /// Open cardinal neighbours, always in the order north, south, east, west.
    pub fn neighbors(&self, cell: Cell) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        [
            Cell::new(cell.x, cell.y - 1),
            Cell::new(cell.x, cell.y + 1),
            Cell::new(cell.x + 1, cell.y),
            Cell::new(cell.x - 1, cell.y),
        ]
        .into_iter()
        .filter(|&n| self.is_open(n))
        .collect()
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn component(&self, cell: Cell) -> usize {
        debug_assert!(self.grid.point_in_bounds(cell), "{:?} out of bounds", cell);
        self.components.find(self.grid.get_ix_point(&cell))
    }

    /// Checks if start and goal are open cells on the same component.
    pub fn reachable(&self, start: Cell, goal: Cell) -> bool {
        self.is_open(start)
            && self.is_open(goal)
            && self
                .components
                .equiv(self.grid.get_ix_point(&start), self.grid.get_ix_point(&goal))
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: Cell, goal: Cell) -> bool {
        !self.reachable(start, goal)
    }

    /// Links every open cell to its open south and east neighbours, which covers every edge of
    /// the 4-connected graph exactly once.
    fn generate_components(&mut self) {
        for y in 0..self.grid.height() as i32 {
            for x in 0..self.grid.width() as i32 {
                let cell = Cell::new(x, y);
                if !self.is_open(cell) {
                    continue;
                }
                let parent_ix = self.grid.get_ix_point(&cell);
                for n in [Cell::new(x, y + 1), Cell::new(x + 1, y)] {
                    if self.is_open(n) {
                        let n_ix = self.grid.get_ix_point(&n);
                        self.components.union(parent_ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for GridGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height() {
            let row = (0..self.grid.width())
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(rows: &[&str]) -> GridGraph {
        let rows = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect::<Vec<bool>>())
            .collect::<Vec<_>>();
        GridGraph::from_rows(&rows).unwrap()
    }

    #[test]
    fn rejects_empty_grid() {
        let rows: Vec<Vec<bool>> = Vec::new();
        assert_eq!(GridGraph::from_rows(&rows).unwrap_err(), GridError::Empty);
        let rows: Vec<Vec<bool>> = vec![Vec::new()];
        assert_eq!(GridGraph::from_rows(&rows).unwrap_err(), GridError::Empty);
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![vec![false, false, false], vec![false, false]];
        assert_eq!(
            GridGraph::from_rows(&rows).unwrap_err(),
            GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn out_of_range_is_blocked() {
        let g = graph(&["..", ".."]);
        assert!(g.is_open(Cell::new(1, 1)));
        assert!(!g.is_open(Cell::new(2, 0)));
        assert!(!g.is_open(Cell::new(0, -1)));
    }

    /// Corner cell of a 3x3 grid with a wall east of it.
    //  ___
    // |S# |
    // |   |
    // |   |
    //  ___
    #[test]
    fn neighbors_are_cardinal_and_open() {
        let g = graph(&[".#.", "...", "..."]);
        let n = g.neighbors(Cell::new(0, 0));
        assert_eq!(n.as_slice(), &[Cell::new(0, 1)]);
        let n = g.neighbors(Cell::new(1, 1));
        assert_eq!(
            n.as_slice(),
            &[Cell::new(1, 2), Cell::new(2, 1), Cell::new(0, 1)]
        );
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn components_split_by_wall() {
        //  ___
        // | # |
        // | # |
        //  ___
        let g = graph(&[".#.", ".#."]);
        let p1 = Cell::new(0, 0);
        let p2 = Cell::new(1, 1);
        let p3 = Cell::new(0, 1);
        let p4 = Cell::new(2, 0);
        assert!(g.unreachable(p1, p2));
        assert!(g.reachable(p1, p3));
        assert!(g.unreachable(p1, p4));
        assert_eq!(g.component(p1), g.component(p3));
    }

    /// Diagonal contact does not connect two cells on a 4-grid.
    #[test]
    fn diagonal_is_not_connected() {
        //  __
        // | #|
        // |# |
        //  __
        let g = graph(&[".#", "#."]);
        assert!(g.unreachable(Cell::new(0, 0), Cell::new(1, 1)));
    }

    /// More than 64 cells, so the occupancy bits span several words of the [BoolGrid].
    #[test]
    fn wide_grid_indexes_every_cell() {
        let mut rows = vec![vec![false; 13]; 7];
        for row in rows.iter_mut() {
            row[6] = true;
        }
        rows[6][6] = false;
        let g = GridGraph::from_rows(&rows).unwrap();
        assert_eq!((g.width(), g.height()), (13, 7));
        assert!(!g.is_open(Cell::new(6, 0)));
        assert!(g.is_open(Cell::new(6, 6)));
        assert!(g.is_open(Cell::new(12, 6)));
        assert!(!g.in_bounds(Cell::new(13, 6)));
        assert!(g.reachable(Cell::new(0, 0), Cell::new(12, 0)));
        rows[6][6] = true;
        let g = GridGraph::from_rows(&rows).unwrap();
        assert!(g.unreachable(Cell::new(0, 0), Cell::new(12, 0)));
    }

    #[test]
    fn display_round_trips_layout() {
        let g = graph(&[".#.", "..."]);
        assert_eq!(g.to_string(), ".#.\n...\n");
    }
}
