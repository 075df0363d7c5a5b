use crate::error::SetupError;
use crate::grid_graph::GridGraph;
use crate::Cell;
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use petgraph::unionfind::UnionFind;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// The pen: a fixed, 4-connected set of open cells. An agent that steps onto any of them is
/// contained for the rest of the round.
#[derive(Clone, Debug)]
pub struct CaptureZone {
    cells: FxIndexSet<Cell>,
}

impl CaptureZone {
    /// Validates the cells against the grid: at least one cell, all of them open and
    /// together forming a single 4-connected region.
    pub fn new<I>(graph: &GridGraph, cells: I) -> Result<CaptureZone, SetupError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells = cells.into_iter().collect::<FxIndexSet<Cell>>();
        if cells.is_empty() {
            return Err(SetupError::EmptyCaptureZone);
        }
        for &cell in &cells {
            if !graph.in_bounds(cell) {
                return Err(SetupError::OutOfBounds { cell });
            }
            if !graph.is_open(cell) {
                return Err(SetupError::Blocked { cell });
            }
        }
        let mut components = UnionFind::new(cells.len());
        for (ix, cell) in cells.iter().enumerate() {
            for n in [Cell::new(cell.x, cell.y + 1), Cell::new(cell.x + 1, cell.y)] {
                if let Some(n_ix) = cells.get_index_of(&n) {
                    components.union(ix, n_ix);
                }
            }
        }
        let root = components.find(0);
        if (1..cells.len()).any(|ix| components.find(ix) != root) {
            return Err(SetupError::ZoneNotContiguous);
        }
        Ok(CaptureZone { cells })
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
