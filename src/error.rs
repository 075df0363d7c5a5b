use thiserror::Error;

use crate::Cell;

/// Malformed occupancy data handed to [GridGraph::from_rows](crate::GridGraph::from_rows).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("occupancy grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Reasons a round cannot be set up. These are integration bugs in the caller and a round
/// must not be started when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    #[error("a round needs at least one agent")]
    NoAgents,
    #[error("capture zone has no cells")]
    EmptyCaptureZone,
    #[error("capture zone cells are not 4-connected")]
    ZoneNotContiguous,
    #[error("{cell:?} lies outside the grid")]
    OutOfBounds { cell: Cell },
    #[error("{cell:?} is a wall")]
    Blocked { cell: Cell },
    #[error("two agents start on {cell:?}")]
    DuplicateAgent { cell: Cell },
    #[error("player starts on the agent at {cell:?}")]
    PlayerOnAgent { cell: Cell },
    #[error("move interval must be at least one tick")]
    ZeroMoveInterval,
}

/// Errors from reading the tile-map legend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileMapError {
    #[error("unknown tile {ch:?} at {cell:?}")]
    UnknownTile { ch: char, cell: Cell },
    #[error("tile map has no player start")]
    MissingPlayer,
    #[error("tile map has two player starts: {first:?} and {second:?}")]
    MultiplePlayers { first: Cell, second: Cell },
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}

/// Errors from drawing random start cells for a round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no open cell is far enough from the capture zone for the player")]
    NoPlayerCell,
    #[error("wanted {wanted} agent start cells but at most {best} fit around any player cell")]
    NotEnoughAgentCells { wanted: usize, best: usize },
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}
