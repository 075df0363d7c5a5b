//! # grid_pursuit
//!
//! A tick-driven pursuit engine on a 4-connected grid. Pursuing agents chase a
//! player through a maze using [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! with a [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry)
//! heuristic, replanning only when the player reaches a new cell. Agents that
//! wander into the [CaptureZone] are contained for the rest of the round; the
//! round is won once every agent is contained and lost as soon as an agent
//! reaches the player.
//!
//! The engine is a library driven by an outer game loop: feed it the player's
//! cell once per tick through [PursuitCoordinator::tick] and read back the
//! [RoundOutcome] and the per-agent [AgentView]s to draw.
//!
//! ```
//! use grid_pursuit::{tilemap, Cell, PursuitConfig, PursuitCoordinator, RoundOutcome};
//!
//! let setup = tilemap::parse(&["wwwww", "wa cw", "w   w", "w  pw", "wwwww"]).unwrap();
//! let mut round = PursuitCoordinator::new(setup, PursuitConfig::default()).unwrap();
//! assert_eq!(round.tick(Cell::new(3, 3)), RoundOutcome::Ongoing);
//! ```
pub mod agent;
mod astar;
pub mod capture_zone;
pub mod coordinator;
pub mod error;
pub mod grid_graph;
pub mod solver;
pub mod spawn;
pub mod tilemap;

pub use agent::{AgentController, AgentEvent, AgentState, Facing, Path, PlayerContact};
pub use capture_zone::CaptureZone;
pub use coordinator::{AgentView, PursuitConfig, PursuitCoordinator, RoundOutcome, RoundSetup};
pub use error::{GridError, SetupError, SpawnError, TileMapError};
pub use grid_graph::GridGraph;
pub use solver::{astar::ManhattanAstar, PathFinder};
pub use spawn::SpawnRules;

/// A discrete grid coordinate where `x` is the column and `y` the row.
pub type Cell = grid_util::point::Point;

/// Cost of a single cardinal step.
pub const STEP_COST: i32 = 1;
/// Number of ticks an agent waits between two committed moves unless configured otherwise.
pub const DEFAULT_MOVE_INTERVAL: u32 = 10;

const N_SMALLVEC_SIZE: usize = 4;
