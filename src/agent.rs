use crate::capture_zone::CaptureZone;
use crate::grid_graph::GridGraph;
use crate::solver::PathFinder;
use crate::Cell;
use fxhash::FxHashSet;
use log::debug;
use std::collections::VecDeque;

/// Cells still to walk, nearest first. The agent's own cell is never part of it.
pub type Path = VecDeque<Cell>;

/// Direction an agent last moved in. Purely cosmetic, for the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    #[default]
    North,
    South,
    East,
    West,
}

impl Facing {
    /// The facing of a single cardinal step from `from` to `to`, [None] if the two cells are not
    /// cardinal neighbours.
    pub fn between(from: Cell, to: Cell) -> Option<Facing> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Facing::North),
            (0, 1) => Some(Facing::South),
            (1, 0) => Some(Facing::East),
            (-1, 0) => Some(Facing::West),
            _ => None,
        }
    }

    /// The neighbouring cell one step in this direction.
    pub fn step(self, cell: Cell) -> Cell {
        match self {
            Facing::North => Cell::new(cell.x, cell.y - 1),
            Facing::South => Cell::new(cell.x, cell.y + 1),
            Facing::East => Cell::new(cell.x + 1, cell.y),
            Facing::West => Cell::new(cell.x - 1, cell.y),
        }
    }
}

/// What an agent does when the next cell of its path is the player's cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerContact {
    /// The step is refused and reported as [AgentEvent::CaughtPlayer].
    #[default]
    Block,
    /// The agent steps onto the player's cell.
    Occupy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentState {
    /// No usable path: either none was computed yet or the player cannot be reached.
    SearchingPath,
    FollowingPath(Path),
    /// Entered the capture zone. Terminal.
    Contained,
}

/// Outcome of a single agent tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentEvent {
    /// Nothing to walk.
    Idle,
    /// Movement interval still running.
    Waiting,
    Moved { from: Cell, to: Cell },
    /// The next cell is taken by another agent; the step is retried next tick.
    Blocked { cell: Cell },
    /// The next cell is the player's.
    CaughtPlayer,
    Contained,
}

/// Read-only view of the rest of the round that an agent needs during its tick.
pub(crate) struct TickContext<'a, P> {
    pub finder: &'a P,
    pub graph: &'a GridGraph,
    pub zone: &'a CaptureZone,
    pub player: Cell,
    pub contact: PlayerContact,
    pub move_interval: u32,
    /// Cells of the other non-contained agents at the start of the tick.
    pub occupied: &'a FxHashSet<Cell>,
    /// Cells entered by agents earlier in this tick.
    pub claimed: &'a FxHashSet<Cell>,
}

/// One pursuing agent. Replans with A* whenever the player reaches a new cell and walks its
/// path one cell per movement interval.
#[derive(Clone, Debug)]
pub struct AgentController {
    start: Cell,
    cell: Cell,
    state: AgentState,
    countdown: u32,
    last_target: Option<Cell>,
    facing: Facing,
    replans: usize,
}

impl AgentController {
    pub fn new(start: Cell) -> AgentController {
        AgentController {
            start,
            cell: start,
            state: AgentState::SearchingPath,
            countdown: 0,
            last_target: None,
            facing: Facing::default(),
            replans: 0,
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_contained(&self) -> bool {
        self.state == AgentState::Contained
    }

    /// The remaining path, empty unless the agent is following one.
    pub fn path(&self) -> impl Iterator<Item = &Cell> {
        match &self.state {
            AgentState::FollowingPath(path) => Some(path.iter()),
            _ => None,
        }
        .into_iter()
        .flatten()
    }

    /// How many times this agent has run a path search.
    pub fn replans(&self) -> usize {
        self.replans
    }

    /// Player cell the current path was planned against.
    pub fn last_target(&self) -> Option<Cell> {
        self.last_target
    }

    /// Puts the agent back on its start cell with no path, as at the beginning of a round.
    pub fn reset(&mut self) {
        *self = AgentController::new(self.start);
    }

    /// Marks the agent as contained without moving it, used when it starts inside the zone.
    pub(crate) fn contain(&mut self) {
        self.state = AgentState::Contained;
    }

    pub(crate) fn tick<P: PathFinder>(&mut self, ctx: &TickContext<'_, P>) -> AgentEvent {
        if self.is_contained() {
            return AgentEvent::Contained;
        }
        if self.last_target != Some(ctx.player) {
            self.replan(ctx);
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            if self.countdown > 0 {
                return AgentEvent::Waiting;
            }
        }
        self.advance(ctx)
    }

    fn replan<P: PathFinder>(&mut self, ctx: &TickContext<'_, P>) {
        self.replans += 1;
        self.last_target = Some(ctx.player);
        self.state = match ctx.finder.find_path(ctx.graph, self.cell, ctx.player) {
            Some(path) if !path.is_empty() => {
                debug!(
                    "Agent at {:?} planned {} steps to {:?}",
                    self.cell,
                    path.len(),
                    ctx.player
                );
                AgentState::FollowingPath(path.into())
            }
            Some(_) => AgentState::SearchingPath,
            None => {
                debug!(
                    "Agent at {:?} has no path to {:?}, holding position",
                    self.cell, ctx.player
                );
                AgentState::SearchingPath
            }
        };
    }

    fn advance<P: PathFinder>(&mut self, ctx: &TickContext<'_, P>) -> AgentEvent {
        let path = match &mut self.state {
            AgentState::FollowingPath(path) => path,
            _ => return AgentEvent::Idle,
        };
        let Some(&next) = path.front() else {
            self.state = AgentState::SearchingPath;
            return AgentEvent::Idle;
        };
        debug_assert!(ctx.graph.in_bounds(next), "path leaves the grid at {:?}", next);
        debug_assert!(
            Facing::between(self.cell, next).is_some(),
            "path jumps from {:?} to {:?}",
            self.cell,
            next
        );
        if next == ctx.player && ctx.contact == PlayerContact::Block {
            return AgentEvent::CaughtPlayer;
        }
        if ctx.occupied.contains(&next) || ctx.claimed.contains(&next) {
            return AgentEvent::Blocked { cell: next };
        }
        path.pop_front();
        let exhausted = path.is_empty();
        let from = self.cell;
        self.facing = Facing::between(from, next).unwrap_or(self.facing);
        self.cell = next;
        self.countdown = ctx.move_interval;
        if ctx.zone.contains(next) {
            debug!("Agent entered the capture zone at {:?}", next);
            self.state = AgentState::Contained;
            return AgentEvent::Contained;
        }
        if exhausted {
            self.state = AgentState::SearchingPath;
        }
        AgentEvent::Moved { from, to: next }
    }
}
