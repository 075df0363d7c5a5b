use crate::agent::{AgentController, AgentEvent, Facing, PlayerContact, TickContext};
use crate::capture_zone::CaptureZone;
use crate::error::SetupError;
use crate::grid_graph::GridGraph;
use crate::solver::{astar::ManhattanAstar, PathFinder};
use crate::{Cell, DEFAULT_MOVE_INTERVAL};
use fxhash::FxHashSet;
use log::{debug, info};

/// Everything needed to start a round: the occupancy rows (`true` is a wall), the player's start
/// cell, one start cell per agent and the cells of the capture zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSetup {
    pub rows: Vec<Vec<bool>>,
    pub player: Cell,
    pub agents: Vec<Cell>,
    pub zone: Vec<Cell>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PursuitConfig {
    /// Ticks between two committed moves of the same agent.
    pub move_interval: u32,
    pub player_contact: PlayerContact,
}

impl Default for PursuitConfig {
    fn default() -> PursuitConfig {
        PursuitConfig {
            move_interval: DEFAULT_MOVE_INTERVAL,
            player_contact: PlayerContact::Block,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    #[default]
    Ongoing,
    /// Every agent is contained.
    Won,
    /// An agent reached the player.
    Lost,
}

impl RoundOutcome {
    pub fn is_over(self) -> bool {
        self != RoundOutcome::Ongoing
    }
}

/// What the renderer needs to draw one agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentView {
    pub cell: Cell,
    pub facing: Facing,
    pub contained: bool,
}

impl From<&AgentController> for AgentView {
    fn from(agent: &AgentController) -> AgentView {
        AgentView {
            cell: agent.cell(),
            facing: agent.facing(),
            contained: agent.is_contained(),
        }
    }
}

/// Owns the grid, the capture zone and every agent of a round and advances them in lockstep.
///
/// Agents are updated in index order. A step is refused if its cell held another non-contained
/// agent at the start of the tick, or if an agent earlier in the order already moved into it
/// during this tick, so the earlier agent wins a contested cell.
#[derive(Clone, Debug)]
pub struct PursuitCoordinator<P = ManhattanAstar> {
    graph: GridGraph,
    zone: CaptureZone,
    agents: Vec<AgentController>,
    finder: P,
    config: PursuitConfig,
    player_start: Cell,
    player: Cell,
    outcome: RoundOutcome,
    ticks: u64,
}

impl PursuitCoordinator<ManhattanAstar> {
    pub fn new(
        setup: RoundSetup,
        config: PursuitConfig,
    ) -> Result<PursuitCoordinator<ManhattanAstar>, SetupError> {
        PursuitCoordinator::with_finder(setup, config, ManhattanAstar::new())
    }
}

impl<P: PathFinder> PursuitCoordinator<P> {
    /// Validates the setup and builds the round around a custom [PathFinder].
    pub fn with_finder(
        setup: RoundSetup,
        config: PursuitConfig,
        finder: P,
    ) -> Result<PursuitCoordinator<P>, SetupError> {
        if config.move_interval == 0 {
            return Err(SetupError::ZeroMoveInterval);
        }
        let graph = GridGraph::from_rows(&setup.rows)?;
        let zone = CaptureZone::new(&graph, setup.zone.iter().copied())?;
        if setup.agents.is_empty() {
            return Err(SetupError::NoAgents);
        }
        check_open(&graph, setup.player)?;
        let mut seen = FxHashSet::default();
        for &cell in &setup.agents {
            check_open(&graph, cell)?;
            if !seen.insert(cell) {
                return Err(SetupError::DuplicateAgent { cell });
            }
        }
        if seen.contains(&setup.player) {
            return Err(SetupError::PlayerOnAgent {
                cell: setup.player,
            });
        }
        let mut coordinator = PursuitCoordinator {
            graph,
            zone,
            agents: setup.agents.iter().map(|&c| AgentController::new(c)).collect(),
            finder,
            config,
            player_start: setup.player,
            player: setup.player,
            outcome: RoundOutcome::Ongoing,
            ticks: 0,
        };
        coordinator.contain_agents_in_zone();
        info!(
            "Round set up on a {}x{} grid with {} agents and a {} cell capture zone",
            coordinator.graph.width(),
            coordinator.graph.height(),
            coordinator.agents.len(),
            coordinator.zone.len()
        );
        Ok(coordinator)
    }

    fn contain_agents_in_zone(&mut self) {
        for agent in self.agents.iter_mut() {
            if self.zone.contains(agent.cell()) {
                agent.contain();
            }
        }
    }

    /// Advances the round by one tick with the player standing on `player`. Once the round is
    /// won or lost further ticks change nothing.
    pub fn tick(&mut self, player: Cell) -> RoundOutcome {
        if self.outcome.is_over() {
            return self.outcome;
        }
        debug_assert!(
            self.graph.is_open(player),
            "player placed on blocked cell {:?}",
            player
        );
        self.player = player;
        self.ticks += 1;

        let snapshot = self
            .agents
            .iter()
            .filter(|a| !a.is_contained())
            .map(|a| a.cell())
            .collect::<Vec<Cell>>();
        let mut claimed = FxHashSet::default();
        let mut caught = false;
        for i in 0..self.agents.len() {
            let own = self.agents[i].cell();
            let occupied = snapshot
                .iter()
                .copied()
                .filter(|&c| c != own)
                .collect::<FxHashSet<Cell>>();
            let ctx = TickContext {
                finder: &self.finder,
                graph: &self.graph,
                zone: &self.zone,
                player,
                contact: self.config.player_contact,
                move_interval: self.config.move_interval,
                occupied: &occupied,
                claimed: &claimed,
            };
            match self.agents[i].tick(&ctx) {
                AgentEvent::Moved { to, .. } => {
                    claimed.insert(to);
                }
                AgentEvent::Contained if self.agents[i].cell() != own => {
                    claimed.insert(self.agents[i].cell());
                }
                AgentEvent::CaughtPlayer => {
                    debug!("Agent {} caught the player at {:?}", i, player);
                    caught = true;
                }
                AgentEvent::Blocked { cell } => {
                    debug!("Agent {} waits, {:?} is taken", i, cell);
                }
                _ => {}
            }
        }

        self.outcome = if caught || self.agents.iter().any(|a| a.cell() == player) {
            info!("Round lost after {} ticks", self.ticks);
            RoundOutcome::Lost
        } else if self.agents.iter().all(|a| a.is_contained()) {
            info!("Round won after {} ticks", self.ticks);
            RoundOutcome::Won
        } else {
            RoundOutcome::Ongoing
        };
        self.outcome
    }

    /// The cell the player would reach by stepping in `direction` from the last known player
    /// cell, or [None] if walls, the grid edge or the capture zone are in the way.
    pub fn player_step(&self, direction: Facing) -> Option<Cell> {
        let next = direction.step(self.player);
        (self.graph.is_open(next) && !self.zone.contains(next)).then_some(next)
    }

    /// Restarts the round from its initial setup.
    pub fn reset(&mut self) {
        for agent in self.agents.iter_mut() {
            agent.reset();
        }
        self.contain_agents_in_zone();
        self.player = self.player_start;
        self.outcome = RoundOutcome::Ongoing;
        self.ticks = 0;
        info!("Round reset");
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    pub fn player(&self) -> Cell {
        self.player
    }

    pub fn agents(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.agents.iter().map(AgentView::from)
    }

    pub fn agent(&self, index: usize) -> Option<&AgentController> {
        self.agents.get(index)
    }

    pub fn contained_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_contained()).count()
    }

    pub fn grid(&self) -> &GridGraph {
        &self.graph
    }

    pub fn zone(&self) -> &CaptureZone {
        &self.zone
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    pub fn finder(&self) -> &P {
        &self.finder
    }

    /// Ticks run since the round started or was reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

fn check_open(graph: &GridGraph, cell: Cell) -> Result<(), SetupError> {
    if !graph.in_bounds(cell) {
        Err(SetupError::OutOfBounds { cell })
    } else if !graph.is_open(cell) {
        Err(SetupError::Blocked { cell })
    } else {
        Ok(())
    }
}
