//! Random start cells for a round. The player is dropped near the rim of the maze, away from
//! the capture zone, and the agents are scattered at a fixed range from the player so that a
//! round is neither over at once nor hopeless.
use crate::coordinator::RoundSetup;
use crate::error::SpawnError;
use crate::grid_graph::GridGraph;
use crate::Cell;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Constraints on where [RoundSetup::random_spawn] may place the player and the agents.
///
/// Clearances are measured as the [move distance](grid_util::point::Point::move_distance) to
/// the nearest capture zone cell. Agent distances are euclidean and inclusive at both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRules {
    pub agents: usize,
    pub player_clearance: i32,
    pub agent_clearance: i32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for SpawnRules {
    /// The placement of the herding game: two agents, the player at least five cells away from
    /// the pen and the agents at least three, each agent 8 to 10 cells from the player.
    fn default() -> SpawnRules {
        SpawnRules {
            agents: 2,
            player_clearance: 5,
            agent_clearance: 3,
            min_distance: 8.0,
            max_distance: 10.0,
        }
    }
}

fn clearance(zone: &[Cell], cell: Cell) -> i32 {
    zone.iter()
        .map(|z| z.move_distance(&cell))
        .min()
        .unwrap_or(i32::MAX)
}

impl RoundSetup {
    /// Builds a setup on the given rows and capture zone with the player and agent starts drawn
    /// from `rng`. Only player cells that leave room for every agent are considered, so this
    /// fails only when no placement satisfies `rules` at all.
    pub fn random_spawn<R: Rng + ?Sized>(
        rows: Vec<Vec<bool>>,
        zone: Vec<Cell>,
        rules: &SpawnRules,
        rng: &mut R,
    ) -> Result<RoundSetup, SpawnError> {
        let graph = GridGraph::from_rows(&rows)?;
        let open = (0..graph.height() as i32)
            .flat_map(|y| (0..graph.width() as i32).map(move |x| Cell::new(x, y)))
            .filter(|&c| graph.is_open(c))
            .collect::<Vec<Cell>>();

        let agent_cells = |player: Cell| -> Vec<Cell> {
            open.iter()
                .copied()
                .filter(|&c| c != player && clearance(&zone, c) >= rules.agent_clearance)
                .filter(|c| {
                    let d = player.euclidean_distance(c);
                    d >= rules.min_distance && d <= rules.max_distance
                })
                .collect()
        };

        let player_cells = open
            .iter()
            .copied()
            .filter(|&c| clearance(&zone, c) >= rules.player_clearance)
            .collect::<Vec<Cell>>();
        if player_cells.is_empty() {
            return Err(SpawnError::NoPlayerCell);
        }

        let mut best = 0;
        let mut viable = Vec::new();
        for &player in &player_cells {
            let n = agent_cells(player).len();
            best = best.max(n);
            if n >= rules.agents {
                viable.push(player);
            }
        }
        let Some(&player) = viable.choose(rng) else {
            return Err(SpawnError::NotEnoughAgentCells {
                wanted: rules.agents,
                best,
            });
        };
        let agents = agent_cells(player)
            .choose_multiple(rng, rules.agents)
            .copied()
            .collect::<Vec<Cell>>();
        debug!("Spawned player at {:?} and agents at {:?}", player, agents);
        Ok(RoundSetup {
            rows,
            player,
            agents,
            zone,
        })
    }

    /// Same grid and capture zone with freshly drawn start cells.
    pub fn respawn<R: Rng + ?Sized>(
        &self,
        rules: &SpawnRules,
        rng: &mut R,
    ) -> Result<RoundSetup, SpawnError> {
        RoundSetup::random_spawn(self.rows.clone(), self.zone.clone(), rules, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn crowded_map_has_no_player_cell() {
        let mut rng = StdRng::seed_from_u64(0);
        let rows = vec![vec![false; 3]; 3];
        assert_eq!(
            RoundSetup::random_spawn(rows, vec![Cell::new(1, 1)], &SpawnRules::default(), &mut rng)
                .unwrap_err(),
            SpawnError::NoPlayerCell
        );
    }

    /// A single corridor never offers more than three cells in range of one player cell.
    #[test]
    fn corridor_fits_three_agents_at_most() {
        let mut rng = StdRng::seed_from_u64(0);
        let rows = vec![vec![false; 20]];
        let rules = SpawnRules {
            agents: 4,
            ..SpawnRules::default()
        };
        assert_eq!(
            RoundSetup::random_spawn(rows.clone(), vec![Cell::new(0, 0)], &rules, &mut rng)
                .unwrap_err(),
            SpawnError::NotEnoughAgentCells { wanted: 4, best: 3 }
        );
        let rules = SpawnRules {
            agents: 3,
            ..SpawnRules::default()
        };
        let setup =
            RoundSetup::random_spawn(rows, vec![Cell::new(0, 0)], &rules, &mut rng).unwrap();
        assert_eq!(setup.agents.len(), 3);
    }

    #[test]
    fn same_seed_same_spawn() {
        let rows = vec![vec![false; 20]; 20];
        let zone = vec![Cell::new(9, 9), Cell::new(10, 9)];
        let rules = SpawnRules::default();
        let a = RoundSetup::random_spawn(
            rows.clone(),
            zone.clone(),
            &rules,
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();
        let b = RoundSetup::random_spawn(rows, zone, &rules, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let rows = vec![vec![false; 3], vec![false; 2]];
        assert!(matches!(
            RoundSetup::random_spawn(rows, vec![], &SpawnRules::default(), &mut rng),
            Err(SpawnError::Grid(_))
        ));
    }
}
