use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::graph::Graph;
use crate::state::GameState;
use crate::types::*;

mod engine;
pub mod routes;
#[cfg(test)]
pub(crate) mod test_support;

pub use routes::{enumerate_simple_paths, shortest_route, valid_routes};

pub struct Game {
    graph: Graph,
    obstacles: ObstacleSchedule,
    state: GameState,
    config: GameConfig,
    initial_budget: Cost,
    log: Vec<TurnEvent>,
}

impl Game {
    pub fn new(mut graph: Graph, setup: GameSetup) -> Result<Self, GameError> {
        let GameSetup { start, target, budget, obstacles, config } = setup;
        if !graph.contains(start) {
            return Err(GameError::UnknownLocation(start));
        }
        let target = resolve_target(&graph, target, start)?;
        graph.set_start_location(start);

        Ok(Self {
            graph,
            obstacles,
            state: GameState::new(start, target, budget),
            config,
            initial_budget: budget,
            log: Vec::new(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &ObstacleSchedule {
        &self.obstacles
    }

    pub fn initial_budget(&self) -> Cost {
        self.initial_budget
    }

    pub fn log(&self) -> &[TurnEvent] {
        &self.log
    }

    pub fn current_turn(&self) -> u64 {
        self.state.turn
    }

    pub fn path(&self) -> &[LocationId] {
        &self.state.path
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u32(self.state.current);
        hasher.write_u32(self.state.target);
        hasher.write_i64(self.state.budget);
        hasher.write_u64(self.state.turn);
        hasher.write_u32(self.state.stalled_turns);
        for &location in &self.state.path {
            hasher.write_u32(location);
        }
        for node in self.graph.nodes() {
            hasher.write_u32(node.id());
            hasher.write_u8(u8::from(node.is_occupied()));
        }
        hasher.finish()
    }
}

fn resolve_target(
    graph: &Graph,
    selector: TargetSelector,
    start: LocationId,
) -> Result<LocationId, GameError> {
    let target = match selector {
        TargetSelector::Fixed(id) => id,
        TargetSelector::PreferredOrHighest(id) if graph.contains(id) => id,
        TargetSelector::PreferredOrHighest(_) | TargetSelector::HighestId => {
            graph.highest_location().unwrap_or(start)
        }
    };
    if !graph.contains(target) {
        return Err(GameError::UnknownLocation(target));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn new_game_starts_at_start_with_full_budget() {
        let game = peking_game(5, vec![]);
        assert_eq!(game.state().current, 1);
        assert_eq!(game.state().target, 88);
        assert_eq!(game.state().budget, 5);
        assert_eq!(game.path(), &[1]);
        assert_eq!(game.current_turn(), 0);
        assert_eq!(game.graph().start_location(), Some(1));
    }

    #[test]
    fn unknown_start_is_rejected() {
        let result = Game::new(peking_graph(), setup(7, TargetSelector::Fixed(88), 5, vec![]));
        assert_eq!(result.err(), Some(GameError::UnknownLocation(7)));
    }

    #[test]
    fn unknown_fixed_target_is_rejected() {
        let result = Game::new(peking_graph(), setup(1, TargetSelector::Fixed(4), 5, vec![]));
        assert_eq!(result.err(), Some(GameError::UnknownLocation(4)));
    }

    #[test]
    fn target_selection_policies() {
        let mut graph = peking_graph();
        graph.add_edge(88, 90, 1);

        let highest =
            Game::new(graph.clone(), setup(1, TargetSelector::HighestId, 5, vec![])).unwrap();
        assert_eq!(highest.state().target, 90);

        let preferred =
            Game::new(graph.clone(), setup(1, TargetSelector::PreferredOrHighest(88), 5, vec![]))
                .unwrap();
        assert_eq!(preferred.state().target, 88);

        let fallback =
            Game::new(graph, setup(1, TargetSelector::PreferredOrHighest(42), 5, vec![])).unwrap();
        assert_eq!(fallback.state().target, 90);
    }

    #[test]
    fn snapshot_hash_tracks_state_changes() {
        let mut game = peking_game(5, vec![vec![2, 3]]);
        let fresh = peking_game(5, vec![vec![2, 3]]);
        assert_eq!(game.snapshot_hash(), fresh.snapshot_hash());

        game.advance(1).unwrap();
        assert_ne!(game.snapshot_hash(), fresh.snapshot_hash());
    }
}
