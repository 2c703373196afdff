//! Shared map and scenario fixtures for the crate's unit tests.

use std::collections::BTreeSet;

use super::*;

/// Edges (1-2:1), (1-3:3), (1-88:7), (2-3:1), (3-88:1) with node 3 critical.
pub(crate) fn peking_graph() -> Graph {
    let mut graph = Graph::new();
    graph.add_edge(1, 2, 1);
    graph.add_edge(1, 3, 3);
    graph.add_edge(1, 88, 7);
    graph.add_edge(2, 3, 1);
    graph.add_edge(3, 88, 1);
    graph.set_critical(3, true);
    graph
}

pub(crate) fn schedule(turns: Vec<Vec<LocationId>>) -> ObstacleSchedule {
    turns.into_iter().map(BTreeSet::from_iter).collect()
}

pub(crate) fn setup(
    start: LocationId,
    target: TargetSelector,
    budget: Cost,
    obstacles: Vec<Vec<LocationId>>,
) -> GameSetup {
    GameSetup {
        start,
        target,
        budget,
        obstacles: schedule(obstacles),
        config: GameConfig::default(),
    }
}

pub(crate) fn peking_game(budget: Cost, obstacles: Vec<Vec<LocationId>>) -> Game {
    Game::new(peking_graph(), setup(1, TargetSelector::Fixed(88), budget, obstacles))
        .expect("peking fixture has both endpoints")
}

/// A detour line 1-2-3 with a critical gate 2 and a costly bypass 1-4-3.
pub(crate) fn gate_graph() -> Graph {
    let mut graph = Graph::new();
    graph.add_edge(1, 2, 1);
    graph.add_edge(2, 3, 1);
    graph.add_edge(1, 4, 5);
    graph.add_edge(4, 3, 5);
    graph.set_critical(2, true);
    graph
}
