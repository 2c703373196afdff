use std::collections::BTreeSet;

use express_core::{
    Game, GameConfig, GameError, GameSetup, Graph, LocationId, MapDescription, ObstacleSchedule,
    Scenario, TargetSelector, build_graph, enumerate_simple_paths, format_route,
};

const PEKING_JSON: &str = r#"{
    "locations": {"number": 4, "critical": [3]},
    "connections": {
        "source": [1, 1, 1, 2, 3],
        "target": [2, 3, 88, 3, 88],
        "price": [1, 3, 7, 1, 1]
    }
}"#;

fn peking_map() -> Graph {
    let description = MapDescription::from_json(PEKING_JSON).expect("fixture map decodes");
    build_graph(&description).expect("fixture map builds")
}

fn obstacles() -> ObstacleSchedule {
    [vec![2, 3], vec![3], vec![88], vec![88]]
        .into_iter()
        .map(|turn| turn.into_iter().collect::<BTreeSet<LocationId>>())
        .collect()
}

fn play(budget: i64) -> Result<Vec<LocationId>, GameError> {
    let setup = GameSetup {
        start: 1,
        target: TargetSelector::PreferredOrHighest(88),
        budget,
        obstacles: obstacles(),
        config: GameConfig::default(),
    };
    Game::new(peking_map(), setup)?.run()
}

#[test]
fn test_all_simple_paths_follow_edge_order() {
    assert_eq!(
        enumerate_simple_paths(&peking_map(), 1, 88),
        vec![vec![1, 2, 3, 88], vec![1, 3, 88], vec![1, 88]]
    );
}

#[test]
fn test_budget_one_is_insufficient() {
    assert_eq!(
        play(1),
        Err(GameError::InsufficientBudget { location: 1, target: 88, budget: 1 })
    );
}

#[test]
fn test_budget_three_waits_out_blocked_critical_node() {
    assert_eq!(play(3), Ok(vec![1, 2, 2, 2, 3, 88]));
}

#[test]
fn test_budget_five_takes_critical_shortcut() {
    assert_eq!(play(5), Ok(vec![1, 3, 88]));
}

#[test]
fn test_budget_eight_goes_direct() {
    assert_eq!(play(8), Ok(vec![1, 88]));
}

#[test]
fn test_scenario_file_drives_same_game() {
    let scenario = Scenario {
        start: 1,
        budget: 3,
        target: None,
        prefer_target: Some(88),
        obstacles: vec![vec![2, 3], vec![3], vec![88], vec![88]],
        limits: GameConfig::default(),
    };
    let mut game = Game::new(peking_map(), scenario.to_setup()).expect("scenario is valid");
    let route = game.run().expect("budget three reaches the target");
    assert_eq!(format_route(&route), "1 -> 2 -> 2 -> 2 -> 3 -> 88");
}

#[test]
fn test_highest_id_target_defaults_to_peking() {
    let setup = GameSetup {
        start: 1,
        target: TargetSelector::HighestId,
        budget: 8,
        obstacles: ObstacleSchedule::new(),
        config: GameConfig::default(),
    };
    let game = Game::new(peking_map(), setup).expect("map has a highest id");
    assert_eq!(game.state().target, 88);
}
