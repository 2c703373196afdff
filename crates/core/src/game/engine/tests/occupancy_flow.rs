//! Tests for how turn-indexed obstacles drive occupancy between turns.

use super::support::*;

#[test]
fn occupancy_uses_this_turns_obstacles_and_post_move_location() {
    let mut game = peking_game(3, vec![vec![3], vec![]]);
    game.advance(1).unwrap();

    let graph = game.graph();
    assert!(graph.node(3).unwrap().is_occupied());
    assert!(graph.node(2).unwrap().is_occupied(), "traveler's new location is occupied");
    assert!(!graph.node(1).unwrap().is_occupied(), "previous location is released");
}

#[test]
fn obstacles_past_schedule_leave_occupancy_unchanged() {
    let mut game = peking_game(3, vec![vec![3]]);
    game.advance(1).unwrap();
    game.advance(1).unwrap();

    assert_eq!(game.state().current, 2, "3 stays blocked after the schedule runs out");
    assert!(game.graph().is_unavailable(3));
    assert!(game.graph().node(2).unwrap().is_occupied());
}

#[test]
fn occupancy_starts_clear() {
    let game = peking_game(3, vec![vec![2, 3]]);
    assert!(game.graph().nodes().all(|node| !node.is_occupied()));
}

#[test]
fn critical_own_location_does_not_block_leaving_it() {
    let mut game = peking_game(2, vec![vec![], vec![]]);
    game.graph.set_occupancy(&schedule(vec![vec![]])[0], 3);
    game.state.current = 3;
    game.state.path = vec![3];

    assert_eq!(game.next_move(), Ok(TurnDecision::Move { to: 88, cost: 1 }));
}
