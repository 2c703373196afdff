use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub current: LocationId,
    pub target: LocationId,
    pub budget: Cost,
    pub turn: u64,
    /// Every location occupied so far, starting with the start location.
    pub path: Vec<LocationId>,
    pub stalled_turns: u32,
}

impl GameState {
    pub fn new(start: LocationId, target: LocationId, budget: Cost) -> Self {
        Self { current: start, target, budget, turn: 0, path: vec![start], stalled_turns: 0 }
    }

    pub fn is_arrived(&self) -> bool {
        self.current == self.target
    }
}
