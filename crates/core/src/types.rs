use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
}

/// Identifier of a location on the map, unique within a graph.
pub type LocationId = u32;

/// Edge weights and travel budgets.
pub type Cost = i64;

/// Obstacle sets indexed by turn number, starting at turn 0.
pub type ObstacleSchedule = Vec<BTreeSet<LocationId>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSelector {
    Fixed(LocationId),
    #[default]
    HighestId,
    /// Use the given location when the map has it, otherwise the highest id.
    PreferredOrHighest(LocationId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_stalled_turns: Option<u32>,
}

pub const DEFAULT_MAX_STALLED_TURNS: u32 = 256;

impl Default for GameConfig {
    fn default() -> Self {
        Self { max_stalled_turns: Some(DEFAULT_MAX_STALLED_TURNS) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSetup {
    pub start: LocationId,
    pub target: TargetSelector,
    pub budget: Cost,
    pub obstacles: ObstacleSchedule,
    pub config: GameConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnDecision {
    Move { to: LocationId, cost: Cost },
    Stall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    Arrived,
    TurnLimitReached,
}

#[derive(Clone, Debug)]
pub struct AdvanceResult {
    pub simulated_turns: u32,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    Moved { turn: u64, from: LocationId, to: LocationId, cost: Cost, budget: Cost },
    Stalled { turn: u64, location: LocationId },
    Arrived { turn: u64, location: LocationId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    UnknownLocation(LocationId),
    MissingEdge { from: LocationId, to: LocationId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocation(id) => write!(f, "location {id} is not on the map"),
            Self::MissingEdge { from, to } => {
                write!(f, "no direct connection between {from} and {to}")
            }
        }
    }
}

impl Error for GraphError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// No simple path to the target fits in the remaining budget. Also raised
    /// when the target cannot be reached at all.
    InsufficientBudget { location: LocationId, target: LocationId, budget: Cost },
    StalledNoProgress { location: LocationId, turns: u32 },
    UnknownLocation(LocationId),
    Graph(GraphError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientBudget { location, target, budget } => write!(
                f,
                "budget {budget} is insufficient to travel from {location} to {target}"
            ),
            Self::StalledNoProgress { location, turns } => {
                write!(f, "stalled at {location} for {turns} consecutive turns")
            }
            Self::UnknownLocation(id) => write!(f, "location {id} is not on the map"),
            Self::Graph(e) => write!(f, "graph error: {e}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for GameError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

/// Renders a route as `1 -> 2 -> 88`.
pub fn format_route(route: &[LocationId]) -> String {
    route.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_formatting_joins_with_arrows() {
        assert_eq!(format_route(&[1, 2, 2, 88]), "1 -> 2 -> 2 -> 88");
        assert_eq!(format_route(&[7]), "7");
        assert_eq!(format_route(&[]), "");
    }

    #[test]
    fn default_config_bounds_stalls() {
        assert_eq!(GameConfig::default().max_stalled_turns, Some(DEFAULT_MAX_STALLED_TURNS));
    }
}
