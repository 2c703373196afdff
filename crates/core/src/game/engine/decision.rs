//! Per-turn move selection from the currently valid routes.

use log::debug;

use super::*;

impl Game {
    /// Decides this turn's move without changing any state.
    ///
    /// Takes one hop along the shortest valid route, or stalls when every
    /// affordable route starts on an unavailable location.
    pub fn next_move(&self) -> Result<TurnDecision, GameError> {
        let current = self.state.current;
        let routes = valid_routes(&self.graph, current, self.state.target, self.state.budget)?;
        debug!(
            "turn {}: {} valid route(s) from {current} with budget {}",
            self.state.turn,
            routes.len(),
            self.state.budget
        );

        let Some(&next) = shortest_route(&routes).and_then(|route| route.get(1)) else {
            return Ok(TurnDecision::Stall);
        };
        let cost = self
            .graph
            .edge_weight(current, next)
            .ok_or(GraphError::MissingEdge { from: current, to: next })?;
        Ok(TurnDecision::Move { to: next, cost })
    }
}
