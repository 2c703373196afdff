//! Exhaustive simple-path search and per-turn route filtering.
//! This module exists so route rules are reusable by the simulator and by tools.
//! It does not own turn progression or occupancy updates.

use std::collections::BTreeSet;

use super::*;
use crate::graph::Graph;

/// Every simple path from `start` to `target`, in depth-first discovery order.
///
/// Neighbors are explored in the order their edges were added, which fixes the
/// order of the result. Exponential in the worst case.
pub fn enumerate_simple_paths(
    graph: &Graph,
    start: LocationId,
    target: LocationId,
) -> Vec<Vec<LocationId>> {
    let mut routes = Vec::new();
    if !graph.contains(start) {
        return routes;
    }
    let mut visited = BTreeSet::new();
    let mut path = Vec::new();
    extend_paths(graph, start, target, &mut visited, &mut path, &mut routes);
    routes
}

fn extend_paths(
    graph: &Graph,
    current: LocationId,
    target: LocationId,
    visited: &mut BTreeSet<LocationId>,
    path: &mut Vec<LocationId>,
    routes: &mut Vec<Vec<LocationId>>,
) {
    visited.insert(current);
    path.push(current);

    if current == target {
        routes.push(path.clone());
    } else if let Some(node) = graph.node(current) {
        for (neighbor, _) in node.neighbors() {
            if !visited.contains(&neighbor) {
                extend_paths(graph, neighbor, target, visited, path, routes);
            }
        }
    }

    path.pop();
    visited.remove(&current);
}

/// Routes to `target` that fit in `budget` and whose first step is not blocked.
///
/// Fails with [`GameError::InsufficientBudget`] when no route fits the budget,
/// including when none exists at all. An empty `Ok` means every affordable
/// route is blocked this turn.
pub fn valid_routes(
    graph: &Graph,
    start: LocationId,
    target: LocationId,
    budget: Cost,
) -> Result<Vec<Vec<LocationId>>, GameError> {
    let mut affordable = Vec::new();
    for route in enumerate_simple_paths(graph, start, target) {
        if graph.path_weight(&route)? <= budget {
            affordable.push(route);
        }
    }
    if affordable.is_empty() {
        return Err(GameError::InsufficientBudget { location: start, target, budget });
    }

    affordable.retain(|route| route.get(1).is_none_or(|&next| !graph.is_unavailable(next)));
    Ok(affordable)
}

/// The route with the fewest locations; ties go to the earliest discovered.
pub fn shortest_route(routes: &[Vec<LocationId>]) -> Option<&[LocationId]> {
    let mut best: Option<&Vec<LocationId>> = None;
    for route in routes {
        if best.is_none_or(|current| route.len() < current.len()) {
            best = Some(route);
        }
    }
    best.map(Vec::as_slice)
}
