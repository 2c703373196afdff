//! Decoding of map descriptions into a travel graph.
//!
//! A map description is JSON with aligned connection lists:
//! `{"locations": {"critical": [3]}, "connections": {"source": [1], "target": [3], "price": [2]}}`.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::types::*;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDescription {
    pub locations: Locations,
    pub connections: Connections,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locations {
    /// Informational node count; the graph is sized by its connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    #[serde(default)]
    pub critical: Vec<LocationId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connections {
    pub source: Vec<LocationId>,
    pub target: Vec<LocationId>,
    pub price: Vec<Cost>,
}

#[derive(Debug)]
pub enum MapError {
    Io(io::Error),
    Json(serde_json::Error),
    /// `source`, `target` and `price` must have the same length.
    MisalignedConnections { sources: usize, targets: usize, prices: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map I/O error: {e}"),
            Self::Json(e) => write!(f, "invalid map JSON: {e}"),
            Self::MisalignedConnections { sources, targets, prices } => write!(
                f,
                "connection lists differ in length: {sources} sources, {targets} targets, {prices} prices"
            ),
        }
    }
}

impl Error for MapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::MisalignedConnections { .. } => None,
        }
    }
}

impl MapDescription {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(MapError::Json)
    }
}

/// Adds every connection in list order, then flags critical locations.
pub fn build_graph(description: &MapDescription) -> Result<Graph, MapError> {
    let Connections { source, target, price } = &description.connections;
    if source.len() != target.len() || source.len() != price.len() {
        return Err(MapError::MisalignedConnections {
            sources: source.len(),
            targets: target.len(),
            prices: price.len(),
        });
    }

    let mut graph = Graph::new();
    for ((&a, &b), &weight) in source.iter().zip(target).zip(price) {
        graph.add_edge(a, b, weight);
    }
    for &location in &description.locations.critical {
        graph.set_critical(location, true);
    }
    Ok(graph)
}

pub fn load_map(path: &Path) -> Result<MapDescription, MapError> {
    let json = fs::read_to_string(path).map_err(MapError::Io)?;
    MapDescription::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEKING_JSON: &str = r#"{
        "locations": {"number": 4, "critical": [3]},
        "connections": {
            "source": [1, 1, 1, 2, 3],
            "target": [2, 3, 88, 3, 88],
            "price": [1, 3, 7, 1, 1]
        }
    }"#;

    #[test]
    fn decodes_and_builds_peking_map() {
        let description = MapDescription::from_json(PEKING_JSON).unwrap();
        assert_eq!(description.locations.number, Some(4));

        let graph = build_graph(&description).unwrap();
        assert_eq!(graph.locations().collect::<Vec<_>>(), vec![1, 2, 3, 88]);
        assert!(graph.node(3).unwrap().is_critical());
        assert!(!graph.node(2).unwrap().is_critical());
        assert_eq!(graph.edge_weight(1, 88), Some(7));
        assert_eq!(graph.path_weight(&[1, 3, 88]), Ok(4));
    }

    #[test]
    fn unknown_critical_locations_are_ignored() {
        let mut description = MapDescription::from_json(PEKING_JSON).unwrap();
        description.locations.critical.push(500);
        let graph = build_graph(&description).unwrap();
        assert!(!graph.contains(500));
    }

    #[test]
    fn missing_critical_list_defaults_to_empty() {
        let json = r#"{"locations": {}, "connections": {"source": [1], "target": [2], "price": [4]}}"#;
        let graph = build_graph(&MapDescription::from_json(json).unwrap()).unwrap();
        assert!(graph.nodes().all(|node| !node.is_critical()));
    }

    #[test]
    fn misaligned_connection_lists_are_rejected() {
        let json = r#"{"locations": {}, "connections": {"source": [1, 2], "target": [2], "price": [4]}}"#;
        let err = build_graph(&MapDescription::from_json(json).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            MapError::MisalignedConnections { sources: 2, targets: 1, prices: 1 }
        ));
    }

    #[test]
    fn fractional_prices_fail_to_decode() {
        let json = r#"{"locations": {}, "connections": {"source": [1], "target": [2], "price": [1.5]}}"#;
        assert!(matches!(MapDescription::from_json(json), Err(MapError::Json(_))));
    }
}
