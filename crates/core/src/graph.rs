//! Undirected weighted travel graph with per-node criticality and occupancy.
//! Nodes live in an arena and are never removed, so arena order is insertion order.

use std::collections::{BTreeMap, BTreeSet};

use slotmap::SlotMap;

use crate::types::*;

#[derive(Clone, Debug)]
pub struct Node {
    id: LocationId,
    critical: bool,
    occupied: bool,
    connections: Vec<(LocationId, Cost)>,
}

impl Node {
    fn new(id: LocationId, critical: bool) -> Self {
        Self { id, critical, occupied: false, connections: Vec::new() }
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn set_occupied(&mut self, occupied: bool) {
        self.occupied = occupied;
    }

    /// A node blocks use as a next step only while it is both critical and occupied.
    pub fn is_unavailable(&self) -> bool {
        self.critical && self.occupied
    }

    /// Neighbors in the order their connection was first added.
    pub fn neighbors(&self) -> impl Iterator<Item = (LocationId, Cost)> + '_ {
        self.connections.iter().copied()
    }

    pub fn weight_to(&self, neighbor: LocationId) -> Option<Cost> {
        self.connections.iter().find(|(id, _)| *id == neighbor).map(|(_, weight)| *weight)
    }

    fn connect(&mut self, neighbor: LocationId, weight: Cost) {
        // Re-adding a connection keeps its original position.
        match self.connections.iter_mut().find(|(id, _)| *id == neighbor) {
            Some(entry) => entry.1 = weight,
            None => self.connections.push((neighbor, weight)),
        }
    }

    fn disconnect(&mut self, neighbor: LocationId) {
        self.connections.retain(|(id, _)| *id != neighbor);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: SlotMap<NodeKey, Node>,
    index: BTreeMap<LocationId, NodeKey>,
    start_location: Option<LocationId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, or sets the criticality of an existing one.
    ///
    /// An existing node keeps its connections and its position, so edges stay
    /// symmetric.
    pub fn add_node(&mut self, id: LocationId, critical: bool) -> &mut Node {
        let key = self.ensure_node(id);
        let node = &mut self.nodes[key];
        node.critical = critical;
        node
    }

    /// Connects `a` and `b` both ways with `weight`, creating either node if missing.
    /// Weights are not validated; a repeated edge overwrites the previous weight.
    pub fn add_edge(&mut self, a: LocationId, b: LocationId, weight: Cost) {
        let a_key = self.ensure_node(a);
        let b_key = self.ensure_node(b);
        self.nodes[a_key].connect(b, weight);
        self.nodes[b_key].connect(a, weight);
    }

    pub fn remove_edge(&mut self, a: LocationId, b: LocationId) {
        if let Some(node) = self.node_mut(a) {
            node.disconnect(b);
        }
        if let Some(node) = self.node_mut(b) {
            node.disconnect(a);
        }
    }

    pub fn set_critical(&mut self, id: LocationId, critical: bool) {
        if let Some(node) = self.node_mut(id) {
            node.critical = critical;
        }
    }

    pub fn node(&self, id: LocationId) -> Option<&Node> {
        self.index.get(&id).map(|&key| &self.nodes[key])
    }

    pub fn node_mut(&mut self, id: LocationId) -> Option<&mut Node> {
        let key = *self.index.get(&id)?;
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.index.contains_key(&id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn locations(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.nodes.values().map(Node::id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn highest_location(&self) -> Option<LocationId> {
        self.index.keys().next_back().copied()
    }

    pub fn start_location(&self) -> Option<LocationId> {
        self.start_location
    }

    pub fn set_start_location(&mut self, id: LocationId) {
        if self.contains(id) {
            self.start_location = Some(id);
        }
    }

    pub fn edge_weight(&self, a: LocationId, b: LocationId) -> Option<Cost> {
        self.node(a)?.weight_to(b)
    }

    pub fn is_unavailable(&self, id: LocationId) -> bool {
        self.node(id).is_some_and(Node::is_unavailable)
    }

    /// Sums the edge weights between consecutive locations of `path`.
    /// The sum saturates at the bounds of [`Cost`] instead of overflowing.
    pub fn path_weight(&self, path: &[LocationId]) -> Result<Cost, GraphError> {
        path.windows(2).try_fold(0, |total: Cost, pair| {
            let (from, to) = (pair[0], pair[1]);
            let node = self.node(from).ok_or(GraphError::UnknownLocation(from))?;
            let weight = node.weight_to(to).ok_or(GraphError::MissingEdge { from, to })?;
            Ok(total.saturating_add(weight))
        })
    }

    /// Recomputes every occupancy flag: a node is occupied when it holds an
    /// obstacle this turn or is the traveler's own location.
    pub fn set_occupancy(&mut self, obstacles: &BTreeSet<LocationId>, current: LocationId) {
        for node in self.nodes.values_mut() {
            node.occupied = obstacles.contains(&node.id) || node.id == current;
        }
    }

    fn ensure_node(&mut self, id: LocationId) -> NodeKey {
        match self.index.get(&id) {
            Some(&key) => key,
            None => {
                let key = self.nodes.insert(Node::new(id, false));
                self.index.insert(id, key);
                key
            }
        }
    }
}
