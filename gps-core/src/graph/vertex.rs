//! Vertex state owned by the graph store
//!
//! A vertex carries the algorithm-specific value, its outgoing adjacency,
//! and the inbox the engine fills at each round barrier.

use serde::{Deserialize, Serialize};

use crate::pregel::message::Message;

/// Unique identifier for a vertex in the graph
pub type VertexId = u64;

/// A single vertex: value, outgoing neighbors, inbox and liveness flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    id: VertexId,
    value: f64,
    /// Outgoing adjacency in edge-insertion order (duplicates allowed)
    neighbors: Vec<VertexId>,
    /// Messages delivered since the last drain
    inbox: Vec<Message>,
    active: bool,
}

impl Vertex {
    /// Create a vertex with an infinite value and no neighbors
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            value: f64::INFINITY,
            neighbors: Vec::new(),
            inbox: Vec::new(),
            active: true,
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Current value (distance, rank or marker depending on the algorithm)
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Outgoing neighbor ids in edge-insertion order
    pub fn neighbors(&self) -> &[VertexId] {
        &self.neighbors
    }

    pub fn out_degree(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Number of messages waiting for the next round
    ///
    /// The contents are only observable by draining, which the engine does.
    pub fn pending_messages(&self) -> usize {
        self.inbox.len()
    }

    pub(crate) fn add_neighbor(&mut self, neighbor: VertexId) {
        self.neighbors.push(neighbor);
    }

    /// Remove the first occurrence of `neighbor`. Returns whether one was found.
    pub(crate) fn remove_first_neighbor(&mut self, neighbor: VertexId) -> bool {
        match self.neighbors.iter().position(|&n| n == neighbor) {
            Some(index) => {
                self.neighbors.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every occurrence of `neighbor`, returning how many were dropped.
    pub(crate) fn remove_all_neighbors(&mut self, neighbor: VertexId) -> usize {
        let before = self.neighbors.len();
        self.neighbors.retain(|&n| n != neighbor);
        before - self.neighbors.len()
    }

    pub(crate) fn receive_messages(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.inbox.extend(messages);
    }

    /// Atomically empty the inbox, returning its prior contents
    pub(crate) fn drain_inbox(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.inbox)
    }
}
