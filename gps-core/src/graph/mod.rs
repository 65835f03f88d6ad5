//! Graph store
//!
//! Mutable directed graph: a map of vertices keyed by id plus the
//! insertion-ordered edge list. Every edge's endpoints are always present
//! in the vertex map; removal operations keep the edge list and the
//! per-vertex neighbor lists consistent.
//!
//! Edge removal policy: `remove_edge` drops the first (earliest inserted)
//! matching edge only. Parallel duplicates survive and must be removed one
//! call at a time.

pub mod partition;
pub mod vertex;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

pub use partition::{assign_partitions, PartitionStrategy};
pub use vertex::{Vertex, VertexId};

/// A directed edge between two vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
}

impl Edge {
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self { from, to }
    }

    /// Check if the edge touches `id` on either end
    pub fn is_incident_to(&self, id: VertexId) -> bool {
        self.from == id || self.to == id
    }
}

/// In-memory directed graph: vertex map + ordered edge list.
///
/// Vertices are kept ordered by id so every traversal of the store (and
/// therefore every engine round) visits them in the same order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    vertices: BTreeMap<VertexId, Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a list of directed edges
    pub fn from_edges(edges: impl IntoIterator<Item = (VertexId, VertexId)>) -> Self {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Add a vertex. Returns false (and changes nothing) if it already exists.
    pub fn add_vertex(&mut self, id: VertexId) -> bool {
        if self.vertices.contains_key(&id) {
            return false;
        }
        self.vertices.insert(id, Vertex::new(id));
        true
    }

    /// Add a directed edge, creating either endpoint if missing.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) {
        self.add_vertex(from);
        self.add_vertex(to);
        self.edges.push(Edge::new(from, to));
        if let Some(vertex) = self.vertices.get_mut(&from) {
            vertex.add_neighbor(to);
        }
    }

    /// Add an edge in both directions (undirected convenience)
    pub fn add_undirected_edge(&mut self, a: VertexId, b: VertexId) {
        self.add_edge(a, b);
        self.add_edge(b, a);
    }

    /// Remove a vertex together with every edge incident to it.
    ///
    /// References to the vertex are also dropped from the neighbor lists of
    /// the remaining vertices.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        let removed = self.vertices.remove(&id)?;
        self.edges.retain(|e| !e.is_incident_to(id));
        for vertex in self.vertices.values_mut() {
            vertex.remove_all_neighbors(id);
        }
        Some(removed)
    }

    /// Remove the first edge matching (from, to). Returns whether one existed.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        let Some(index) = self.edges.iter().position(|e| e.from == from && e.to == to) else {
            return false;
        };
        self.edges.remove(index);
        if let Some(vertex) = self.vertices.get_mut(&from) {
            vertex.remove_first_neighbor(to);
        }
        true
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(&id)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// All vertices in ascending id order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Vertex ids in ascending order
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing degree of a vertex (0 if absent)
    pub fn out_degree(&self, id: VertexId) -> usize {
        self.vertex(id).map(Vertex::out_degree).unwrap_or(0)
    }

    /// Set every vertex value to `value`
    pub fn reset_values(&mut self, value: f64) {
        for vertex in self.vertices.values_mut() {
            vertex.set_value(value);
        }
    }

    /// Snapshot of `id -> value` for every vertex
    pub fn values(&self) -> BTreeMap<VertexId, f64> {
        self.vertices.iter().map(|(&id, v)| (id, v.value())).collect()
    }

    /// Convert into the label-keyed adjacency map used by path search.
    ///
    /// Every vertex appears as a key, including those without outgoing edges.
    pub fn to_label_adjacency(&self) -> HashMap<String, Vec<String>> {
        self.vertices
            .values()
            .map(|v| {
                let neighbors = v.neighbors().iter().map(|n| n.to_string()).collect();
                (v.id().to_string(), neighbors)
            })
            .collect()
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut BTreeMap<VertexId, Vertex> {
        &mut self.vertices
    }
}
