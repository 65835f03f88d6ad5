//! Vertex computation abstractions
//!
//! A `VertexComputation` is the per-vertex update rule the engine invokes
//! once for every vertex in every superstep. It may mutate the vertex it is
//! handed and emit messages through the `ComputeContext`; it never touches
//! another vertex directly.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::graph::{Graph, Vertex, VertexId};

use super::message::{Message, Payload};

/// Read-only adjacency snapshot taken at the start of a round
///
/// Only built for computations that ask for it (see
/// [`VertexComputation::requires_topology`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    adjacency: BTreeMap<VertexId, Vec<VertexId>>,
}

impl Topology {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            adjacency: graph
                .vertices()
                .map(|v| (v.id(), v.neighbors().to_vec()))
                .collect(),
        }
    }

    /// Outgoing neighbors of `id` (empty if unknown)
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Context provided to a vertex during computation
///
/// Provides access to:
/// - Current superstep number
/// - Send capability bound to this round (outbox)
/// - Optional read-only topology snapshot
pub struct ComputeContext<'a> {
    /// Current superstep number (0-indexed)
    pub superstep: usize,
    topology: Option<&'a Topology>,
    vertex_id: VertexId,
    /// Outgoing messages in send order
    outbox: Vec<Message>,
    /// Deferred value writes to other vertices, applied at the barrier
    remote_values: Vec<(VertexId, f64)>,
}

impl<'a> ComputeContext<'a> {
    /// Create a new compute context
    pub fn new(vertex_id: VertexId, superstep: usize, topology: Option<&'a Topology>) -> Self {
        Self {
            superstep,
            topology,
            vertex_id,
            outbox: Vec::new(),
            remote_values: Vec::new(),
        }
    }

    /// Get the current vertex ID
    pub fn id(&self) -> VertexId {
        self.vertex_id
    }

    /// Send a message to another vertex
    ///
    /// Messages will be delivered at the end of the current superstep.
    pub fn send(&mut self, target: VertexId, payload: Payload) {
        self.outbox.push(Message::new(target, payload));
    }

    /// Send the same payload to every target, in order
    pub fn broadcast(&mut self, targets: &[VertexId], payload: Payload) {
        for &target in targets {
            self.send(target, payload);
        }
    }

    /// Check if this is the first superstep
    pub fn is_first_superstep(&self) -> bool {
        self.superstep == 0
    }

    /// Topology snapshot, if the computation requested one
    pub fn topology(&self) -> Option<&'a Topology> {
        self.topology
    }

    /// Schedule a value write on another vertex for the round barrier.
    ///
    /// Exists for one-shot traversals that do not follow the superstep
    /// protocol (depth-first marking). Writes to unknown vertices are
    /// dropped; later writes to the same vertex win.
    pub fn assign_value(&mut self, target: VertexId, value: f64) {
        self.remote_values.push((target, value));
    }

    /// Number of messages sent so far in this call
    pub fn sent_count(&self) -> usize {
        self.outbox.len()
    }

    /// Consume the context and return the outbox and deferred writes
    pub fn into_parts(self) -> (Vec<Message>, Vec<(VertexId, f64)>) {
        (self.outbox, self.remote_values)
    }
}

/// The per-vertex update rule run by the superstep engine
///
/// Implementations must be total over their inputs: a payload they do not
/// understand is ignored, never a panic. Calls for different vertices in
/// the same round may run concurrently.
///
/// # Example
///
/// ```ignore
/// struct Echo;
///
/// impl VertexComputation for Echo {
///     fn name(&self) -> &'static str {
///         "echo"
///     }
///
///     fn compute(&self, vertex: &mut Vertex, incoming: &[Message], ctx: &mut ComputeContext<'_>) {
///         for msg in incoming {
///             ctx.broadcast(vertex.neighbors(), msg.payload());
///         }
///     }
/// }
/// ```
pub trait VertexComputation: Send + Sync {
    /// Short tag identifying the algorithm
    fn name(&self) -> &'static str;

    /// Execute the vertex's computation for one superstep
    ///
    /// `incoming` is the drained inbox: everything delivered at the end of
    /// the previous superstep.
    fn compute(&self, vertex: &mut Vertex, incoming: &[Message], ctx: &mut ComputeContext<'_>);

    /// Whether the engine must hand a topology snapshot to `compute`
    fn requires_topology(&self) -> bool {
        false
    }
}

/// Boxed computation for dynamic dispatch
pub type BoxedComputation = Arc<dyn VertexComputation>;
