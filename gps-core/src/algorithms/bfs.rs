//! Breadth-first distance propagation
//!
//! Distributed shortest hop-count: the source starts at 0 and every vertex
//! that improves its distance re-broadcasts `distance + 1`. The algorithm
//! quiesces on its own once no vertex improves.

use crate::graph::{Vertex, VertexId};
use crate::pregel::{ComputeContext, Message, Payload, VertexComputation};

/// Relax `vertex` against every incoming distance, re-broadcasting each
/// strict improvement to all neighbors.
pub(crate) fn relax_hop_distance(vertex: &mut Vertex, incoming: &[Message], ctx: &mut ComputeContext<'_>) {
    for distance in incoming.iter().filter_map(|m| m.payload().as_distance()) {
        if (distance as f64) < vertex.value() {
            vertex.set_value(distance as f64);
            ctx.broadcast(vertex.neighbors(), Payload::Distance(distance + 1));
        }
    }
}

/// Seed the source at round 0
pub(crate) fn seed_source(vertex: &mut Vertex, ctx: &mut ComputeContext<'_>) {
    vertex.set_value(0.0);
    ctx.broadcast(vertex.neighbors(), Payload::Distance(1));
}

/// Breadth-first distance propagation from a single source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreadthFirstDistance {
    source: VertexId,
}

impl BreadthFirstDistance {
    pub fn new(source: VertexId) -> Self {
        Self { source }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }
}

impl VertexComputation for BreadthFirstDistance {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn compute(&self, vertex: &mut Vertex, incoming: &[Message], ctx: &mut ComputeContext<'_>) {
        if ctx.is_first_superstep() && vertex.id() == self.source {
            seed_source(vertex, ctx);
        } else {
            relax_hop_distance(vertex, incoming, ctx);
        }
    }
}
