//! Simplified single-source relaxation ("Dijkstra-like")
//!
//! Edges carry no weights and rounds impose no priority order, so this is
//! hop-count relaxation under message passing, identical in behavior to
//! breadth-first distance propagation. It is kept as its own algorithm so
//! callers can select it by name.

use crate::graph::{Vertex, VertexId};
use crate::pregel::{ComputeContext, Message, VertexComputation};

use super::bfs::{relax_hop_distance, seed_source};

/// Unweighted single-source relaxation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopRelaxation {
    source: VertexId,
}

impl HopRelaxation {
    pub fn new(source: VertexId) -> Self {
        Self { source }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }
}

impl VertexComputation for HopRelaxation {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn compute(&self, vertex: &mut Vertex, incoming: &[Message], ctx: &mut ComputeContext<'_>) {
        if ctx.is_first_superstep() && vertex.id() == self.source {
            seed_source(vertex, ctx);
        } else {
            relax_hop_distance(vertex, incoming, ctx);
        }
    }
}
