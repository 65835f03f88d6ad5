//! PageRank power iteration
//!
//! Every vertex starts at `1/N`. Each later round it recomputes
//! `(1 - d)/N + d * sum(incoming)` and keeps the new rank only when it moved
//! by more than [`EPSILON`]. Contributions are sent every round regardless,
//! so message traffic never stops; halt on stable values instead.

use crate::graph::Vertex;
use crate::pregel::{ComputeContext, Message, Payload, VertexComputation};

/// Probability of following a link rather than jumping
pub const DAMPING: f64 = 0.85;

/// Minimum rank change that counts as an update
pub const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRank {
    vertex_count: usize,
}

impl PageRank {
    /// `vertex_count` is the N in `1/N`; zero is treated as one.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count: vertex_count.max(1),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn teleport(&self) -> f64 {
        (1.0 - DAMPING) / self.vertex_count as f64
    }
}

impl VertexComputation for PageRank {
    fn name(&self) -> &'static str {
        "pagerank"
    }

    fn compute(&self, vertex: &mut Vertex, incoming: &[Message], ctx: &mut ComputeContext<'_>) {
        if ctx.is_first_superstep() {
            vertex.set_value(1.0 / self.vertex_count as f64);
        } else {
            let sum: f64 = incoming.iter().filter_map(|m| m.payload().as_rank()).sum();
            let rank = self.teleport() + DAMPING * sum;
            if (rank - vertex.value()).abs() > EPSILON {
                vertex.set_value(rank);
            }
        }

        let share = vertex.value() / vertex.out_degree().max(1) as f64;
        ctx.broadcast(vertex.neighbors(), Payload::Rank(share));
    }
}
