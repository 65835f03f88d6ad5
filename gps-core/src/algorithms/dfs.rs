//! Depth-first reachability marking
//!
//! Unlike the other algorithms this is not a superstep-native computation:
//! the source performs a complete depth-first traversal over the round's
//! topology snapshot at round 0 and marks every vertex it reaches with 1.
//! The marks on other vertices are deferred writes applied at the barrier.
//! Unreached vertices keep +∞.

use std::collections::HashSet;

use crate::graph::{Vertex, VertexId};
use crate::pregel::{ComputeContext, Message, Payload, Topology, VertexComputation};

/// Value written on every vertex reachable from the source
pub const VISITED: f64 = 1.0;

/// Vertices reachable from `start`, in recursive depth-first preorder
///
/// Neighbors are explored in adjacency order. Iterative, so deep chains do
/// not grow the call stack.
pub fn traversal_order(topology: &Topology, start: VertexId) -> Vec<VertexId> {
    if !topology.contains(start) {
        return Vec::new();
    }

    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        order.push(id);
        // Reverse push keeps the first neighbor on top
        for &next in topology.neighbors(id).iter().rev() {
            if !visited.contains(&next) {
                stack.push(next);
            }
        }
    }

    order
}

/// One-shot depth-first marking from a single source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthFirstMarking {
    source: VertexId,
}

impl DepthFirstMarking {
    pub fn new(source: VertexId) -> Self {
        Self { source }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }
}

impl VertexComputation for DepthFirstMarking {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn compute(&self, vertex: &mut Vertex, _incoming: &[Message], ctx: &mut ComputeContext<'_>) {
        if !ctx.is_first_superstep() || vertex.id() != self.source {
            return;
        }
        let Some(topology) = ctx.topology() else {
            return;
        };

        vertex.set_value(VISITED);
        for id in traversal_order(topology, self.source).into_iter().skip(1) {
            ctx.assign_value(id, VISITED);
        }
        ctx.broadcast(vertex.neighbors(), Payload::Marker(true));
    }

    fn requires_topology(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_traversal_preorder() {
        // 1 -> 2 -> 4, 1 -> 3, 2 -> 3
        let graph = Graph::from_edges([(1, 2), (1, 3), (2, 4), (2, 3)]);
        let topology = Topology::from_graph(&graph);

        assert_eq!(traversal_order(&topology, 1), vec![1, 2, 4, 3]);
        assert_eq!(traversal_order(&topology, 3), vec![3]);
        assert!(traversal_order(&topology, 99).is_empty());
    }

    #[test]
    fn test_traversal_handles_cycles() {
        let graph = Graph::from_edges([(1, 2), (2, 3), (3, 1)]);
        let topology = Topology::from_graph(&graph);

        assert_eq!(traversal_order(&topology, 2), vec![2, 3, 1]);
    }

    #[test]
    fn test_source_marks_reachable() {
        let mut graph = Graph::from_edges([(1, 2), (2, 3), (4, 1)]);
        let topology = Topology::from_graph(&graph);
        let vertex = graph.vertex_mut(1).unwrap();

        let mut ctx = ComputeContext::new(1, 0, Some(&topology));
        DepthFirstMarking::new(1).compute(vertex, &[], &mut ctx);

        assert_eq!(vertex.value(), VISITED);
        let (outbox, remote) = ctx.into_parts();
        assert_eq!(remote, vec![(2, VISITED), (3, VISITED)]);
        assert_eq!(outbox, vec![Message::new(2, Payload::Marker(true))]);
    }

    #[test]
    fn test_non_source_is_inert() {
        let mut graph = Graph::from_edges([(1, 2)]);
        let topology = Topology::from_graph(&graph);
        let vertex = graph.vertex_mut(2).unwrap();

        let incoming = vec![Message::new(2, Payload::Marker(true))];
        let mut ctx = ComputeContext::new(2, 1, Some(&topology));
        DepthFirstMarking::new(1).compute(vertex, &incoming, &mut ctx);

        assert!(vertex.value().is_infinite());
        assert_eq!(ctx.sent_count(), 0);
    }
}
