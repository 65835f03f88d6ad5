//! gps-core: superstep graph computation kernel
//!
//! A single-process, Pregel-style engine plus a point-to-point path search.
//!
//! - Graph: mutable directed graph store (vertices, edges, adjacency)
//! - SuperstepEngine: runs one synchronized round per call, buffering every
//!   message until the round barrier
//! - VertexComputation: pluggable per-vertex update rule (BFS, DFS marking,
//!   hop-count relaxation, PageRank)
//! - search: single-frontier and bidirectional BFS over a label-keyed
//!   adjacency map, independent of the engine
//!
//! ```rust,ignore
//! use gps_core::{AlgorithmKind, Graph, SuperstepEngine};
//!
//! let mut graph = Graph::new();
//! graph.add_edge(1, 2);
//! graph.add_edge(2, 3);
//!
//! let computation = AlgorithmKind::Bfs { source: 1 }.build(&graph)?;
//! let mut engine = SuperstepEngine::new(graph, computation);
//! while !engine.step().is_quiescent() {}
//! assert_eq!(engine.graph().vertex(3).map(|v| v.value()), Some(2.0));
//! ```

pub mod algorithms;
pub mod graph;
pub mod pregel;
pub mod samples;
pub mod search;

// Re-exports for convenience
pub use algorithms::{
    AlgorithmKind, BreadthFirstDistance, DepthFirstMarking, HopRelaxation, PageRank,
};
pub use graph::{assign_partitions, Edge, Graph, PartitionStrategy, Vertex, VertexId};
pub use pregel::{
    run_rounds, run_to_quiescence, run_until, BoxedComputation, ComputeContext, EngineConfig, HaltCondition,
    Message, PartitionStats, Payload, PregelError, RoundRecord, RunSummary, StepReport,
    SuperstepEngine, Topology, VertexComputation,
};
pub use search::{bidirectional_shortest_path, shortest_path, PathDiagnostic, PathOutcome};
