//! Algorithm library
//!
//! Concrete vertex computations plus [`AlgorithmKind`], the tag-based
//! selection the surrounding layer uses to pick one. Selection validates the
//! request against the graph, so a bad source id or an empty graph is
//! rejected before any round runs.

pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod pagerank;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, VertexId};
use crate::pregel::{BoxedComputation, PregelError};

pub use bfs::BreadthFirstDistance;
pub use dfs::DepthFirstMarking;
pub use dijkstra::HopRelaxation;
pub use pagerank::PageRank;

/// Selectable algorithm with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum AlgorithmKind {
    Bfs { source: VertexId },
    Dfs { source: VertexId },
    Dijkstra { source: VertexId },
    PageRank { vertex_count: usize },
}

impl AlgorithmKind {
    /// Every accepted canonical tag
    pub const TAGS: [&'static str; 4] = ["bfs", "dfs", "dijkstra", "pagerank"];

    /// Parse a tag (case-insensitive).
    ///
    /// Source-based algorithms take `source`; PageRank takes `vertex_count`.
    pub fn from_tag(tag: &str, source: VertexId, vertex_count: usize) -> Result<Self, PregelError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::Bfs { source }),
            "dfs" | "depth-first" => Ok(Self::Dfs { source }),
            "dijkstra" | "relax" => Ok(Self::Dijkstra { source }),
            "pagerank" | "page-rank" | "pr" => Ok(Self::PageRank { vertex_count }),
            _ => Err(PregelError::unknown_algorithm(tag)),
        }
    }

    /// Canonical tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Bfs { .. } => "bfs",
            Self::Dfs { .. } => "dfs",
            Self::Dijkstra { .. } => "dijkstra",
            Self::PageRank { .. } => "pagerank",
        }
    }

    pub fn source(&self) -> Option<VertexId> {
        match self {
            Self::Bfs { source } | Self::Dfs { source } | Self::Dijkstra { source } => Some(*source),
            Self::PageRank { .. } => None,
        }
    }

    /// Check the selection against `graph`
    pub fn validate(&self, graph: &Graph) -> Result<(), PregelError> {
        if graph.vertex_count() == 0 {
            return Err(PregelError::EmptyGraph);
        }
        match *self {
            Self::PageRank { vertex_count: 0 } => Err(PregelError::EmptyGraph),
            Self::PageRank { .. } => Ok(()),
            _ => match self.source() {
                Some(source) if !graph.contains_vertex(source) => Err(PregelError::MissingSource(source)),
                _ => Ok(()),
            },
        }
    }

    /// Validate and build the computation
    pub fn build(&self, graph: &Graph) -> Result<BoxedComputation, PregelError> {
        self.validate(graph)?;
        let computation: BoxedComputation = match *self {
            Self::Bfs { source } => Arc::new(BreadthFirstDistance::new(source)),
            Self::Dfs { source } => Arc::new(DepthFirstMarking::new(source)),
            Self::Dijkstra { source } => Arc::new(HopRelaxation::new(source)),
            Self::PageRank { vertex_count } => Arc::new(PageRank::new(vertex_count)),
        };
        Ok(computation)
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageRank { vertex_count } => write!(f, "pagerank(n={vertex_count})"),
            other => match other.source() {
                Some(source) => write!(f, "{}(source={source})", other.tag()),
                None => f.write_str(other.tag()),
            },
        }
    }
}
