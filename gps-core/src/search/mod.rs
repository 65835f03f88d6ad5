//! Point-to-point shortest path search
//!
//! Two one-shot utilities over a label-keyed adjacency map, independent of
//! the superstep engine:
//!
//! - [`shortest_path`]: single-frontier BFS
//! - [`bidirectional_shortest_path`]: meet-in-the-middle BFS
//!
//! Bad input never produces an `Err`. Both return a [`PathOutcome`] whose
//! path is empty and whose diagnostic explains why, so "no path" and "bad
//! request" are handled the same way by callers.

pub mod bfs;
pub mod bidirectional;

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub use bfs::shortest_path;
pub use bidirectional::bidirectional_shortest_path;

/// Why a search produced no path
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum PathDiagnostic {
    #[error("Graph is empty")]
    EmptyGraph,

    #[error("Node '{label}' does not exist in the graph")]
    MissingNode { label: String },

    #[error("No path exists between '{from}' and '{to}'")]
    NoPath { from: String, to: String },
}

/// Result of a path query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathOutcome<L> {
    /// Source to target inclusive; empty when no path was produced
    pub path: Vec<L>,
    pub diagnostic: Option<PathDiagnostic>,
    /// Nodes dequeued and expanded during the search
    pub explored: usize,
}

impl<L> PathOutcome<L> {
    pub(crate) fn found(path: Vec<L>, explored: usize) -> Self {
        Self {
            path,
            diagnostic: None,
            explored,
        }
    }

    pub(crate) fn failed(diagnostic: PathDiagnostic, explored: usize) -> Self {
        warn!(%diagnostic, explored, "Path search produced no path");
        Self {
            path: Vec::new(),
            diagnostic: Some(diagnostic),
            explored,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges on the path (`None` when no path)
    pub fn hops(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }

    /// Consecutive (from, to) pairs along the path
    pub fn edges(&self) -> impl Iterator<Item = (&L, &L)> {
        self.path.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn into_path(self) -> Vec<L> {
        self.path
    }
}

/// Shared input validation: empty graph, missing endpoints, source == target.
///
/// Returns `Some(outcome)` when the query is settled without searching. A
/// node counts as present only if it has its own adjacency entry.
fn precheck<L>(graph: &HashMap<L, Vec<L>>, source: &L, target: &L) -> Option<PathOutcome<L>>
where
    L: Clone + Eq + Hash + Display,
{
    if graph.is_empty() {
        return Some(PathOutcome::failed(PathDiagnostic::EmptyGraph, 0));
    }
    for label in [source, target] {
        if !graph.contains_key(label) {
            return Some(PathOutcome::failed(
                PathDiagnostic::MissingNode {
                    label: label.to_string(),
                },
                0,
            ));
        }
    }
    if source == target {
        return Some(PathOutcome::found(vec![source.clone()], 0));
    }
    None
}

fn no_path<L: Display>(source: &L, target: &L) -> PathDiagnostic {
    PathDiagnostic::NoPath {
        from: source.to_string(),
        to: target.to_string(),
    }
}

/// Walk parent pointers from `node` until a node with no parent
fn parent_chain<L>(parents: &HashMap<L, L>, node: &L) -> Vec<L>
where
    L: Clone + Eq + Hash,
{
    let mut chain = vec![node.clone()];
    let mut current = node;
    while let Some(parent) = parents.get(current) {
        chain.push(parent.clone());
        current = parent;
    }
    chain
}
