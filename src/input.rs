//! # Graph Input
//!
//! Builds the graph a command runs on: a built-in sample, an inline edge
//! list (`"1-2,2-3"`), or for path queries an inline label adjacency
//! (`"A:B,C;B:D"`).

use std::collections::HashMap;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use gps_core::{samples, Graph, VertexId};

/// Built-in sample graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    /// Five vertices with two equal routes (undirected)
    SimplePath,
    /// 3x3 grid numbered 1..=9 (undirected)
    Grid,
    /// Directed link graph, every vertex has an outgoing edge
    Web,
    /// Two separate triangles
    Disconnected,
    /// Labelled A..E adjacency (path queries only)
    Scenario,
}

/// Graph selection flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Built-in sample graph (default: simple-path)
    #[arg(long, value_enum, conflicts_with = "edges")]
    pub sample: Option<Sample>,

    /// Inline edge list, e.g. "1-2,2-3,3-1"
    #[arg(long, value_name = "EDGES")]
    pub edges: Option<String>,

    /// Insert every inline edge in both directions
    #[arg(long, requires = "edges")]
    pub undirected: bool,
}

impl GraphArgs {
    /// Build the vertex-id graph
    pub fn build(&self) -> Result<Graph> {
        if let Some(spec) = &self.edges {
            let mut graph = Graph::new();
            for (from, to) in parse_edges(spec)? {
                if self.undirected {
                    graph.add_undirected_edge(from, to);
                } else {
                    graph.add_edge(from, to);
                }
            }
            return Ok(graph);
        }

        match self.sample.unwrap_or(Sample::SimplePath) {
            Sample::SimplePath => Ok(samples::simple_path()),
            Sample::Grid => Ok(samples::grid()),
            Sample::Web => Ok(samples::web_graph()),
            Sample::Disconnected => Ok(samples::disconnected()),
            Sample::Scenario => anyhow::bail!("the scenario sample is label-keyed; use it with the `path` command"),
        }
    }

    /// Label-keyed adjacency for path queries
    pub fn label_adjacency(&self) -> Result<HashMap<String, Vec<String>>> {
        if self.sample == Some(Sample::Scenario) {
            return Ok(samples::scenario_adjacency());
        }
        Ok(self.build()?.to_label_adjacency())
    }
}

/// Parse `"from-to,from-to,..."` into vertex id pairs
pub fn parse_edges(spec: &str) -> Result<Vec<(VertexId, VertexId)>> {
    spec.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| -> Result<(VertexId, VertexId)> {
            let (from, to) = item
                .split_once('-')
                .with_context(|| format!("edge '{item}' must look like FROM-TO"))?;
            let from = from
                .trim()
                .parse()
                .with_context(|| format!("invalid vertex id in edge '{item}'"))?;
            let to = to
                .trim()
                .parse()
                .with_context(|| format!("invalid vertex id in edge '{item}'"))?;
            Ok((from, to))
        })
        .collect()
}

/// Parse `"A:B,C;B:D;D:"` into a label adjacency map.
///
/// Every node that should be queryable needs its own entry, even with no
/// neighbors (`"D:"`).
pub fn parse_adjacency(spec: &str) -> Result<HashMap<String, Vec<String>>> {
    let mut adjacency = HashMap::new();
    for entry in spec.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (node, neighbors) = entry
            .split_once(':')
            .with_context(|| format!("adjacency entry '{entry}' must look like NODE:N1,N2"))?;
        let node = node.trim();
        if node.is_empty() {
            anyhow::bail!("adjacency entry '{entry}' has an empty node label");
        }
        let neighbors = neighbors
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .collect();
        adjacency.insert(node.to_string(), neighbors);
    }
    Ok(adjacency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edges() {
        assert_eq!(parse_edges("1-2, 2-3,").unwrap(), vec![(1, 2), (2, 3)]);
        assert!(parse_edges("1-2,3").is_err());
        assert!(parse_edges("a-b").is_err());
    }

    #[test]
    fn test_parse_adjacency() {
        let adjacency = parse_adjacency("A:B,C; B:D; D:").unwrap();
        assert_eq!(adjacency["A"], vec!["B", "C"]);
        assert!(adjacency["D"].is_empty());
        assert!(!adjacency.contains_key("C"));
        assert!(parse_adjacency("A-B").is_err());
    }

    #[test]
    fn test_build_from_edges() {
        let args = GraphArgs {
            edges: Some("1-2,2-3".to_string()),
            undirected: true,
            ..Default::default()
        };
        let graph = args.build().unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_scenario_is_label_only() {
        let args = GraphArgs {
            sample: Some(Sample::Scenario),
            ..Default::default()
        };
        assert!(args.build().is_err());
        assert_eq!(args.label_adjacency().unwrap().len(), 5);
    }
}
