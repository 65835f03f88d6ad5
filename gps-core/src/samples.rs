//! Ready-made sample graphs for demos, tests and benchmarks

use std::collections::HashMap;

use crate::graph::Graph;

/// Five vertices, two equal routes to the end (undirected).
///
/// ```text
///     1
///    / \
///   0   3 - 4
///    \ /
///     2
/// ```
pub fn simple_path() -> Graph {
    let mut graph = Graph::new();
    for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)] {
        graph.add_undirected_edge(a, b);
    }
    graph
}

/// 3x3 grid numbered 1..=9 row by row (undirected)
pub fn grid() -> Graph {
    let mut graph = Graph::new();
    for row in 0..3u64 {
        for col in 0..3u64 {
            let id = row * 3 + col + 1;
            if col < 2 {
                graph.add_undirected_edge(id, id + 1);
            }
            if row < 2 {
                graph.add_undirected_edge(id, id + 3);
            }
        }
    }
    graph
}

/// Small directed link graph where every vertex has an outgoing edge
///
/// 0 home, 1 about, 2 products, 3 blog, 4 contact.
pub fn web_graph() -> Graph {
    Graph::from_edges([
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 0),
        (1, 4),
        (2, 0),
        (2, 4),
        (3, 0),
        (3, 2),
        (4, 0),
    ])
}

/// Two undirected triangles with no edge between them: {0, 1, 2} and {3, 4, 5}
pub fn disconnected() -> Graph {
    let mut graph = Graph::new();
    for (a, b) in [(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5)] {
        graph.add_undirected_edge(a, b);
    }
    graph
}

/// Label-keyed adjacency used by the path search examples
///
/// A: B C, B: A D, C: A D, D: B C E, E: D
pub fn scenario_adjacency() -> HashMap<String, Vec<String>> {
    [
        ("A", vec!["B", "C"]),
        ("B", vec!["A", "D"]),
        ("C", vec!["A", "D"]),
        ("D", vec!["B", "C", "E"]),
        ("E", vec!["D"]),
    ]
    .into_iter()
    .map(|(node, neighbors)| (node.to_string(), neighbors.into_iter().map(String::from).collect()))
    .collect()
}
