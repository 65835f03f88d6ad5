//! Bidirectional (meet-in-the-middle) breadth-first shortest path
//!
//! Two frontiers grow toward each other: one forward from the source over
//! the adjacency lists, one backward from the target over predecessor lists,
//! so every hop of a reconstructed path is an edge of the input graph. The
//! sides alternate strictly, source first, one dequeued node per step.
//!
//! The first meeting is not always on a shortest path, so a meeting only
//! records a candidate. The search stops once no unexplored path can beat
//! the best candidate: every path of length at most `ds + dt` (the depths at
//! the two queue heads) has been seen by then.

use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::hash::Hash;

use super::{no_path, parent_chain, precheck, PathOutcome};

/// Reverse adjacency: node -> nodes with an edge into it.
///
/// Where a predecessor is also a neighbor (symmetric edge) it keeps the
/// node's own adjacency order, so undirected graphs expand exactly like the
/// forward side. Predecessors without a reverse edge follow in label order,
/// independent of map iteration order.
fn predecessors<L>(graph: &HashMap<L, Vec<L>>) -> HashMap<&L, Vec<&L>>
where
    L: Eq + Hash + Ord,
{
    let mut reverse: HashMap<&L, Vec<&L>> = HashMap::new();
    for (from, neighbors) in graph {
        for to in neighbors {
            reverse.entry(to).or_default().push(from);
        }
    }

    for (node, preds) in reverse.iter_mut() {
        let own = graph.get(*node).map(Vec::as_slice).unwrap_or(&[]);
        preds.sort_by_cached_key(|p| (own.iter().position(|n| n == *p).unwrap_or(usize::MAX), *p));
    }
    reverse
}

/// One search direction: queue plus depth and parent maps
struct Frontier<'g, L> {
    queue: VecDeque<&'g L>,
    depth: HashMap<&'g L, usize>,
    parents: HashMap<&'g L, &'g L>,
}

impl<'g, L: Eq + Hash> Frontier<'g, L> {
    fn new(root: &'g L) -> Self {
        Self {
            queue: VecDeque::from([root]),
            depth: HashMap::from([(root, 0)]),
            parents: HashMap::new(),
        }
    }

    /// Depth of the next node to expand
    fn head_depth(&self) -> Option<usize> {
        self.queue.front().and_then(|n| self.depth.get(n).copied())
    }
}

/// Best meeting seen so far: the edge (`near`, `far`) joins the two sides,
/// `near` on the source side and `far` on the target side.
struct Meeting<'g, L> {
    length: usize,
    near: &'g L,
    far: &'g L,
}

/// Which way a frontier walks the graph
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Source,
    Target,
}

/// Pop one node from `this` side, visit its edges, record any meeting.
fn expand<'g, L>(
    side: Side,
    edges: &HashMap<&'g L, Vec<&'g L>>,
    this: &mut Frontier<'g, L>,
    other: &Frontier<'g, L>,
    best: &mut Option<Meeting<'g, L>>,
) where
    L: Eq + Hash,
{
    let Some(current) = this.queue.pop_front() else {
        return;
    };
    let current_depth = this.depth.get(current).copied().unwrap_or(0);

    let neighbors = edges.get(current).map(Vec::as_slice).unwrap_or(&[]);
    for &next in neighbors {
        if !this.depth.contains_key(next) {
            this.depth.insert(next, current_depth + 1);
            this.parents.insert(next, current);
            this.queue.push_back(next);
        }

        if let Some(&other_depth) = other.depth.get(next) {
            let length = current_depth + 1 + other_depth;
            if best.as_ref().map_or(true, |m| length < m.length) {
                let (near, far) = match side {
                    Side::Source => (current, next),
                    Side::Target => (next, current),
                };
                *best = Some(Meeting { length, near, far });
            }
        }
    }
}

/// Whether the search can stop: a side ran dry, or the best candidate is
/// no longer than anything still unexplored.
fn settled<L: Eq + Hash>(
    forward: &Frontier<'_, L>,
    backward: &Frontier<'_, L>,
    best: &Option<Meeting<'_, L>>,
) -> bool {
    match (forward.head_depth(), backward.head_depth()) {
        (Some(ds), Some(dt)) => best.as_ref().is_some_and(|m| m.length <= ds + dt + 1),
        _ => true,
    }
}

/// Shortest path from `source` to `target` by bidirectional BFS.
///
/// Returns a path of the same length as [`shortest_path`](super::shortest_path)
/// whenever one exists; the node sequence may differ between equal-length
/// paths but is the same on every run over the same graph.
pub fn bidirectional_shortest_path<L>(graph: &HashMap<L, Vec<L>>, source: &L, target: &L) -> PathOutcome<L>
where
    L: Clone + Eq + Hash + Ord + Display,
{
    if let Some(outcome) = precheck(graph, source, target) {
        return outcome;
    }

    let forward_edges: HashMap<&L, Vec<&L>> = graph.iter().map(|(k, v)| (k, v.iter().collect())).collect();
    let backward_edges = predecessors(graph);

    // Labels are borrowed from the graph so both frontiers share one lifetime
    let (Some((source, _)), Some((target, _))) = (graph.get_key_value(source), graph.get_key_value(target)) else {
        return PathOutcome::failed(no_path(source, target), 0);
    };

    let mut forward = Frontier::new(source);
    let mut backward = Frontier::new(target);
    let mut best: Option<Meeting<'_, L>> = None;
    let mut explored = 0;

    while !forward.queue.is_empty() && !backward.queue.is_empty() {
        explored += 1;
        expand(Side::Source, &forward_edges, &mut forward, &backward, &mut best);
        if settled(&forward, &backward, &best) {
            break;
        }

        explored += 1;
        expand(Side::Target, &backward_edges, &mut backward, &forward, &mut best);
        if settled(&forward, &backward, &best) {
            break;
        }
    }

    let Some(meeting) = best else {
        return PathOutcome::failed(no_path(source, target), explored);
    };

    // Source chain ends at `near`; target chain starts at `far`
    let mut path: Vec<L> = parent_chain(&forward.parents, &meeting.near)
        .into_iter()
        .rev()
        .cloned()
        .collect();
    path.extend(parent_chain(&backward.parents, &meeting.far).into_iter().cloned());

    debug_assert_eq!(path.len(), meeting.length + 1);
    PathOutcome::found(path, explored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::scenario_adjacency;
    use crate::search::{shortest_path, PathDiagnostic};

    fn undirected(edges: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut graph: HashMap<String, Vec<String>> = HashMap::new();
        for (a, b) in edges {
            graph.entry(a.to_string()).or_default().push(b.to_string());
            graph.entry(b.to_string()).or_default().push(a.to_string());
        }
        graph
    }

    fn label(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_scenario_path() {
        let graph = scenario_adjacency();
        let outcome = bidirectional_shortest_path(&graph, &label("A"), &label("E"));
        assert_eq!(outcome.path, vec!["A", "B", "D", "E"]);
        assert!(outcome.diagnostic.is_none());
    }

    #[test]
    fn test_source_equals_target() {
        let graph = scenario_adjacency();
        let outcome = bidirectional_shortest_path(&graph, &label("A"), &label("A"));
        assert_eq!(outcome.path, vec!["A"]);
    }

    #[test]
    fn test_missing_target() {
        let graph = scenario_adjacency();
        let outcome = bidirectional_shortest_path(&graph, &label("A"), &label("Z"));
        assert!(outcome.path.is_empty());
        assert_eq!(outcome.diagnostic, Some(PathDiagnostic::MissingNode { label: "Z".into() }));
    }

    #[test]
    fn test_first_meeting_is_not_final() {
        // The left branch meets first at depth 2 + 2; the right branch is shorter
        let graph = undirected(&[
            ("s", "x1"),
            ("s", "x2"),
            ("x1", "w"),
            ("w", "z1"),
            ("z1", "t"),
            ("x2", "q"),
            ("q", "t"),
        ]);

        let outcome = bidirectional_shortest_path(&graph, &label("s"), &label("t"));
        assert_eq!(outcome.path, vec!["s", "x2", "q", "t"]);
        assert_eq!(outcome.hops(), shortest_path(&graph, &label("s"), &label("t")).hops());
    }

    #[test]
    fn test_directed_uses_real_edges() {
        // 1 -> 2 -> 3, plus 3 -> 1 which must not be walked backwards
        let graph: HashMap<u32, Vec<u32>> = [(1, vec![2]), (2, vec![3]), (3, vec![1])].into_iter().collect();

        let outcome = bidirectional_shortest_path(&graph, &1, &3);
        assert_eq!(outcome.path, vec![1, 2, 3]);

        let outcome = bidirectional_shortest_path(&graph, &3, &2);
        assert_eq!(outcome.path, vec![3, 1, 2]);
    }

    #[test]
    fn test_directed_no_path() {
        let graph: HashMap<u32, Vec<u32>> = [(1, vec![2]), (2, vec![]), (3, vec![2])].into_iter().collect();

        let outcome = bidirectional_shortest_path(&graph, &1, &3);
        assert!(!outcome.is_found());
        assert!(matches!(outcome.diagnostic, Some(PathDiagnostic::NoPath { .. })));
    }

    #[test]
    fn test_one_way_predecessors_in_label_order() {
        // t has no outgoing edges, so none of its predecessors has a reverse edge
        let build = || {
            let mut graph: HashMap<String, Vec<String>> = HashMap::new();
            graph.insert(label("s"), vec![label("c"), label("a"), label("b")]);
            for mid in ["c", "b", "a"] {
                graph.insert(label(mid), vec![label("t")]);
            }
            graph.insert(label("t"), vec![]);
            graph
        };

        let graph = build();
        let reverse = predecessors(&graph);
        let t = reverse.get(&label("t")).unwrap();
        assert_eq!(t.iter().map(|s| s.as_str()).collect::<Vec<_>>(), vec!["a", "b", "c"]);

        // Fresh maps get fresh hash seeds; three equal routes, same answer each time
        for _ in 0..8 {
            let outcome = bidirectional_shortest_path(&build(), &label("s"), &label("t"));
            assert_eq!(outcome.path, vec!["s", "a", "t"]);
        }
    }

    #[test]
    fn test_predecessor_order_follows_adjacency() {
        let graph = scenario_adjacency();
        let reverse = predecessors(&graph);
        let d = reverse.get(&label("D")).unwrap();
        assert_eq!(d.iter().map(|s| s.as_str()).collect::<Vec<_>>(), vec!["B", "C", "E"]);
    }
}
