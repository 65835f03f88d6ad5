//! Single-frontier breadth-first shortest path

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::hash::Hash;

use super::{no_path, parent_chain, precheck, PathOutcome};

/// Shortest path from `source` to `target` by plain BFS.
///
/// Stops the first time `target` is discovered; the path is rebuilt by
/// walking parent pointers back to `source`.
pub fn shortest_path<L>(graph: &HashMap<L, Vec<L>>, source: &L, target: &L) -> PathOutcome<L>
where
    L: Clone + Eq + Hash + Display,
{
    if let Some(outcome) = precheck(graph, source, target) {
        return outcome;
    }

    let mut queue = VecDeque::from([source.clone()]);
    let mut visited = HashSet::from([source.clone()]);
    let mut parents: HashMap<L, L> = HashMap::new();
    let mut explored = 0;

    while let Some(current) = queue.pop_front() {
        explored += 1;
        for neighbor in graph.get(&current).into_iter().flatten() {
            if !visited.insert(neighbor.clone()) {
                continue;
            }
            parents.insert(neighbor.clone(), current.clone());
            if neighbor == target {
                let mut path = parent_chain(&parents, target);
                path.reverse();
                return PathOutcome::found(path, explored);
            }
            queue.push_back(neighbor.clone());
        }
    }

    PathOutcome::failed(no_path(source, target), explored)
}
