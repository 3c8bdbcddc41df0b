use std::collections::HashSet;

use crate::graph::DependencyGraph;

/// Bounded multi-hop expansion around `start`, treating the directed graph
/// as undirected for neighborhood purposes (predecessors and successors both
/// count as neighbors).
///
/// Each round the entire frontier is marked visited and replaced by the
/// union of its neighbors, so the result covers at most `hops` rings
/// outward from `start`, including `start` itself. `hops = 0` visits nothing
/// (not even `start`); a frontier that collapses to empty terminates the
/// expansion early.
pub fn multi_hop(graph: &DependencyGraph, start: &str, hops: usize) -> HashSet<String> {
    let mut visited = HashSet::new();
    let mut frontier: HashSet<String> = HashSet::from([start.to_string()]);

    for _ in 0..hops {
        let mut next_frontier = HashSet::new();

        for node in &frontier {
            visited.insert(node.clone());
            for neighbor in graph.predecessors(node) {
                next_frontier.insert(neighbor.clone());
            }
            for neighbor in graph.successors(node) {
                next_frontier.insert(neighbor.clone());
            }
        }

        frontier = next_frontier;
        if frontier.is_empty() {
            break;
        }
    }

    visited
}
