//! Dependency graph: relation merging, construction, and JSON dump.
//!
//! Nodes are normalized entity names; a directed edge A -> B means
//! "A depends on B". The graph is immutable once built; a rebuild starts
//! over from the document source.

pub mod builder;
pub mod dump;
pub mod merge;

pub use builder::{build_graph, build_knowledge_graph};
pub use dump::{save_graph_json, GraphDump};
pub use merge::merge_relations;

use std::collections::{BTreeMap, HashMap, HashSet};

/// Entity -> ordered list of entities it depends on.
pub type RelationMap = BTreeMap<String, Vec<String>>;

/// Simple directed dependency graph.
///
/// Node and edge insertion order is preserved; duplicate edges collapse to
/// one. Self-loops are legal (extraction may declare an entity depending on
/// itself) and are kept as-is.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    node_set: HashSet<String>,
    edges: Vec<(String, String)>,
    edge_set: HashSet<(String, String)>,
    successors: HashMap<String, Vec<String>>,
    predecessors: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a node exists; no-op if already present.
    pub fn add_node(&mut self, name: &str) {
        if self.node_set.insert(name.to_string()) {
            self.nodes.push(name.to_string());
        }
    }

    /// Add a directed edge `from -> to`, creating missing nodes.
    /// Duplicate edges are ignored (simple graph).
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_node(from);
        self.add_node(to);

        let key = (from.to_string(), to.to_string());
        if !self.edge_set.insert(key.clone()) {
            return;
        }
        self.edges.push(key);

        self.successors
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());
        self.predecessors
            .entry(to.to_string())
            .or_default()
            .push(from.to_string());
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_set.contains(name)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edge_set
            .contains(&(from.to_string(), to.to_string()))
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    /// Nodes this node depends on, in edge insertion order.
    pub fn successors(&self, name: &str) -> &[String] {
        self.successors.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes that depend on this node, in edge insertion order.
    pub fn predecessors(&self, name: &str) -> &[String] {
        self.predecessors
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_deduplicates() {
        let mut g = DependencyGraph::new();
        g.add_node("PaymentService");
        g.add_node("PaymentService");
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_add_edge_creates_nodes() {
        let mut g = DependencyGraph::new();
        g.add_edge("PaymentService", "UserDatabase");

        assert!(g.contains_node("PaymentService"));
        assert!(g.contains_node("UserDatabase"));
        assert!(g.contains_edge("PaymentService", "UserDatabase"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_multi_edge_collapses() {
        let mut g = DependencyGraph::new();
        g.add_edge("A", "B");
        g.add_edge("A", "B");

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.successors("A"), &["B".to_string()]);
        assert_eq!(g.predecessors("B"), &["A".to_string()]);
    }

    #[test]
    fn test_self_loop_kept() {
        let mut g = DependencyGraph::new();
        g.add_edge("A", "A");

        assert_eq!(g.node_count(), 1);
        assert!(g.contains_edge("A", "A"));
        assert_eq!(g.successors("A"), &["A".to_string()]);
        assert_eq!(g.predecessors("A"), &["A".to_string()]);
    }

    #[test]
    fn test_adjacency_preserves_insertion_order() {
        let mut g = DependencyGraph::new();
        g.add_edge("B", "X");
        g.add_edge("A", "X");
        g.add_edge("C", "X");

        assert_eq!(
            g.predecessors("X"),
            &["B".to_string(), "A".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        let g = DependencyGraph::new();
        assert!(g.successors("Missing").is_empty());
        assert!(g.predecessors("Missing").is_empty());
    }
}
