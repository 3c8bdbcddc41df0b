use crate::graph::{merge_relations, DependencyGraph, RelationMap};
use crate::ingest::{build_entity_relation, Document};

/// Build the directed dependency graph from a merged relation map.
///
/// Every key and every dependency value becomes a node; an edge
/// entity -> dependency is added for each declared dependency. Names that
/// only ever appear as dependencies are legal and end up as nodes with no
/// outgoing edges.
pub fn build_graph(relations: &RelationMap) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for (entity, deps) in relations {
        graph.add_node(entity);
        for dep in deps {
            graph.add_edge(entity, dep);
        }
    }

    graph
}

/// Full knowledge-graph pipeline: extract relations per document, merge,
/// and construct the graph. Returns the graph together with the merged
/// relation map (the latter is kept for the inspection dump).
pub fn build_knowledge_graph(documents: &[Document]) -> (DependencyGraph, RelationMap) {
    let extracted: Vec<RelationMap> = documents
        .iter()
        .map(|doc| build_entity_relation(&doc.content))
        .collect();

    let merged = merge_relations(&extracted);
    let graph = build_graph(&merged);

    log::info!(
        "Knowledge graph built: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    (graph, merged)
}
