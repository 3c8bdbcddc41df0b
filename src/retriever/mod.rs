//! Graph-augmented retrieval: embedding-based entity resolution plus bounded
//! neighborhood expansion.

pub mod index;
pub mod traversal;

pub use index::EmbeddingIndex;
pub use traversal::multi_hop;

use crate::embeddings::TextEmbedder;
use crate::error::{ArchragError, Result};
use crate::graph::DependencyGraph;

/// Outcome of one retrieval: the resolved entity, its similarity score, and
/// the expanded neighborhood (sorted for deterministic prompt assembly).
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub closest_entity: String,
    pub score: f32,
    pub related_nodes: Vec<String>,
}

/// Process-wide retrieval service: owns the dependency graph, the embedding
/// index, and the embedding collaborator. Constructed once at startup and
/// shared read-only across queries (all query-time methods take `&self`).
pub struct GraphRetriever<E> {
    graph: DependencyGraph,
    index: EmbeddingIndex,
    embedder: E,
    hops: usize,
}

impl<E: TextEmbedder> GraphRetriever<E> {
    /// Build the retriever, precomputing one embedding per graph node.
    /// Fails with `EmptyGraph` when the graph has no nodes.
    pub async fn new(embedder: E, graph: DependencyGraph, hops: usize) -> Result<Self> {
        let index = EmbeddingIndex::build(&embedder, &graph).await?;

        Ok(Self {
            graph,
            index,
            embedder,
            hops,
        })
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Resolve a query to its closest entity and expand the surrounding
    /// neighborhood.
    pub async fn retrieve(&self, query: &str) -> Result<Retrieval> {
        let query_vec = self.embedder.embed_query(query).await?;

        let (entity, score) = self
            .index
            .find_closest(&query_vec)
            .ok_or(ArchragError::NoMatch)?;
        let closest_entity = entity.to_string();

        log::debug!("Closest entity: {} (score={:.4})", closest_entity, score);

        let mut related_nodes: Vec<String> = multi_hop(&self.graph, &closest_entity, self.hops)
            .into_iter()
            .collect();
        related_nodes.sort();

        Ok(Retrieval {
            closest_entity,
            score,
            related_nodes,
        })
    }
}
