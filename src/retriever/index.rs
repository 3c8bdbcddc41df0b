use crate::embeddings::TextEmbedder;
use crate::error::{ArchragError, Result};
use crate::graph::DependencyGraph;

/// One precomputed embedding per graph node, in node insertion order.
///
/// Built once at startup and read-only afterwards; concurrent lookups are
/// safe.
pub struct EmbeddingIndex {
    entries: Vec<(String, Vec<f32>)>,
}

impl EmbeddingIndex {
    /// Batch-embed every node name in the graph.
    ///
    /// Fails with `EmptyGraph` if the graph has no nodes, and with an
    /// `Embedding` error if the collaborator returns the wrong number of
    /// vectors.
    pub async fn build<E: TextEmbedder>(embedder: &E, graph: &DependencyGraph) -> Result<Self> {
        let nodes = graph.nodes().to_vec();
        if nodes.is_empty() {
            return Err(ArchragError::EmptyGraph);
        }

        let vectors = embedder.embed_batch(&nodes).await?;
        if vectors.len() != nodes.len() {
            return Err(ArchragError::Embedding(format!(
                "Expected {} embeddings, got {}",
                nodes.len(),
                vectors.len()
            )));
        }

        log::info!("Embedding index built for {} entities", nodes.len());

        Ok(Self {
            entries: nodes.into_iter().zip(vectors).collect(),
        })
    }

    /// Find the entity whose embedding is most cosine-similar to `query`.
    ///
    /// Entities with a zero-norm vector are never selectable. Ties keep the
    /// first entity encountered (strict `>` comparison). Returns `None` when
    /// no comparable entity exists.
    pub fn find_closest(&self, query: &[f32]) -> Option<(&str, f32)> {
        let mut best: Option<&str> = None;
        let mut best_score = f32::NEG_INFINITY;

        for (entity, embedding) in &self.entries {
            let denom = norm(query) * norm(embedding);
            if denom == 0.0 {
                continue;
            }
            let score = dot(query, embedding) / denom;

            if score > best_score {
                best_score = score;
                best = Some(entity);
            }
        }

        best.map(|entity| (entity, best_score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(entries: &[(&str, &[f32])]) -> EmbeddingIndex {
        EmbeddingIndex {
            entries: entries
                .iter()
                .map(|(name, vec)| (name.to_string(), vec.to_vec()))
                .collect(),
        }
    }

    struct FixedEmbedder {
        dims: usize,
    }

    impl TextEmbedder for FixedEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0; self.dims]).collect())
        }

        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0; self.dims])
        }
    }

    #[tokio::test]
    async fn test_build_empty_graph_fails() {
        let graph = DependencyGraph::new();
        let embedder = FixedEmbedder { dims: 3 };

        let result = EmbeddingIndex::build(&embedder, &graph).await;
        assert!(matches!(result, Err(ArchragError::EmptyGraph)));
    }

    #[tokio::test]
    async fn test_build_one_entry_per_node() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("PaymentService", "UserDatabase");
        let embedder = FixedEmbedder { dims: 3 };

        let index = EmbeddingIndex::build(&embedder, &graph).await.unwrap();
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_find_closest_picks_best() {
        let idx = index(&[
            ("A", &[1.0, 0.0]),
            ("B", &[0.0, 1.0]),
        ]);

        let (entity, score) = idx.find_closest(&[0.1, 0.9]).unwrap();
        assert_eq!(entity, "B");
        assert!(score > 0.9);
    }

    #[test]
    fn test_find_closest_tie_keeps_first() {
        // Identical nonzero vectors: strict > keeps the first entry
        let idx = index(&[
            ("First", &[1.0, 1.0]),
            ("Second", &[1.0, 1.0]),
        ]);

        let (entity, _) = idx.find_closest(&[1.0, 1.0]).unwrap();
        assert_eq!(entity, "First");
    }

    #[test]
    fn test_find_closest_skips_zero_norm() {
        let idx = index(&[
            ("Zero", &[0.0, 0.0]),
            ("Real", &[-1.0, 0.0]),
        ]);

        // Zero-norm entry is never selectable even though Real scores -1.0
        let (entity, score) = idx.find_closest(&[1.0, 0.0]).unwrap();
        assert_eq!(entity, "Real");
        assert!((score - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_find_closest_all_zero_norm() {
        let idx = index(&[("Zero", &[0.0, 0.0])]);
        assert!(idx.find_closest(&[1.0, 0.0]).is_none());
    }

    #[test]
    fn test_find_closest_zero_query() {
        // A zero query vector makes every denominator zero
        let idx = index(&[("A", &[1.0, 0.0])]);
        assert!(idx.find_closest(&[0.0, 0.0]).is_none());
    }

    #[test]
    fn test_find_closest_empty_index() {
        let idx = index(&[]);
        assert!(idx.find_closest(&[1.0]).is_none());
    }
}
