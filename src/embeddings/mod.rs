pub mod ollama;

pub use ollama::OllamaEmbedder;

use crate::error::Result;

/// Narrow interface over the embedding collaborator.
///
/// `embed_batch` returns one vector per input string, order-preserving;
/// dimensionality is fixed for the process lifetime. The retrieval and
/// workflow layers depend only on this trait so tests can substitute a
/// deterministic stand-in for the network-backed client.
#[allow(async_fn_in_trait)]
pub trait TextEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}
