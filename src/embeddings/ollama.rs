use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::cache::EmbeddingCache;
use crate::embeddings::TextEmbedder;
use crate::error::{ArchragError, Result};

/// Request structure for the Ollama embed API
#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

/// Response structure from the Ollama embed API
#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Ollama embeddings client.
///
/// Calls `POST {base_url}/api/embed` with a batch of strings and returns one
/// vector per input. Query embeddings optionally go through an LRU cache so
/// repeated questions skip the network round-trip. No retry logic: failures
/// surface as typed errors and the workflow's error state handles them.
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
    cache: Option<Arc<EmbeddingCache>>,
}

impl OllamaEmbedder {
    /// Create a new embedder without caching.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// normal operation).
    pub fn new(base_url: String, model: String, timeout_secs: u64) -> Self {
        Self::new_with_cache(base_url, model, timeout_secs, None)
    }

    /// Create a new embedder with an optional query-embedding cache.
    pub fn new_with_cache(
        base_url: String,
        model: String,
        timeout_secs: u64,
        cache: Option<Arc<EmbeddingCache>>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            cache,
        }
    }

    async fn embed_internal(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let request = EmbedRequest {
            model: self.model.clone(),
            input: texts,
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ArchragError::Embedding(format!("Network error: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(ArchragError::Embedding(format!(
                "Ollama API error {}: {}",
                status, body
            )));
        }

        let result: EmbedResponse = response
            .json()
            .await
            .map_err(|e| ArchragError::Embedding(format!("Failed to parse response: {}", e)))?;

        Ok(result.embeddings)
    }
}

impl TextEmbedder for OllamaEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let start = std::time::Instant::now();
        let embeddings = self.embed_internal(texts.to_vec()).await?;
        log::debug!(
            "Embedded batch of {} texts in {:?}",
            texts.len(),
            start.elapsed()
        );

        Ok(embeddings)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(text) {
                log::debug!("Embedding cache hit for query: {}", text);
                return Ok(cached);
            }
        }

        let mut embeddings = self.embed_internal(vec![text.to_string()]).await?;
        if embeddings.is_empty() {
            return Err(ArchragError::Embedding(
                "Empty response from Ollama API".to_string(),
            ));
        }
        let embedding = embeddings.remove(0);

        if let Some(cache) = &self.cache {
            cache.put(text.to_string(), embedding.clone());
        }

        Ok(embedding)
    }
}
