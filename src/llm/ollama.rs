use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ArchragError, Result};
use crate::llm::TextCompleter;

/// Request structure for the Ollama generate API
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response structure from the Ollama generate API
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama text-completion client.
///
/// Calls `POST {base_url}/api/generate` with `stream: false` and returns the
/// response text verbatim. The request timeout ensures a hung collaborator
/// surfaces as a typed error instead of stalling the workflow run.
pub struct OllamaCompletion {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaCompletion {
    /// Create a new completion client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// normal operation).
    pub fn new(base_url: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

impl TextCompleter for OllamaCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ArchragError::Completion(format!("Network error: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(ArchragError::Completion(format!(
                "Ollama API error {}: {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ArchragError::Completion(format!("Failed to parse response: {}", e)))?;

        log::debug!("Completion call took {:?}", start.elapsed());

        Ok(result.response)
    }
}
