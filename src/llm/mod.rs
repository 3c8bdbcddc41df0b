pub mod ollama;

pub use ollama::OllamaCompletion;

use crate::error::Result;

/// Narrow interface over the text-completion collaborator: one prompt in,
/// one response string out, may fail. The workflow depends only on this
/// trait so tests can use a deterministic stand-in.
#[allow(async_fn_in_trait)]
pub trait TextCompleter {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
