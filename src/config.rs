use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub archrag: ArchragConfig,
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// ArchRAG-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ArchragConfig {
    /// Directory containing the architecture documents (.md / .txt).
    pub docs_folder: PathBuf,
    /// Where the JSON graph dump is written (inspection only, never read back).
    #[serde(default = "default_graph_dump_path")]
    pub graph_dump_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Ollama collaborator configuration (embeddings + completion)
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub embedding_model: String,
    pub completion_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

/// Retrieval tuning configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Number of neighborhood rings expanded around the closest entity.
    #[serde(default = "default_hops")]
    pub hops: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            hops: default_hops(),
        }
    }
}

fn default_graph_dump_path() -> PathBuf {
    PathBuf::from("graph/graph.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_capacity() -> usize {
    1000
}

fn default_hops() -> usize {
    2
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in ARCHRAG_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config_path = std::env::var("ARCHRAG_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str).context("Failed to parse config.toml")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.archrag.docs_folder.exists() {
            anyhow::bail!(
                "docs_folder path does not exist: {}. Set docs_folder in config.toml to your docs directory.",
                self.archrag.docs_folder.display()
            );
        }

        if !self.archrag.docs_folder.is_dir() {
            anyhow::bail!(
                "docs_folder must be a directory, not a file: {}",
                self.archrag.docs_folder.display()
            );
        }

        if self.ollama.base_url.trim().is_empty() {
            anyhow::bail!("ollama.base_url must not be empty");
        }

        if self.ollama.embedding_model.trim().is_empty() {
            anyhow::bail!("ollama.embedding_model must not be empty");
        }

        if self.ollama.completion_model.trim().is_empty() {
            anyhow::bail!("ollama.completion_model must not be empty");
        }

        if self.ollama.timeout_secs == 0 {
            anyhow::bail!("ollama.timeout_secs must be greater than 0");
        }

        Ok(())
    }

    /// Get the docs root path (docs_folder from config.toml)
    pub fn docs_folder(&self) -> &Path {
        &self.archrag.docs_folder
    }

    /// Get the graph dump path
    pub fn graph_dump_path(&self) -> &Path {
        &self.archrag.graph_dump_path
    }
}
