use thiserror::Error;

/// Main error type for ArchRAG
#[derive(Error, Debug)]
pub enum ArchragError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Embedding API errors
    #[error("Embedding API error: {0}")]
    Embedding(String),

    /// Completion API errors
    #[error("Completion API error: {0}")]
    Completion(String),

    /// The dependency graph has no nodes to index
    #[error("Graph has no entities to index")]
    EmptyGraph,

    /// Embedding lookup yielded no comparable entity
    #[error("No matching entity found for query")]
    NoMatch,
}

/// Convenient Result type using ArchragError
pub type Result<T> = std::result::Result<T, ArchragError>;
