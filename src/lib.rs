pub mod agent;
pub mod cache;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod llm;
pub mod retriever;

pub use agent::{QueryContext, Route, Workflow};
pub use config::Config;
pub use error::{ArchragError, Result};
pub use graph::{build_knowledge_graph, DependencyGraph, RelationMap};
pub use retriever::GraphRetriever;
