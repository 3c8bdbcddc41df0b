use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::graph::{DependencyGraph, RelationMap};

/// Flat node/edge/relation dump, written for inspection only. The core never
/// reads this back; rebuilding always starts from the document source.
#[derive(Debug, Serialize)]
pub struct GraphDump<'a> {
    pub nodes: &'a [String],
    pub edges: &'a [(String, String)],
    pub relations: &'a RelationMap,
}

/// Serialize the graph and merged relations to pretty-printed JSON at `path`,
/// creating parent directories as needed.
pub fn save_graph_json(graph: &DependencyGraph, relations: &RelationMap, path: &Path) -> Result<()> {
    let dump = GraphDump {
        nodes: graph.nodes(),
        edges: graph.edges(),
        relations,
    };

    let json = serde_json::to_string_pretty(&dump)
        .map_err(|e| crate::error::ArchragError::Config(format!("Failed to serialize graph: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)?;

    log::info!("Graph saved to {}", path.display());
    Ok(())
}
