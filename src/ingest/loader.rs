use std::path::Path;

use walkdir::WalkDir;

use crate::error::Result;

/// One raw document from the corpus.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the docs folder.
    pub name: String,
    pub content: String,
}

/// Load all architecture documents under `root`.
///
/// Recursively walks the directory tree and reads every `.md` and `.txt`
/// file (case-insensitive extension match). Results are sorted by name so
/// downstream graph construction is deterministic; document order carries no
/// semantic meaning beyond that.
pub fn load_documents(root: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        if !matches!(extension.as_str(), "md" | "txt") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(crate::error::ArchragError::Io)?;

        let name = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        documents.push(Document { name, content });
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));

    log::info!("{} documents loaded from {}", documents.len(), root.display());
    Ok(documents)
}
