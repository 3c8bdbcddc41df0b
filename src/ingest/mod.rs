//! Document loading and entity/relation extraction.
//!
//! The loader is plumbing: it yields `(name, content)` pairs from the docs
//! folder with no validation beyond "text blob". The extractor pulls entity
//! names and declared dependency / used-by lists out of each document with
//! fixed surface patterns; malformed or header-less documents yield empty
//! sets rather than errors (best-effort parsing by design).

pub mod extractor;
pub mod loader;

pub use extractor::{
    build_entity_relation, extract_entities, extract_section, extract_section_dependencies,
    normalize,
};
pub use loader::{load_documents, Document};
