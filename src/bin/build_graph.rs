use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use archrag::graph::{build_knowledge_graph, save_graph_json};
use archrag::ingest::load_documents;
use archrag::Config;

#[derive(Parser, Debug)]
#[command(name = "build-graph")]
#[command(about = "Build the dependency graph from the docs folder and dump it as JSON")]
struct Args {
    /// Override the configured dump path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args = Args::parse();

    let config = Config::load()?;
    log::info!("Docs folder: {}", config.docs_folder().display());

    let documents = load_documents(config.docs_folder())?;
    if documents.is_empty() {
        log::warn!("No documents found. Check docs_folder path in config.toml.");
    }

    let (graph, relations) = build_knowledge_graph(&documents);

    let output = args
        .output
        .unwrap_or_else(|| config.graph_dump_path().to_path_buf());
    save_graph_json(&graph, &relations, &output)?;

    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", graph.edge_count());
    println!("Dump:  {}", output.display());

    Ok(())
}
