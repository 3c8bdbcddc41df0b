use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use archrag::agent::Workflow;
use archrag::cache::EmbeddingCache;
use archrag::embeddings::OllamaEmbedder;
use archrag::graph::{build_knowledge_graph, save_graph_json};
use archrag::ingest::load_documents;
use archrag::llm::OllamaCompletion;
use archrag::retriever::GraphRetriever;
use archrag::Config;

/// Build a configured embedder with an optional LRU query-embedding cache.
fn build_embedder(config: &Config) -> OllamaEmbedder {
    let cache = if config.ollama.cache_capacity > 0 {
        Some(Arc::new(EmbeddingCache::new(config.ollama.cache_capacity)))
    } else {
        None
    };

    OllamaEmbedder::new_with_cache(
        config.ollama.base_url.clone(),
        config.ollama.embedding_model.clone(),
        config.ollama.timeout_secs,
        cache,
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    log::info!("Starting ArchRAG v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    log::info!("Docs folder: {}", config.docs_folder().display());
    log::info!("Embedding model: {}", config.ollama.embedding_model);
    log::info!("Completion model: {}", config.ollama.completion_model);

    // Graph and embedding index are built once, before any query is served,
    // then shared read-only by every workflow run.
    let documents = load_documents(config.docs_folder())?;
    let (graph, relations) = build_knowledge_graph(&documents);
    save_graph_json(&graph, &relations, config.graph_dump_path())?;

    let embedder = build_embedder(&config);
    let retriever = GraphRetriever::new(embedder, graph, config.retrieval.hops).await?;

    let completer = OllamaCompletion::new(
        config.ollama.base_url.clone(),
        config.ollama.completion_model.clone(),
        config.ollama.timeout_secs,
    );

    let workflow = Workflow::new(retriever, completer);

    println!("=== ArchRAG Chat ===");
    println!("Type 'exit' to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }

        let ctx = workflow.run(query).await;

        println!("\nAssistant: {}", ctx.answer.as_deref().unwrap_or(""));
        println!("\n--- Debug Info ---");
        println!("Steps: {:?}", ctx.steps);
        println!("Tools used: {:?}", ctx.tools_used);
        println!("Nodes traversed: {:?}", ctx.nodes_traversed);
        println!("----------------------\n");
    }

    Ok(())
}
