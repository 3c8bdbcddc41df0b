use crate::agent::{QueryContext, Route};
use crate::embeddings::TextEmbedder;
use crate::llm::TextCompleter;
use crate::retriever::GraphRetriever;

/// Six-state orchestration workflow:
/// router -> {retrieve | summarize | calc} -> reason -> error -> end.
///
/// All transitions are unconditional except the router's. Each state appends
/// its own identifier to the step log exactly once, unconditionally, as the
/// last effect before returning. Collaborator failures are caught at the
/// state that observes them and recorded in the context's error field; the
/// error state is the sole recovery point and every run reaches the end with
/// some answer.
pub struct Workflow<E, C> {
    retriever: GraphRetriever<E>,
    completer: C,
}

impl<E: TextEmbedder, C: TextCompleter> Workflow<E, C> {
    pub fn new(retriever: GraphRetriever<E>, completer: C) -> Self {
        Self {
            retriever,
            completer,
        }
    }

    /// Run the full workflow for one query and return the final context.
    pub async fn run(&self, query: &str) -> QueryContext {
        let mut ctx = QueryContext::new(query);

        let route = self.router_node(&mut ctx);
        match route {
            Route::Retrieve => self.retriever_node(&mut ctx).await,
            Route::Summarize => self.summarize_node(&mut ctx).await,
            Route::Calc => self.calc_node(&mut ctx).await,
        }
        self.reasoning_node(&mut ctx).await;
        self.error_node(&mut ctx);

        ctx
    }

    fn router_node(&self, ctx: &mut QueryContext) -> Route {
        let route = Route::classify(&ctx.query);
        ctx.route = Some(route);

        log::debug!("Routed query to {}", route);
        ctx.steps.push(format!("router:{}", route));
        route
    }

    async fn retriever_node(&self, ctx: &mut QueryContext) {
        match self.retriever.retrieve(&ctx.query).await {
            Ok(result) => {
                ctx.context_nodes = result.related_nodes.clone();
                ctx.nodes_traversed = result.related_nodes;
            }
            Err(e) => ctx.error = Some(e.to_string()),
        }

        ctx.tools_used.push("graph_retriever".to_string());
        ctx.steps.push("retriever_node".to_string());
    }

    // Performs the same retrieval as the retriever node; no distinct
    // summarization logic exists yet, only the tool/step labels differ.
    async fn summarize_node(&self, ctx: &mut QueryContext) {
        match self.retriever.retrieve(&ctx.query).await {
            Ok(result) => {
                ctx.context_nodes = result.related_nodes.clone();
                ctx.nodes_traversed = result.related_nodes;
            }
            Err(e) => ctx.error = Some(e.to_string()),
        }

        ctx.tools_used.push("summarize_tool".to_string());
        ctx.steps.push("summarize_node".to_string());
    }

    async fn calc_node(&self, ctx: &mut QueryContext) {
        match self.retriever.retrieve(&ctx.query).await {
            Ok(result) => {
                let entity = result.closest_entity;
                let dependents = self.retriever.graph().predecessors(&entity).to_vec();

                ctx.calc_result = Some(dependents.len());

                let mut nodes = vec![entity];
                nodes.extend(dependents);
                ctx.context_nodes = nodes.clone();
                ctx.nodes_traversed = nodes;
            }
            Err(e) => ctx.error = Some(e.to_string()),
        }

        ctx.tools_used.push("calc_tool".to_string());
        ctx.steps.push("calc_node".to_string());
    }

    async fn reasoning_node(&self, ctx: &mut QueryContext) {
        // A tool state already failed: skip the completion call so the error
        // state can convert the recorded error into the answer.
        if ctx.error.is_none() {
            let prompt = build_prompt(&ctx.query, &ctx.context_nodes, ctx.calc_result);

            match self.completer.complete(&prompt).await {
                Ok(answer) => ctx.answer = Some(answer),
                Err(e) => ctx.error = Some(e.to_string()),
            }
        }

        ctx.steps.push("reasoning_node".to_string());
    }

    fn error_node(&self, ctx: &mut QueryContext) {
        if ctx.answer.is_none() {
            if let Some(error) = &ctx.error {
                ctx.answer = Some(format!("Sorry, I couldn't answer because: {}", error));
            }
        }

        ctx.steps.push("error_node".to_string());
    }
}

/// Build the deterministic reasoning prompt: the raw query, the context-node
/// list, the count result when present, and a fixed policy block.
fn build_prompt(query: &str, context_nodes: &[String], calc_result: Option<usize>) -> String {
    let mut prompt = format!(
        "You are an AI reasoning over a service architecture.\n\
         \n\
         User Question:\n\
         {}\n\
         \n\
         Relevant Graph Context:\n\
         {:?}\n",
        query, context_nodes
    );

    if let Some(count) = calc_result {
        prompt.push_str(&format!("\nCount Result: {}\n", count));
    }

    prompt.push_str(
        "\nRules:\n\
         - Respond based ONLY on provided graph context.\n\
         - If an entity does not exist, say you cannot find it.\n\
         - Never hallucinate missing services.\n",
    );

    prompt
}
