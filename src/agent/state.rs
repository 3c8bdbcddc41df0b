use std::fmt;

/// The workflow's chosen tool path for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Retrieve,
    Summarize,
    Calc,
}

impl Route {
    /// Classify a query by keyword, tested in order: count phrasing wins
    /// over summary phrasing; anything else falls back to plain retrieval.
    pub fn classify(query: &str) -> Route {
        let query = query.to_lowercase();

        if query.contains("how many") || query.contains("count") {
            Route::Calc
        } else if query.contains("summarize") || query.contains("summary") {
            Route::Summarize
        } else {
            Route::Retrieve
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Retrieve => "retrieve",
            Route::Summarize => "summarize",
            Route::Calc => "calc",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable per-query state, owned exclusively by one workflow run.
///
/// All fields are always present: optional values start as `None` and the
/// audit logs as empty vectors. The three logs are append-only and are the
/// system's primary observability artifact.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    pub query: String,
    pub route: Option<Route>,
    pub context_nodes: Vec<String>,
    pub calc_result: Option<usize>,
    pub answer: Option<String>,
    pub error: Option<String>,
    /// Workflow states executed, in order.
    pub steps: Vec<String>,
    /// Tools invoked, in order.
    pub tools_used: Vec<String>,
    /// Graph nodes touched during retrieval.
    pub nodes_traversed: Vec<String>,
}

impl QueryContext {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Self::default()
        }
    }
}
