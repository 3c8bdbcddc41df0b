//! Deterministic query workflow: router -> tool -> reason -> error -> end.

pub mod state;
pub mod workflow;

pub use state::{QueryContext, Route};
pub use workflow::Workflow;
