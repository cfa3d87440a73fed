use std::sync::Arc;

use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::TextGenerator;
use crate::review::prompts::PromptTemplate;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `LlmClient` in production, swapped for a scripted one in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub prompt: PromptTemplate,
    pub retry_policy: RetryPolicy,
}
