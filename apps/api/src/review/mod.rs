// Résumé review: upload validation, text extraction, model feedback.
// All model calls go through llm_client via the `TextGenerator` in AppState.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod upload;
