use tracing::{error, info};

use crate::llm_client::retry::{retry, RetryPolicy};
use crate::llm_client::TextGenerator;
use crate::review::models::AnalysisResult;
use crate::review::prompts::PromptTemplate;

/// Sends the résumé text to the model under `policy`.
///
/// Never fails: once the retry budget is spent the result degrades to
/// `AnalysisResult::unavailable`, which callers detect through `status`.
pub async fn analyze_resume(
    llm: &dyn TextGenerator,
    template: &PromptTemplate,
    policy: &RetryPolicy,
    filename: String,
    resume_text: &str,
) -> AnalysisResult {
    let prompt = template.render(resume_text);
    let prompt = prompt.as_str();

    match retry(policy, "resume_review", move || llm.generate(prompt)).await {
        Ok(analysis) => {
            info!(model = llm.model_id(), chars = analysis.len(), "analysis complete");
            AnalysisResult::success(filename, analysis, llm.model_id())
        }
        Err(e) => {
            error!(
                attempts = policy.max_attempts,
                error = %e,
                "analysis unavailable, returning degraded result"
            );
            AnalysisResult::unavailable(filename)
        }
    }
}
