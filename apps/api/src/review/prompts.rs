use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

/// Placeholder substituted with the extracted résumé text.
pub const RESUME_TEXT_PLACEHOLDER: &str = "{resume_text}";

/// Built-in review prompt. Replace `{resume_text}` before sending.
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"You are an experienced technical recruiter and career coach.
Review the résumé below and give the candidate actionable feedback.

Structure your answer with these sections:
1. Overall impression (2-3 sentences)
2. Strengths
3. Weaknesses and gaps
4. Impact and quantification: which bullets lack measurable outcomes, with rewritten examples
5. Formatting and readability
6. Top 5 concrete improvements, ordered by expected impact

Rules:
- Base every observation on the text provided. Do NOT invent employers, dates or skills.
- Be direct and specific; quote the résumé when pointing at a problem.
- If the text looks truncated or garbled (e.g. a scanned document), say so first.

Résumé text:
"""
{resume_text}
"""
"#;

/// The prompt template shared by every request. Loaded once at startup.
#[derive(Debug, Clone)]
pub struct PromptTemplate(Arc<str>);

impl PromptTemplate {
    /// Reads the template from `path`, or uses the built-in one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let template = std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read prompt template {}", path.display())
                })?;
                Self::parse(template)
                    .with_context(|| format!("Invalid prompt template {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    fn parse(template: String) -> Result<Self> {
        if !template.contains(RESUME_TEXT_PLACEHOLDER) {
            bail!("template must contain the {RESUME_TEXT_PLACEHOLDER} placeholder");
        }
        Ok(Self(template.into()))
    }

    pub fn render(&self, resume_text: &str) -> String {
        self.0.replace(RESUME_TEXT_PLACEHOLDER, resume_text)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self(REVIEW_PROMPT_TEMPLATE.into())
    }
}
