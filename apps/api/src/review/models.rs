use serde::{Deserialize, Serialize};

/// Reported as `llm_source` when no model produced the analysis.
pub const NO_MODEL_SOURCE: &str = "None";

/// Returned as `analysis` when every attempt against the model failed.
pub const ANALYSIS_UNAVAILABLE: &str =
    "AI analysis is temporarily unavailable. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// Response body of `POST /analyze`. One per accepted request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub analysis: String,
    pub llm_source: String,
    pub status: AnalysisStatus,
}

impl AnalysisResult {
    pub fn success(filename: String, analysis: String, model_id: &str) -> Self {
        Self {
            filename,
            analysis,
            llm_source: model_id.to_string(),
            status: AnalysisStatus::Success,
        }
    }

    /// Degraded result: HTTP 200, but `status` tells the caller the model was unreachable.
    pub fn unavailable(filename: String) -> Self {
        Self {
            filename,
            analysis: ANALYSIS_UNAVAILABLE.to_string(),
            llm_source: NO_MODEL_SOURCE.to_string(),
            status: AnalysisStatus::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unavailable_serializes_error_shape() {
        let value = serde_json::to_value(AnalysisResult::unavailable("cv.pdf".into())).unwrap();
        assert_eq!(
            value,
            json!({
                "filename": "cv.pdf",
                "analysis": ANALYSIS_UNAVAILABLE,
                "llm_source": "None",
                "status": "error"
            })
        );
    }

    #[test]
    fn test_success_reports_model() {
        let result =
            AnalysisResult::success("cv.docx".into(), "Solid.".into(), "claude-sonnet-4-5");
        let value = serde_json::to_value(result).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["llm_source"], "claude-sonnet-4-5");
    }
}
