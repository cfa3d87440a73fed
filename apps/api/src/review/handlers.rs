//! Axum route handlers for the Review API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::review::analyzer::analyze_resume;
use crate::review::models::AnalysisResult;
use crate::review::upload::read_upload;
use crate::state::AppState;

/// POST /analyze
///
/// validate → extract → analyze. Validation and extraction failures are HTTP
/// errors; a model outage is reported in the body with `status: "error"`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("analyze", %request_id, filename = field::Empty);

    async move {
        let upload = read_upload(&mut multipart).await?;
        Span::current().record("filename", upload.filename.as_str());
        info!(kind = ?upload.kind, bytes = upload.bytes.len(), "résumé received");

        let text = extract_text(upload.kind, upload.bytes).await?;
        if text.is_empty() {
            warn!("no extractable text, sending empty résumé to the model");
        } else {
            info!(chars = text.len(), "text extracted");
        }

        let result = analyze_resume(
            state.llm.as_ref(),
            &state.prompt,
            &state.retry_policy,
            upload.filename,
            &text,
        )
        .await;

        Ok(Json(result))
    }
    .instrument(span)
    .await
}
