//! Axum route handlers for the Growth Engine.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ResponseStatus;
use crate::gemini::ErrorKind;
use crate::growth::prompts::gap_analysis_prompt;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeGapRequest {
    pub job_description: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeGapResponse {
    pub status: ResponseStatus,
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

/// POST /analyze-gap
///
/// Returns the model's gap report verbatim — no post-processing, the labeled
/// sections are part of the prompt contract.
pub async fn handle_analyze_gap(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeGapRequest>,
) -> Json<AnalyzeGapResponse> {
    let prompt = gap_analysis_prompt(&request.job_description);

    match state.gemini.generate(&prompt, request.api_key.as_deref()).await {
        Ok(analysis) => Json(AnalyzeGapResponse {
            status: ResponseStatus::Success,
            analysis,
            error_kind: None,
        }),
        Err(e) => {
            warn!("gap analysis failed: {e}");
            Json(AnalyzeGapResponse {
                status: ResponseStatus::Error,
                analysis: e.to_string(),
                error_kind: Some(e.kind()),
            })
        }
    }
}
