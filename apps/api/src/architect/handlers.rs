//! Axum route handlers for the Resume Architect.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::architect::prompts::optimize_prompt;
use crate::errors::ResponseStatus;
use crate::gemini::ErrorKind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub description: String,
    #[serde(default)]
    pub current_latex: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub status: ResponseStatus,
    pub optimized_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

/// POST /optimize
///
/// Rewrites a LaTeX resume (or drafts one from scratch) toward the caller's
/// request. Failures are reported in the body, never as an HTTP fault.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Json<OptimizeResponse> {
    let prompt = optimize_prompt(&request.description, &request.current_latex);

    match state.gemini.generate(&prompt, request.api_key.as_deref()).await {
        Ok(text) => Json(OptimizeResponse {
            status: ResponseStatus::Success,
            optimized_text: strip_code_fences(&text),
            error_kind: None,
        }),
        Err(e) => {
            warn!("resume optimization failed: {e}");
            Json(OptimizeResponse {
                status: ResponseStatus::Error,
                optimized_text: e.to_string(),
                error_kind: Some(e.kind()),
            })
        }
    }
}

/// Removes every ```latex / ``` fence marker the model may have wrapped its
/// answer in, keeping the enclosed LaTeX intact.
fn strip_code_fences(text: &str) -> String {
    text.replace("```latex", "").replace("```", "")
}
