pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::architect;
use crate::growth;
use crate::state::AppState;
use crate::tracker;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume Architect
        .route("/optimize", post(architect::handlers::handle_optimize))
        // Growth Engine
        .route("/analyze-gap", post(growth::handlers::handle_analyze_gap))
        // Job Tracker
        .route(
            "/jobs",
            get(tracker::handlers::handle_list_jobs).post(tracker::handlers::handle_create_job),
        )
        .route("/jobs/:job_id", delete(tracker::handlers::handle_delete_job))
        .with_state(state)
}
