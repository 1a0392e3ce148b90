//! Axum route handlers for the Job Tracker.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tracker::models::{JobApplication, NewJobApplication};

#[derive(Debug, Serialize)]
pub struct DeleteJobResponse {
    pub status: String,
}

/// GET /jobs
///
/// Returns every tracked application in insertion order.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    let jobs = state.jobs.list().await.map_err(AppError::Internal)?;
    Ok(Json(jobs))
}

/// POST /jobs
///
/// Stores a new application and returns it with its server-assigned id.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(new): Json<NewJobApplication>,
) -> Result<Json<JobApplication>, AppError> {
    if new.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    if new.company.trim().is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }

    let job = state.jobs.create(new).await.map_err(AppError::Internal)?;
    Ok(Json(job))
}

/// DELETE /jobs/:job_id
///
/// Idempotent: deleting an absent id still reports `deleted`.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<DeleteJobResponse>, AppError> {
    state.jobs.delete(&job_id).await.map_err(AppError::Internal)?;
    Ok(Json(DeleteJobResponse {
        status: "deleted".to_string(),
    }))
}
