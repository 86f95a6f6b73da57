// crates/server/src/routes/processing.rs
//! Submission, status polling, and artifact retrieval.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use docflow_core::{ExtractedContent, JobStatus, LogEntry, ProcessingOptions, StoreError};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body of POST /api/documents/process.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub document_id: Uuid,
    pub language: String,
    #[serde(default = "default_true")]
    pub extract_text: bool,
    #[serde(default)]
    pub extract_tables: bool,
    #[serde(default)]
    pub extract_images: bool,
}

fn default_true() -> bool {
    true
}

/// Response for a successfully started job.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ProcessStartedResponse {
    pub job_id: Uuid,
    pub status: String,
}

/// Snapshot of a job's state, as returned by the status endpoint.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub progress: u8,
    pub logs: Vec<LogEntry>,
}

/// POST /api/documents/process - Submit a processing job.
///
/// Returns the job id immediately; the pipeline runs in the background and
/// is observed through the status endpoint.
pub async fn process_document(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProcessRequest>,
) -> ApiResult<Json<ProcessStartedResponse>> {
    if !state.documents.exists(request.document_id) {
        return Err(ApiError::BadRequest(format!(
            "unknown document id: {}",
            request.document_id
        )));
    }
    if request.language.trim().is_empty() {
        return Err(ApiError::BadRequest("language is required".to_string()));
    }

    let job_id = state.runner.start(ProcessingOptions {
        language: request.language,
        extract_text: request.extract_text,
        extract_tables: request.extract_tables,
        extract_images: request.extract_images,
    })?;
    tracing::info!(%job_id, document_id = %request.document_id, "processing started");

    Ok(Json(ProcessStartedResponse {
        job_id,
        status: "started".to_string(),
    }))
}

/// GET /api/documents/status/{job_id} - Poll a job's state.
///
/// The snapshot is consistent: progress and logs always reflect the same
/// stage, never a half-applied mutation.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<StatusResponse>> {
    let job = state.jobs.get(job_id)?;
    Ok(Json(StatusResponse {
        job_id,
        status: job.status,
        progress: job.progress,
        logs: job.logs,
    }))
}

/// GET /api/documents/extract/{job_id} - Fetch the finished artifact.
///
/// 404 until the job completes; a failed job never produces content.
pub async fn get_extracted(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<ExtractedContent>> {
    let artifact = state.content.get(job_id).map_err(|e| match e {
        StoreError::NotFound(id) => ApiError::ContentNotAvailable(id),
        other => other.into(),
    })?;
    Ok(Json(artifact))
}

/// Create the processing routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/documents/process", post(process_document))
        .route("/documents/status/{job_id}", get(get_status))
        .route("/documents/extract/{job_id}", get(get_extracted))
}
