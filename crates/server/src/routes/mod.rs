//! API route handlers for the docflow server.

pub mod documents;
pub mod health;
pub mod processing;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET  /api/health - Health check
/// - POST /api/documents/upload - Store an uploaded file
/// - GET  /api/documents/languages/{document_id} - Stub detection list
/// - POST /api/documents/process - Submit a processing job
/// - GET  /api/documents/status/{job_id} - Poll a job's state
/// - GET  /api/documents/extract/{job_id} - Fetch the finished artifact
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", documents::router())
        .nest("/api", processing::router())
        .with_state(state)
}
