// crates/server/src/state.rs
//! Application state for the axum server.

use std::sync::Arc;
use std::time::Instant;

use docflow_core::{ContentStore, JobRunner, JobStore};

use crate::documents::DocumentStore;

/// Shared application state accessible from all route handlers.
///
/// The stores are owned here, not process-wide statics, so independent
/// server instances (and tests) get isolated state.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Raw uploaded documents (the upload collaborator).
    pub documents: DocumentStore,
    /// Live job state, shared with the runner's workers.
    pub jobs: Arc<JobStore>,
    /// Finished artifacts, written once per completed job.
    pub content: Arc<ContentStore>,
    /// Spawns one background worker per submitted job.
    pub runner: JobRunner,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new() -> Arc<Self> {
        Self::with_delay_scale(1.0)
    }

    /// Same as [`AppState::new`] with the simulated stage pauses scaled.
    /// Tests pass 0.0 so pipelines finish immediately.
    pub fn with_delay_scale(scale: f32) -> Arc<Self> {
        let jobs = Arc::new(JobStore::new());
        let content = Arc::new(ContentStore::new());
        let runner = JobRunner::new(Arc::clone(&jobs), Arc::clone(&content)).delay_scale(scale);
        Arc::new(Self {
            start_time: Instant::now(),
            documents: DocumentStore::new(),
            jobs,
            content,
            runner,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_core::ProcessingOptions;

    #[tokio::test]
    async fn test_app_state_new() {
        let state = AppState::new();
        assert!(state.uptime_secs() < 5);
        assert!(state.jobs.is_empty());
    }

    #[tokio::test]
    async fn test_runner_shares_stores_with_state() {
        let state = AppState::with_delay_scale(0.0);
        let id = state
            .runner
            .start(ProcessingOptions {
                language: "en".to_string(),
                extract_text: true,
                extract_tables: false,
                extract_images: false,
            })
            .unwrap();

        // The job created by the runner is visible through the state's store.
        assert!(state.jobs.get(id).is_ok());
        assert_eq!(state.jobs.len(), 1);
    }
}
