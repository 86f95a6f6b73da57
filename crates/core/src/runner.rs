// crates/core/src/runner.rs
//! The background worker that advances a job through its stages, and the
//! runner that spawns one worker per submitted job.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::artifact;
use crate::job::{Job, JobId, LogEntry, LogLevel, ProcessingOptions};
use crate::store::{ContentStore, JobStore, StoreError};

/// One unit of simulated work: a progress checkpoint, the log line that
/// announces it, and the pause that follows.
struct Stage {
    progress: u8,
    level: LogLevel,
    message: String,
    pause: Duration,
}

impl Stage {
    fn new(progress: u8, message: impl Into<String>, pause_ms: u64) -> Self {
        Self {
            progress,
            level: LogLevel::Info,
            message: message.into(),
            pause: Duration::from_millis(pause_ms),
        }
    }
}

/// Ordered stage list for one submission, final completion excluded.
///
/// Optional stages are skipped without renumbering the rest: clients rely on
/// the fixed 10/30/50/70/85/100 checkpoint schedule whichever options are
/// set.
fn stage_plan(params: &ProcessingOptions) -> Vec<Stage> {
    let mut plan = vec![
        Stage::new(10, "Starting document processing...", 1000),
        Stage::new(30, "Extracting text content...", 1500),
    ];
    if params.extract_tables {
        plan.push(Stage::new(50, "Detecting and extracting tables...", 1000));
    }
    if params.extract_images {
        plan.push(Stage::new(70, "Processing images...", 1000));
    }
    plan.push(Stage::new(
        85,
        format!("Processing language: {}", params.language),
        800,
    ));
    plan
}

/// Spawns and drives the per-job background workers.
///
/// Each call to [`JobRunner::start`] creates the job in the store and spawns
/// exactly one worker task for it; the submitting caller never waits on the
/// worker. Cancelling the shutdown token moves every in-flight job to
/// `failed` instead of leaving it `processing` forever.
pub struct JobRunner {
    jobs: Arc<JobStore>,
    content: Arc<ContentStore>,
    shutdown: CancellationToken,
    delay_scale: f32,
}

impl JobRunner {
    pub fn new(jobs: Arc<JobStore>, content: Arc<ContentStore>) -> Self {
        Self {
            jobs,
            content,
            shutdown: CancellationToken::new(),
            delay_scale: 1.0,
        }
    }

    /// Scale the simulated per-stage pauses. Tests pass 0.0 so pipelines
    /// finish as fast as the scheduler allows.
    pub fn delay_scale(mut self, scale: f32) -> Self {
        self.delay_scale = scale;
        self
    }

    /// Token observed by all workers; cancel it to stop them.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Request cancellation of every in-flight worker.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Create a job (status `processing`, progress 0, empty logs) and spawn
    /// its worker. Returns the fresh job id without blocking on the work.
    pub fn start(&self, params: ProcessingOptions) -> Result<JobId, StoreError> {
        let id = Uuid::new_v4();
        self.jobs.create(Job::new(id, params.clone()))?;

        let jobs = Arc::clone(&self.jobs);
        let content = Arc::clone(&self.content);
        let cancel = self.shutdown.clone();
        let scale = self.delay_scale;
        let language = params.language.clone();
        tokio::spawn(async move {
            if let Err(e) = run_pipeline(&jobs, &content, id, &params, &cancel, scale).await {
                // Worker errors never propagate to a caller; they become the
                // job's terminal state, visible only through polling.
                tracing::error!(job_id = %id, error = %e, "pipeline failed");
                let entry = LogEntry::new(LogLevel::Error, format!("Processing failed: {e}"));
                let _ = jobs.mutate(id, |job| job.fail(entry));
            }
        });

        tracing::debug!(job_id = %id, language = %language, "worker spawned");
        Ok(id)
    }
}

/// Walk the stage plan for one job, then publish the artifact and complete.
async fn run_pipeline(
    jobs: &JobStore,
    content: &ContentStore,
    id: JobId,
    params: &ProcessingOptions,
    cancel: &CancellationToken,
    delay_scale: f32,
) -> Result<(), StoreError> {
    for stage in stage_plan(params) {
        if cancel.is_cancelled() {
            return interrupt(jobs, id);
        }

        // One atomic mutation per stage: progress and log move together.
        let entry = LogEntry::new(stage.level, stage.message);
        jobs.mutate(id, |job| job.advance(stage.progress, entry))?;

        // The pause holds no lock, so readers poll freely while we sleep.
        tokio::select! {
            _ = cancel.cancelled() => return interrupt(jobs, id),
            _ = tokio::time::sleep(stage.pause.mul_f32(delay_scale)) => {}
        }
    }

    // Artifact first, terminal mutation second: a reader that observes
    // `completed` must already be able to fetch the artifact.
    content.put(id, artifact::synthesize(params))?;
    let entry = LogEntry::new(
        LogLevel::Success,
        "Document processing completed successfully!",
    );
    jobs.mutate(id, |job| job.complete(entry))?;

    tracing::debug!(job_id = %id, "job completed");
    Ok(())
}

fn interrupt(jobs: &JobStore, id: JobId) -> Result<(), StoreError> {
    tracing::warn!(job_id = %id, "worker interrupted by shutdown");
    let entry = LogEntry::new(LogLevel::Error, "Processing was interrupted");
    jobs.mutate(id, |job| job.fail(entry))
}
