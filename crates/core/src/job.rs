// crates/core/src/job.rs
//! Per-job state: status, progress, and the append-only processing log.

use chrono::Local;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a processing job.
pub type JobId = Uuid;

/// Lifecycle status of a job.
///
/// `Completed` and `Failed` are absorbing: once a job is terminal its
/// status, progress, and logs are frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Severity of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// One immutable entry in a job's processing log.
///
/// Serialized with the severity under the `type` key, which is what the
/// frontend log viewer expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub level: LogLevel,
    pub message: String,
    /// Wall-clock time the entry was appended, `HH:MM:SS` local time.
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// Immutable processing options supplied at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ProcessingOptions {
    pub language: String,
    pub extract_text: bool,
    pub extract_tables: bool,
    pub extract_images: bool,
}

/// Mutable state of one job.
///
/// Mutated only by the job's own worker through [`crate::JobStore::mutate`];
/// readers receive cloned snapshots, so a snapshot is never torn between a
/// progress update and its log append.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub progress: u8,
    pub logs: Vec<LogEntry>,
    pub params: ProcessingOptions,
}

impl Job {
    pub fn new(id: JobId, params: ProcessingOptions) -> Self {
        Self {
            id,
            status: JobStatus::Processing,
            progress: 0,
            logs: Vec::new(),
            params,
        }
    }

    /// Apply one stage of progress: bump the checkpoint and append the
    /// stage's log line as a single unit. No-op once terminal.
    pub fn advance(&mut self, progress: u8, entry: LogEntry) {
        if self.status.is_terminal() {
            return;
        }
        debug_assert!(progress >= self.progress, "progress must not decrease");
        self.progress = progress;
        self.logs.push(entry);
    }

    /// Transition to `Completed` at progress 100. No-op once terminal.
    pub fn complete(&mut self, entry: LogEntry) {
        if self.status.is_terminal() {
            return;
        }
        self.progress = 100;
        self.status = JobStatus::Completed;
        self.logs.push(entry);
    }

    /// Transition to `Failed`, freezing progress where it was. No-op once
    /// terminal.
    pub fn fail(&mut self, entry: LogEntry) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Failed;
        self.logs.push(entry);
    }
}
