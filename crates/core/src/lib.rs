// crates/core/src/lib.rs
//! docflow-core — job lifecycle for the simulated document pipeline.
//!
//! A submitted job lives in a [`JobStore`] entry that exactly one background
//! worker mutates while any number of readers take snapshots of it. The
//! [`JobRunner`] spawns one worker per job; the worker walks a fixed stage
//! plan, appending log entries and advancing progress, and on success writes
//! the finished artifact into the [`ContentStore`].

pub mod artifact;
pub mod job;
pub mod runner;
pub mod store;

pub use artifact::{DocumentTree, ExtractedContent, Section};
pub use job::{Job, JobId, JobStatus, LogEntry, LogLevel, ProcessingOptions};
pub use runner::JobRunner;
pub use store::{ContentStore, JobStore, StoreError};
