// crates/core/src/store.rs
//! Concurrency-safe stores for live job state and finished artifacts.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

use crate::artifact::ExtractedContent;
use crate::job::{Job, JobId};

/// Errors from the job and content stores.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("job not found: {0}")]
    NotFound(JobId),

    #[error("duplicate job id: {0}")]
    Duplicate(JobId),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Map of job id to live job state.
///
/// The outer `RwLock` guards map membership only and is never held while a
/// job is inspected. Each entry carries its own `Mutex`, so a worker's
/// read-modify-write of progress + logs + status excludes readers of that
/// job without contending with readers or writers of any other job.
///
/// Uses `std::sync` locks, not `tokio::sync`: every critical section is a
/// short in-memory operation and no lock is ever held across an `.await`.
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, Arc<Mutex<Job>>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a freshly created job.
    ///
    /// `Duplicate` cannot realistically fire with random 128-bit ids; the
    /// check exists so a collision fails loudly instead of clobbering a
    /// live job.
    pub fn create(&self, job: Job) -> Result<(), StoreError> {
        let mut map = self.jobs.write().map_err(|_| StoreError::Poisoned)?;
        match map.entry(job.id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(job.id)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(job)));
                Ok(())
            }
        }
    }

    /// Consistent point-in-time snapshot of a job's state.
    pub fn get(&self, id: JobId) -> Result<Job, StoreError> {
        let entry = self.entry(id)?;
        let job = entry.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(job.clone())
    }

    /// Apply `f` to the stored job under that job's lock. The whole closure
    /// runs as one atomic unit with respect to [`JobStore::get`].
    pub fn mutate<F>(&self, id: JobId, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Job),
    {
        let entry = self.entry(id)?;
        let mut job = entry.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut job);
        Ok(())
    }

    /// Number of jobs ever created. Jobs are never evicted.
    pub fn len(&self) -> usize {
        match self.jobs.read() {
            Ok(map) => map.len(),
            Err(e) => {
                tracing::error!("job store lock poisoned: {e}");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, id: JobId) -> Result<Arc<Mutex<Job>>, StoreError> {
        let map = self.jobs.read().map_err(|_| StoreError::Poisoned)?;
        map.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Finished artifacts, keyed by job id.
///
/// Written exactly once per completed job by its worker; never updated or
/// deleted. A failed job never gets an entry.
pub struct ContentStore {
    content: RwLock<HashMap<JobId, ExtractedContent>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self {
            content: RwLock::new(HashMap::new()),
        }
    }

    /// Store the artifact for a completed job. `Duplicate` guards the
    /// write-once contract.
    pub fn put(&self, id: JobId, artifact: ExtractedContent) -> Result<(), StoreError> {
        let mut map = self.content.write().map_err(|_| StoreError::Poisoned)?;
        match map.entry(id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(id)),
            Entry::Vacant(slot) => {
                slot.insert(artifact);
                Ok(())
            }
        }
    }

    /// Fetch the artifact, or `NotFound` while the job is still processing
    /// or after it failed.
    pub fn get(&self, id: JobId) -> Result<ExtractedContent, StoreError> {
        let map = self.content.read().map_err(|_| StoreError::Poisoned)?;
        map.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}
