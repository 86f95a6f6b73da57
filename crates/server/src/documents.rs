// crates/server/src/documents.rs
//! In-memory storage for raw uploaded documents.
//!
//! This is the upload collaborator the processing core consumes: the
//! process endpoint only needs an existence check, and the languages stub
//! needs the same. Bytes are kept for the lifetime of the process; nothing
//! is persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One uploaded file with its metadata.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub data: Bytes,
}

/// Concurrency-safe map of document id to uploaded content.
pub struct DocumentStore {
    documents: RwLock<HashMap<Uuid, StoredDocument>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Store a document under a fresh random id and return the id.
    pub fn insert(&self, document: StoredDocument) -> Uuid {
        let id = Uuid::new_v4();
        match self.documents.write() {
            Ok(mut map) => {
                map.insert(id, document);
            }
            Err(e) => tracing::error!("document store lock poisoned: {e}"),
        }
        id
    }

    pub fn exists(&self, id: Uuid) -> bool {
        match self.documents.read() {
            Ok(map) => map.contains_key(&id),
            Err(e) => {
                tracing::error!("document store lock poisoned: {e}");
                false
            }
        }
    }

    pub fn get(&self, id: Uuid) -> Option<StoredDocument> {
        match self.documents.read() {
            Ok(map) => map.get(&id).cloned(),
            Err(e) => {
                tracing::error!("document store lock poisoned: {e}");
                None
            }
        }
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
