//! The document store gateway trait and its error type.

use super::document::{Document, FieldValue};
use super::query::{Query, QuerySnapshot};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No document at {0}")]
    NotFound(String),
    #[error("Field {field} at {path} is not a number")]
    NotANumber { path: String, field: String },
    #[error("Invalid path segment: {0}")]
    InvalidPath(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Callback invoked with each snapshot of a standing query.
pub type SnapshotCallback = Arc<dyn Fn(QuerySnapshot) + Send + Sync>;

/// Handle to a live subscription.
///
/// Cancellation happens exactly once: either through [`CancelHandle::cancel`]
/// or when the handle is dropped, whichever comes first. A screen that owns
/// one of these drops it on teardown and the subscription dies with it.
pub struct CancelHandle {
    task: Option<tokio::task::JoinHandle<()>>,
}

impl CancelHandle {
    pub fn new(task: tokio::task::JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Stop delivery of further snapshots.
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelHandle")
            .field("active", &self.task.is_some())
            .finish()
    }
}

/// Operation set of the external document store.
///
/// Paths are slash-joined opaque strings (`posts/{id}`,
/// `posts/{id}/likes/{uid}`). The store is the only shared mutable resource
/// in the system; `increment` is its atomic relative adjustment primitive and
/// the sole concurrency guarantee the domain logic builds on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document, `None` when absent.
    async fn read(&self, path: &str) -> Result<Option<Document>, StoreError>;

    /// Write a document. With `merge` the given fields are laid over any
    /// existing ones; without it the document is replaced.
    async fn write(&self, path: &str, fields: Document, merge: bool) -> Result<(), StoreError>;

    /// Delete a document. Deleting an absent document is a no-op.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;

    /// Create a document with a store-generated id, returning the id.
    async fn create(&self, collection: &str, fields: Document) -> Result<String, StoreError>;

    /// Atomically adjust a numeric field by `delta`, relative to whatever
    /// value the store holds at apply time. Never a read-modify-write on the
    /// client side.
    async fn increment(&self, path: &str, field: &str, delta: i64) -> Result<(), StoreError>;

    /// Register a standing query. The callback receives an initial snapshot
    /// and then a fresh one on every matching change until the handle is
    /// cancelled or dropped.
    fn subscribe(&self, query: Query, on_snapshot: SnapshotCallback) -> CancelHandle;

    /// Sentinel resolved to the server's clock when the write is applied.
    fn server_timestamp(&self) -> FieldValue {
        FieldValue::ServerTimestamp
    }
}
