//! Abstract boundary to the managed document store.
//!
//! The backend is an external collaborator: a document database addressed by
//! slash-joined paths, with atomic relative counter adjustment and standing
//! snapshot subscriptions as primitives. Everything in this module is
//! storage-agnostic; [`crate::infrastructure::store::MemoryStore`] provides
//! the in-process implementation used by tests and local development.

pub mod document;
pub mod gateway;
pub mod query;

pub use document::{Document, FieldValue, join_path};
pub use gateway::{CancelHandle, DocumentStore, SnapshotCallback, StoreError};
pub use query::{Direction, OrderBy, Query, QuerySnapshot, SnapshotDoc};
