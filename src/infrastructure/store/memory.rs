//! In-process document store used by tests and local development.
//!
//! Semantics follow the managed backend the app runs against in production:
//! slash-joined document paths, merge or replace writes, idempotent deletes,
//! atomic relative increments, server-resolved timestamps, and standing
//! query subscriptions that deliver an initial snapshot plus one snapshot per
//! observed change.

use crate::domain::store::document::{self, Document, FieldValue};
use crate::domain::store::{
    CancelHandle, Direction, DocumentStore, Query, QuerySnapshot, SnapshotCallback, SnapshotDoc,
    StoreError,
};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::trace;
use uuid::Uuid;

/// Capacity of the change-notification channel; a lagged subscriber
/// re-evaluates its query instead of missing updates.
const CHANGE_CHANNEL_CAPACITY: usize = 256;

pub struct MemoryStore {
    docs: Arc<RwLock<BTreeMap<String, Document>>>,
    changes: broadcast::Sender<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            docs: Arc::new(RwLock::new(BTreeMap::new())),
            changes,
        }
    }

    fn notify(&self, path: &str) {
        // No receivers is fine; nobody is subscribed yet.
        let _ = self.changes.send(path.to_string());
    }

    fn validate_path(path: &str) -> Result<(), StoreError> {
        if path.is_empty() || !path.split('/').all(document::is_valid_segment) {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(())
    }

    /// Replace write-time sentinels with the store's clock.
    fn resolve_sentinels(fields: &mut Document) {
        let now = Utc::now();
        for value in fields.values_mut() {
            if *value == FieldValue::ServerTimestamp {
                *value = FieldValue::Timestamp(now);
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, path: &str) -> Result<Option<Document>, StoreError> {
        Self::validate_path(path)?;
        Ok(self.docs.read().await.get(path).cloned())
    }

    async fn write(&self, path: &str, mut fields: Document, merge: bool) -> Result<(), StoreError> {
        Self::validate_path(path)?;
        Self::resolve_sentinels(&mut fields);
        trace!(path, merge, fields = %document::to_json(&fields), "document written");
        {
            let mut docs = self.docs.write().await;
            if merge {
                let entry = docs.entry(path.to_string()).or_default();
                entry.extend(fields);
            } else {
                docs.insert(path.to_string(), fields);
            }
        }
        self.notify(path);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        Self::validate_path(path)?;
        let removed = self.docs.write().await.remove(path).is_some();
        if removed {
            trace!(path, "document deleted");
            self.notify(path);
        }
        Ok(())
    }

    async fn create(&self, collection: &str, mut fields: Document) -> Result<String, StoreError> {
        Self::validate_path(collection)?;
        Self::resolve_sentinels(&mut fields);
        let id = Uuid::now_v7().to_string();
        let path = format!("{collection}/{id}");
        self.docs.write().await.insert(path.clone(), fields);
        trace!(path = %path, "document created");
        self.notify(&path);
        Ok(id)
    }

    async fn increment(&self, path: &str, field: &str, delta: i64) -> Result<(), StoreError> {
        Self::validate_path(path)?;
        let mut docs = self.docs.write().await;
        let doc = docs
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        let next = match doc.get(field) {
            Some(FieldValue::Int(n)) => n + delta,
            // the backend treats a missing field as zero
            None | Some(FieldValue::Null) => delta,
            Some(_) => {
                return Err(StoreError::NotANumber {
                    path: path.to_string(),
                    field: field.to_string(),
                });
            }
        };
        doc.insert(field.to_string(), FieldValue::Int(next));
        drop(docs);
        trace!(path, field, delta, "counter adjusted");
        self.notify(path);
        Ok(())
    }

    fn subscribe(&self, query: Query, on_snapshot: SnapshotCallback) -> CancelHandle {
        let docs = Arc::clone(&self.docs);
        let mut rx = self.changes.subscribe();
        let prefix = format!("{}/", query.collection);

        let task = tokio::spawn(async move {
            let mut last = evaluate(&docs, &query).await;
            on_snapshot(QuerySnapshot { docs: last.clone() });
            loop {
                match rx.recv().await {
                    Ok(path) => {
                        // Only direct members: one extra segment past the prefix.
                        let is_member = path
                            .strip_prefix(&prefix)
                            .is_some_and(|rest| !rest.contains('/'));
                        if !is_member {
                            continue;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        // Fall through and re-evaluate unconditionally.
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
                let next = evaluate(&docs, &query).await;
                if next != last {
                    last = next;
                    on_snapshot(QuerySnapshot { docs: last.clone() });
                }
            }
        });
        CancelHandle::new(task)
    }
}

/// Run a query against the current contents.
async fn evaluate(
    docs: &RwLock<BTreeMap<String, Document>>,
    query: &Query,
) -> Vec<SnapshotDoc> {
    let prefix = format!("{}/", query.collection);
    let docs = docs.read().await;
    let mut matched: Vec<SnapshotDoc> = docs
        .iter()
        .filter_map(|(path, fields)| {
            let id = path.strip_prefix(&prefix)?;
            if id.contains('/') {
                return None;
            }
            Some(SnapshotDoc {
                id: id.to_string(),
                fields: fields.clone(),
            })
        })
        .collect();

    if let Some(order) = &query.order_by {
        matched.sort_by(|a, b| {
            let ordering = compare_fields(a.fields.get(&order.field), b.fields.get(&order.field))
                .then_with(|| a.id.cmp(&b.id));
            match order.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
    }
    matched
}

/// Order fields of like type; missing fields sort first ascending.
fn compare_fields(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(FieldValue::Int(x)), Some(FieldValue::Int(y))) => x.cmp(y),
        (Some(FieldValue::Str(x)), Some(FieldValue::Str(y))) => x.cmp(y),
        (Some(FieldValue::Timestamp(x)), Some(FieldValue::Timestamp(y))) => x.cmp(y),
        (Some(FieldValue::Bool(x)), Some(FieldValue::Bool(y))) => x.cmp(y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
