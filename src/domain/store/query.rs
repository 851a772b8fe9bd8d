//! Standing query descriptions and their snapshot results.

use super::document::Document;
use serde::{Deserialize, Serialize};

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering clause applied by the store before a snapshot is delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// A query over one collection, optionally ordered.
///
/// Matches every document directly inside the collection; subcollections are
/// separate collections and never match their parent's queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub collection: String,
    pub order_by: Option<OrderBy>,
}

impl Query {
    pub fn collection(path: impl Into<String>) -> Self {
        Self {
            collection: path.into(),
            order_by: None,
        }
    }

    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction: Direction::Descending,
        });
        self
    }

}

/// One document inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDoc {
    pub id: String,
    pub fields: Document,
}

/// The full result set of a standing query at one point in time.
///
/// Subscribers receive an initial snapshot and then a fresh one whenever the
/// matching data changes, until the subscription is cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySnapshot {
    pub docs: Vec<SnapshotDoc>,
}
