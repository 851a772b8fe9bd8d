use crate::domain::store::{Document, FieldValue, join_path};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A user-authored post with denormalized like/comment counters.
///
/// The counters are stored aggregates kept in sync with the underlying like
/// and comment records by the social use case; they exist so the feed and
/// detail screens can render counts without counting subcollections.
///
/// # Invariants
/// - `like_count` equals the number of extant like records, eventually
/// - `comment_count` is best-effort incremented once per durable comment
/// - Posts are never deleted
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Post {
    /// Store-assigned opaque identifier
    pub id: String,

    /// Post title
    pub title: String,

    /// Body text
    pub content: String,

    /// Reference to an attached image, if any
    pub image_url: Option<String>,

    /// Identity-service id of the author
    pub author_id: String,

    /// Author display name captured at write time
    pub author_name: String,

    /// Author avatar captured at write time
    pub author_avatar_url: Option<String>,

    /// Server-assigned creation time; `None` while the sentinel is unresolved
    pub created_at: Option<DateTime<Utc>>,

    /// Denormalized count of like records
    pub like_count: i64,

    /// Denormalized count of comments
    pub comment_count: i64,
}

impl Post {
    pub const COLLECTION: &'static str = "posts";
    pub const FIELD_TITLE: &'static str = "title";
    pub const FIELD_CONTENT: &'static str = "content";
    pub const FIELD_IMAGE_URL: &'static str = "imageUrl";
    pub const FIELD_AUTHOR_ID: &'static str = "authorId";
    pub const FIELD_AUTHOR_NAME: &'static str = "authorName";
    pub const FIELD_AUTHOR_AVATAR_URL: &'static str = "authorAvatarUrl";
    pub const FIELD_CREATED_AT: &'static str = "createdAt";
    pub const FIELD_LIKE_COUNT: &'static str = "likeCount";
    pub const FIELD_COMMENT_COUNT: &'static str = "commentCount";

    /// Document path of a post, `posts/{id}`.
    pub fn doc_path(post_id: &str) -> String {
        join_path(&[Self::COLLECTION, post_id])
    }

    /// Rebuild a post from stored fields. Missing counters read as zero and
    /// an unresolved timestamp reads as `None`, matching how the screens
    /// tolerate half-written documents.
    pub fn from_fields(id: impl Into<String>, fields: &Document) -> Self {
        Self {
            id: id.into(),
            title: get_str(fields, Self::FIELD_TITLE),
            content: get_str(fields, Self::FIELD_CONTENT),
            image_url: get_opt_str(fields, Self::FIELD_IMAGE_URL),
            author_id: get_str(fields, Self::FIELD_AUTHOR_ID),
            author_name: get_str(fields, Self::FIELD_AUTHOR_NAME),
            author_avatar_url: get_opt_str(fields, Self::FIELD_AUTHOR_AVATAR_URL),
            created_at: fields
                .get(Self::FIELD_CREATED_AT)
                .and_then(FieldValue::as_timestamp),
            like_count: fields
                .get(Self::FIELD_LIKE_COUNT)
                .and_then(FieldValue::as_int)
                .unwrap_or(0),
            comment_count: fields
                .get(Self::FIELD_COMMENT_COUNT)
                .and_then(FieldValue::as_int)
                .unwrap_or(0),
        }
    }
}

fn get_str(fields: &Document, key: &str) -> String {
    fields
        .get(key)
        .and_then(FieldValue::as_str)
        .unwrap_or_default()
        .to_string()
}

fn get_opt_str(fields: &Document, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(FieldValue::as_str)
        .map(str::to_string)
}
