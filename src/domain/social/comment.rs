use crate::domain::post::Post;
use crate::domain::store::{Document, FieldValue, join_path};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// A comment under a post. Append-only; never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Comment {
    /// Store-assigned opaque identifier
    pub id: String,

    /// Post this comment belongs to
    pub post_id: String,

    /// Author display name captured at write time
    pub author_name: String,

    /// Comment text, trimmed
    pub content: String,

    /// Server-assigned creation time; `None` while the sentinel is unresolved
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub const FIELD_CONTENT: &'static str = "content";
    pub const FIELD_AUTHOR_NAME: &'static str = "authorName";
    pub const FIELD_CREATED_AT: &'static str = "createdAt";

    /// Collection of comments under a post, `posts/{id}/comments`.
    pub fn collection_path(post_id: &str) -> String {
        join_path(&[Post::COLLECTION, post_id, "comments"])
    }

    pub fn from_fields(
        id: impl Into<String>,
        post_id: impl Into<String>,
        fields: &Document,
    ) -> Self {
        Self {
            id: id.into(),
            post_id: post_id.into(),
            author_name: fields
                .get(Self::FIELD_AUTHOR_NAME)
                .and_then(FieldValue::as_str)
                .unwrap_or_default()
                .to_string(),
            content: fields
                .get(Self::FIELD_CONTENT)
                .and_then(FieldValue::as_str)
                .unwrap_or_default()
                .to_string(),
            created_at: fields
                .get(Self::FIELD_CREATED_AT)
                .and_then(FieldValue::as_timestamp),
        }
    }
}

/// Comment text as submitted: must be non-empty after trimming whitespace.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentBody {
    #[validate(length(min = 1, max = 2_000))]
    pub value: String,
}

impl CommentBody {
    /// Trim and validate; `None` means the submission is a silent no-op.
    pub fn new(raw: &str) -> Option<Self> {
        let body = Self {
            value: raw.trim().to_string(),
        };
        body.validate().ok().map(|_| body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_body_is_rejected() {
        assert!(CommentBody::new("").is_none());
        assert!(CommentBody::new(" \t\n ").is_none());
    }

    #[test]
    fn body_is_trimmed() {
        assert_eq!(CommentBody::new("  hi there  ").unwrap().value, "hi there");
    }

    #[test]
    fn collection_path_nests_under_post() {
        assert_eq!(Comment::collection_path("p1"), "posts/p1/comments");
    }
}
