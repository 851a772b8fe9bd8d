use crate::domain::post::Post;
use crate::domain::store::{Document, join_path};
use serde::{Deserialize, Serialize};

/// A per-(post, user) like record.
///
/// Existence of the record is what means "this user currently likes this
/// post"; the stored `liked` flag is redundant with existence and nothing
/// reads it. Created and destroyed exclusively by the toggle operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub post_id: String,
    pub user_id: String,
}

impl Like {
    pub const FIELD_LIKED: &'static str = "liked";

    pub fn new(post_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Document path of this record, `posts/{post}/likes/{user}`.
    pub fn doc_path(&self) -> String {
        join_path(&[Post::COLLECTION, &self.post_id, "likes", &self.user_id])
    }

    /// Fields written when the record is created.
    pub fn fields(&self) -> Document {
        let mut fields = Document::new();
        fields.insert(Self::FIELD_LIKED.to_string(), true.into());
        fields
    }
}
