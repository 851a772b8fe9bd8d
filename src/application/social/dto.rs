use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Result of one like toggle, derived optimistically from the branch taken
/// rather than from a re-read, so the tapping screen can update immediately.
/// A live post subscription reconciles the displayed count later if needed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LikeToggle {
    /// Whether the user likes the post after the toggle
    pub liked: bool,

    /// The post's like count as the client should now display it
    pub like_count: i64,
}

/// A submitted comment as the detail screen sends it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddCommentRequest {
    pub post_id: String,
    pub content: String,
}
