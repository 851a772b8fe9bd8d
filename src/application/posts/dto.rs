use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// A new post as the write screen submits it.
///
/// Title and body must be non-empty after trimming; the image is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(min = 1, max = 10_000))]
    pub content: String,

    #[validate(url)]
    pub image_url: Option<String>,
}
