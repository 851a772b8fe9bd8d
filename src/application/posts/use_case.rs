use super::dto::CreatePostRequest;
use crate::domain::post::value_objects::{PostBody, PostTitle};
use crate::domain::post::{DomainError, Post};
use crate::domain::store::{CancelHandle, DocumentStore, Document, FieldValue, Query};
use crate::domain::user::AuthUser;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// Avatar used when the author never set one, kept from the original client.
const DEFAULT_AVATAR_URL: &str = "https://cdn-icons-png.flaticon.com/512/149/149071.png";

/// Post authoring and feed/detail reads.
pub struct PostUseCase {
    store: Arc<dyn DocumentStore>,
}

impl PostUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a post with zeroed counters and a server-assigned timestamp,
    /// returning the new post id.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` without an identity, `Validation` for an empty
    /// title or body or a malformed image URL.
    pub async fn create_post(
        &self,
        request: CreatePostRequest,
        user: Option<&AuthUser>,
    ) -> Result<String, DomainError> {
        let user = user.ok_or(DomainError::Unauthenticated)?;
        request.validate()?;
        let title = PostTitle::new(&request.title)?;
        let body = PostBody::new(&request.content)?;

        let mut fields = Document::new();
        fields.insert(Post::FIELD_TITLE.to_string(), FieldValue::Str(title.value));
        fields.insert(Post::FIELD_CONTENT.to_string(), FieldValue::Str(body.value));
        if let Some(url) = request.image_url {
            fields.insert(Post::FIELD_IMAGE_URL.to_string(), FieldValue::Str(url));
        }
        fields.insert(
            Post::FIELD_AUTHOR_ID.to_string(),
            FieldValue::Str(user.id.clone()),
        );
        fields.insert(
            Post::FIELD_AUTHOR_NAME.to_string(),
            FieldValue::Str(user.display_name_or_anonymous().to_string()),
        );
        fields.insert(
            Post::FIELD_AUTHOR_AVATAR_URL.to_string(),
            FieldValue::Str(
                user.photo_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
            ),
        );
        fields.insert(
            Post::FIELD_CREATED_AT.to_string(),
            self.store.server_timestamp(),
        );
        fields.insert(Post::FIELD_LIKE_COUNT.to_string(), FieldValue::Int(0));
        fields.insert(Post::FIELD_COMMENT_COUNT.to_string(), FieldValue::Int(0));

        let post_id = self.store.create(Post::COLLECTION, fields).await?;
        debug!(post_id = %post_id, author_id = %user.id, "post created");
        Ok(post_id)
    }

    /// One-shot detail read.
    pub async fn get_post(&self, post_id: &str) -> Result<Post, DomainError> {
        let path = Post::doc_path(post_id);
        let fields = self
            .store
            .read(&path)
            .await?
            .ok_or(DomainError::NotFound(path))?;
        Ok(Post::from_fields(post_id, &fields))
    }

    /// Standing subscription to the feed: all posts, newest first.
    pub fn subscribe_feed(
        &self,
        on_change: impl Fn(Vec<Post>) + Send + Sync + 'static,
    ) -> CancelHandle {
        let query = Query::collection(Post::COLLECTION).order_desc(Post::FIELD_CREATED_AT);
        self.store.subscribe(
            query,
            Arc::new(move |snapshot| {
                let posts = snapshot
                    .docs
                    .iter()
                    .map(|doc| Post::from_fields(doc.id.as_str(), &doc.fields))
                    .collect();
                on_change(posts);
            }),
        )
    }
}
