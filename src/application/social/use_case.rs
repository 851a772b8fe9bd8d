use super::dto::{AddCommentRequest, LikeToggle};
use crate::domain::post::{DomainError, Post};
use crate::domain::social::comment::{Comment, CommentBody};
use crate::domain::social::like::Like;
use crate::domain::store::{CancelHandle, Document, DocumentStore, FieldValue, Query};
use crate::domain::user::AuthUser;
use std::sync::Arc;
use tracing::warn;

/// Owns the rule for toggling a per-user like and keeping each post's
/// denormalized counters consistent with the underlying records.
///
/// Counter adjustments always go through the store's atomic relative
/// increment, so concurrent togglers on the same post cannot lose each
/// other's delta. The vulnerable part is the existence-check-then-write on
/// the like record itself; without a transactional primitive in the store
/// that narrow race stays open as a documented limitation, and it can only
/// desynchronize a user's liked flag, never the counter.
pub struct SocialUseCase {
    store: Arc<dyn DocumentStore>,
}

impl SocialUseCase {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Flip the (post, user) like relationship and adjust the post's
    /// `likeCount` by exactly one.
    ///
    /// The branch is decided by re-reading the like record, never by a
    /// cached liked flag, so a stale double-tap cannot double-delete or
    /// double-create. The record is written first and the counter second;
    /// a crash in between leaves an under-count, which a recount can repair,
    /// rather than an over-count.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when `user` is `None`, `NotFound` when the post
    /// does not exist, `Backend` when a store call fails.
    pub async fn toggle_like(
        &self,
        post_id: &str,
        user: Option<&AuthUser>,
    ) -> Result<LikeToggle, DomainError> {
        let user = user.ok_or(DomainError::Unauthenticated)?;

        let post_path = Post::doc_path(post_id);
        let post = self
            .store
            .read(&post_path)
            .await?
            .ok_or_else(|| DomainError::NotFound(post_path.clone()))?;
        let count = post
            .get(Post::FIELD_LIKE_COUNT)
            .and_then(FieldValue::as_int)
            .unwrap_or(0);

        let like = Like::new(post_id, user.id.as_str());
        let like_path = like.doc_path();
        let liked_now = self.store.read(&like_path).await?.is_some();

        if liked_now {
            self.store.delete(&like_path).await?;
            if let Err(err) = self
                .store
                .increment(&post_path, Post::FIELD_LIKE_COUNT, -1)
                .await
            {
                warn!(post_id, user_id = %user.id, error = %err,
                    "like record deleted but counter decrement failed; likeCount reads high until recounted");
                return Err(err.into());
            }
            Ok(LikeToggle {
                liked: false,
                like_count: (count - 1).max(0),
            })
        } else {
            self.store.write(&like_path, like.fields(), false).await?;
            if let Err(err) = self
                .store
                .increment(&post_path, Post::FIELD_LIKE_COUNT, 1)
                .await
            {
                warn!(post_id, user_id = %user.id, error = %err,
                    "like record created but counter increment failed; likeCount reads low until recounted");
                return Err(err.into());
            }
            Ok(LikeToggle {
                liked: true,
                like_count: count + 1,
            })
        }
    }

    /// Whether `user` currently likes the post, from the record itself.
    pub async fn has_liked(&self, post_id: &str, user: &AuthUser) -> Result<bool, DomainError> {
        let like_path = Like::new(post_id, user.id.as_str()).doc_path();
        Ok(self.store.read(&like_path).await?.is_some())
    }

    /// Durably append a comment and bump the post's `commentCount`.
    ///
    /// A body that is empty after trimming, or a missing identity, is a
    /// silent no-op returning `Ok(None)`. The comment record is written
    /// first; if the counter increment then fails the count stays one low,
    /// which is logged and surfaced but not retried.
    pub async fn add_comment(
        &self,
        request: AddCommentRequest,
        user: Option<&AuthUser>,
    ) -> Result<Option<Comment>, DomainError> {
        let Some(user) = user else {
            return Ok(None);
        };
        let Some(body) = CommentBody::new(&request.content) else {
            return Ok(None);
        };

        let post_path = Post::doc_path(&request.post_id);
        if self.store.read(&post_path).await?.is_none() {
            return Err(DomainError::NotFound(post_path));
        }

        let author_name = user.display_name_or_anonymous().to_string();
        let mut fields = Document::new();
        fields.insert(
            Comment::FIELD_CONTENT.to_string(),
            FieldValue::Str(body.value.clone()),
        );
        fields.insert(
            Comment::FIELD_AUTHOR_NAME.to_string(),
            FieldValue::Str(author_name.clone()),
        );
        fields.insert(
            Comment::FIELD_CREATED_AT.to_string(),
            self.store.server_timestamp(),
        );

        let comment_id = self
            .store
            .create(&Comment::collection_path(&request.post_id), fields)
            .await?;

        if let Err(err) = self
            .store
            .increment(&post_path, Post::FIELD_COMMENT_COUNT, 1)
            .await
        {
            warn!(post_id = %request.post_id, comment_id = %comment_id, error = %err,
                "comment created but counter increment failed; commentCount reads one low");
            return Err(err.into());
        }

        Ok(Some(Comment {
            id: comment_id,
            post_id: request.post_id,
            author_name,
            content: body.value,
            // resolved server-side; the live comment list carries the real one
            created_at: None,
        }))
    }

    /// Standing subscription to a post's comments, newest first.
    ///
    /// Sorting happens here at the client because storage ordering has no
    /// stable tie-break; equal timestamps fall back to id order.
    pub fn subscribe_comments(
        &self,
        post_id: &str,
        on_change: impl Fn(Vec<Comment>) + Send + Sync + 'static,
    ) -> CancelHandle {
        let post_id = post_id.to_string();
        let query = Query::collection(Comment::collection_path(&post_id));
        self.store.subscribe(
            query,
            Arc::new(move |snapshot| {
                let mut comments: Vec<Comment> = snapshot
                    .docs
                    .iter()
                    .map(|doc| Comment::from_fields(doc.id.as_str(), post_id.as_str(), &doc.fields))
                    .collect();
                comments.sort_by(|a, b| {
                    b.created_at
                        .cmp(&a.created_at)
                        .then_with(|| b.id.cmp(&a.id))
                });
                on_change(comments);
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::StoreError;
    use crate::domain::store::gateway::MockDocumentStore;
    use crate::infrastructure::store::MemoryStore;

    fn user(id: &str) -> AuthUser {
        AuthUser {
            id: id.to_string(),
            display_name: Some(format!("{id}-name")),
            photo_url: None,
        }
    }

    async fn seed_post(store: &MemoryStore, post_id: &str) {
        let mut fields = Document::new();
        fields.insert(Post::FIELD_TITLE.to_string(), "t".into());
        fields.insert(Post::FIELD_CONTENT.to_string(), "c".into());
        fields.insert(Post::FIELD_LIKE_COUNT.to_string(), 0i64.into());
        fields.insert(Post::FIELD_COMMENT_COUNT.to_string(), 0i64.into());
        store
            .write(&Post::doc_path(post_id), fields, false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn single_toggle_likes_and_counts_up() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "p1").await;
        let social = SocialUseCase::new(store.clone());

        let u = user("u1");
        let result = social.toggle_like("p1", Some(&u)).await.unwrap();
        assert!(result.liked);
        assert_eq!(result.like_count, 1);
        assert!(social.has_liked("p1", &u).await.unwrap());

        let stored = store.read(&Post::doc_path("p1")).await.unwrap().unwrap();
        assert_eq!(
            stored.get(Post::FIELD_LIKE_COUNT).and_then(FieldValue::as_int),
            Some(1)
        );
    }

    #[tokio::test]
    async fn double_toggle_restores_original_state() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "p1").await;
        let social = SocialUseCase::new(store.clone());

        let u = user("u1");
        social.toggle_like("p1", Some(&u)).await.unwrap();
        let second = social.toggle_like("p1", Some(&u)).await.unwrap();
        assert!(!second.liked);
        assert_eq!(second.like_count, 0);
        assert!(!social.has_liked("p1", &u).await.unwrap());

        let stored = store.read(&Post::doc_path("p1")).await.unwrap().unwrap();
        assert_eq!(
            stored.get(Post::FIELD_LIKE_COUNT).and_then(FieldValue::as_int),
            Some(0)
        );
        // the like record itself is gone, not just flagged off
        assert!(
            store
                .read(&Like::new("p1", "u1").doc_path())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn counter_never_driven_below_zero_by_toggles() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "p1").await;
        let social = SocialUseCase::new(store.clone());

        let u = user("u1");
        for _ in 0..5 {
            social.toggle_like("p1", Some(&u)).await.unwrap();
        }
        let stored = store.read(&Post::doc_path("p1")).await.unwrap().unwrap();
        let count = stored
            .get(Post::FIELD_LIKE_COUNT)
            .and_then(FieldValue::as_int)
            .unwrap();
        assert!(count >= 0);
        assert_eq!(count, 1); // odd number of toggles ends liked
    }

    #[tokio::test]
    async fn toggle_without_identity_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "p1").await;
        let social = SocialUseCase::new(store);

        let err = social.toggle_like("p1", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
    }

    #[tokio::test]
    async fn toggle_on_missing_post_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let social = SocialUseCase::new(store);

        let u = user("u1");
        let err = social.toggle_like("nope", Some(&u)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_comment_is_a_silent_noop() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "p1").await;
        let social = SocialUseCase::new(store.clone());

        let u = user("u1");
        let request = AddCommentRequest {
            post_id: "p1".to_string(),
            content: "   \n ".to_string(),
        };
        let outcome = social.add_comment(request, Some(&u)).await.unwrap();
        assert!(outcome.is_none());

        let stored = store.read(&Post::doc_path("p1")).await.unwrap().unwrap();
        assert_eq!(
            stored
                .get(Post::FIELD_COMMENT_COUNT)
                .and_then(FieldValue::as_int),
            Some(0)
        );
    }

    #[tokio::test]
    async fn unauthenticated_comment_is_a_silent_noop() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "p1").await;
        let social = SocialUseCase::new(store);

        let request = AddCommentRequest {
            post_id: "p1".to_string(),
            content: "hello".to_string(),
        };
        assert!(social.add_comment(request, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn comment_append_bumps_counter_once() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "p1").await;
        let social = SocialUseCase::new(store.clone());

        let u = user("u1");
        let request = AddCommentRequest {
            post_id: "p1".to_string(),
            content: "  first!  ".to_string(),
        };
        let comment = social.add_comment(request, Some(&u)).await.unwrap().unwrap();
        assert_eq!(comment.content, "first!");
        assert_eq!(comment.author_name, "u1-name");

        let stored = store.read(&Post::doc_path("p1")).await.unwrap().unwrap();
        assert_eq!(
            stored
                .get(Post::FIELD_COMMENT_COUNT)
                .and_then(FieldValue::as_int),
            Some(1)
        );
    }

    #[tokio::test]
    async fn failed_increment_after_like_write_surfaces_backend_error() {
        let mut mock = MockDocumentStore::new();
        let mut post = Document::new();
        post.insert(Post::FIELD_LIKE_COUNT.to_string(), 3i64.into());

        mock.expect_read()
            .withf(|path| path == "posts/p1")
            .returning(move |_| Ok(Some(post.clone())));
        mock.expect_read()
            .withf(|path| path == "posts/p1/likes/u1")
            .returning(|_| Ok(None));
        mock.expect_write().returning(|_, _, _| Ok(()));
        mock.expect_increment()
            .returning(|_, _, _| Err(StoreError::Backend("write quota".to_string())));

        let social = SocialUseCase::new(Arc::new(mock));
        let u = user("u1");
        let err = social.toggle_like("p1", Some(&u)).await.unwrap_err();
        assert!(matches!(err, DomainError::Backend(_)));
    }
}
