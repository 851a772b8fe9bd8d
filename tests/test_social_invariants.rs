//! Counter/flag consistency properties of the like and comment logic.

use community_board::application::social::SocialUseCase;
use community_board::application::social::dto::AddCommentRequest;
use community_board::domain::post::Post;
use community_board::domain::social::Like;
use community_board::domain::store::{Document, DocumentStore, FieldValue};
use community_board::domain::user::AuthUser;
use community_board::infrastructure::store::MemoryStore;
use std::sync::Arc;

fn user(id: &str) -> AuthUser {
    AuthUser {
        id: id.to_string(),
        display_name: Some(id.to_string()),
        photo_url: None,
    }
}

async fn seed_post(store: &MemoryStore, post_id: &str, like_count: i64) {
    let mut fields = Document::new();
    fields.insert(Post::FIELD_TITLE.to_string(), "t".into());
    fields.insert(Post::FIELD_LIKE_COUNT.to_string(), like_count.into());
    fields.insert(Post::FIELD_COMMENT_COUNT.to_string(), 0i64.into());
    store
        .write(&Post::doc_path(post_id), fields, false)
        .await
        .unwrap();
}

async fn like_count(store: &MemoryStore, post_id: &str) -> i64 {
    store
        .read(&Post::doc_path(post_id))
        .await
        .unwrap()
        .unwrap()
        .get(Post::FIELD_LIKE_COUNT)
        .and_then(FieldValue::as_int)
        .unwrap()
}

/// Counts the extant like records under a post, the ground truth the
/// denormalized counter must agree with.
async fn true_like_count(store: &MemoryStore, post_id: &str, users: &[&str]) -> i64 {
    let mut count = 0;
    for uid in users {
        if store
            .read(&Like::new(post_id, *uid).doc_path())
            .await
            .unwrap()
            .is_some()
        {
            count += 1;
        }
    }
    count
}

#[tokio::test]
async fn toggle_from_nonzero_base_moves_by_exactly_one() {
    let store = Arc::new(MemoryStore::new());
    seed_post(&store, "p1", 41).await;
    let social = SocialUseCase::new(store.clone());

    let u = user("u1");
    let first = social.toggle_like("p1", Some(&u)).await.unwrap();
    assert!(first.liked);
    assert_eq!(first.like_count, 42);

    let second = social.toggle_like("p1", Some(&u)).await.unwrap();
    assert!(!second.liked);
    assert_eq!(second.like_count, 41);
    assert_eq!(like_count(&store, "p1").await, 41);
}

#[tokio::test]
async fn counter_matches_true_record_count_after_many_toggles() {
    let store = Arc::new(MemoryStore::new());
    seed_post(&store, "p1", 0).await;
    let social = SocialUseCase::new(store.clone());

    let users = ["u1", "u2", "u3"];
    // u1 likes, u2 likes twice (net zero), u3 likes then unlikes then likes
    social.toggle_like("p1", Some(&user("u1"))).await.unwrap();
    social.toggle_like("p1", Some(&user("u2"))).await.unwrap();
    social.toggle_like("p1", Some(&user("u2"))).await.unwrap();
    social.toggle_like("p1", Some(&user("u3"))).await.unwrap();
    social.toggle_like("p1", Some(&user("u3"))).await.unwrap();
    social.toggle_like("p1", Some(&user("u3"))).await.unwrap();

    let counter = like_count(&store, "p1").await;
    let truth = true_like_count(&store, "p1", &users).await;
    assert_eq!(counter, truth);
    assert_eq!(counter, 2);
}

#[tokio::test]
async fn concurrent_togglers_each_contribute_their_own_delta() {
    let store = Arc::new(MemoryStore::new());
    seed_post(&store, "p1", 0).await;
    let social = Arc::new(SocialUseCase::new(store.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let social = Arc::clone(&social);
        handles.push(tokio::spawn(async move {
            let u = user(&format!("u{i}"));
            social.toggle_like("p1", Some(&u)).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // each user toggled once from not-liked, so every delta is +1
    assert_eq!(like_count(&store, "p1").await, 8);
    let users: Vec<String> = (0..8).map(|i| format!("u{i}")).collect();
    let user_refs: Vec<&str> = users.iter().map(String::as_str).collect();
    assert_eq!(true_like_count(&store, "p1", &user_refs).await, 8);
}

#[tokio::test]
async fn concurrent_toggle_and_untoggle_settle_to_net_effect() {
    let store = Arc::new(MemoryStore::new());
    seed_post(&store, "p1", 0).await;
    let social = Arc::new(SocialUseCase::new(store.clone()));

    // u1 starts liked; concurrently u1 unlikes and u2 likes
    social.toggle_like("p1", Some(&user("u1"))).await.unwrap();

    let s1 = Arc::clone(&social);
    let s2 = Arc::clone(&social);
    let a = tokio::spawn(async move { s1.toggle_like("p1", Some(&user("u1"))).await.unwrap() });
    let b = tokio::spawn(async move { s2.toggle_like("p1", Some(&user("u2"))).await.unwrap() });
    a.await.unwrap();
    b.await.unwrap();

    assert_eq!(like_count(&store, "p1").await, 1);
    assert_eq!(true_like_count(&store, "p1", &["u1", "u2"]).await, 1);
}

#[tokio::test]
async fn unliking_removes_the_record_not_just_a_flag() {
    let store = Arc::new(MemoryStore::new());
    seed_post(&store, "p1", 0).await;
    let social = SocialUseCase::new(store.clone());

    let u = user("u1");
    social.toggle_like("p1", Some(&u)).await.unwrap();
    social.toggle_like("p1", Some(&u)).await.unwrap();

    assert!(
        store
            .read(&Like::new("p1", "u1").doc_path())
            .await
            .unwrap()
            .is_none(),
        "unlike must delete the underlying record"
    );
}

#[tokio::test]
async fn comment_counter_is_not_bumped_for_rejected_bodies() {
    let store = Arc::new(MemoryStore::new());
    seed_post(&store, "p1", 0).await;
    let social = SocialUseCase::new(store.clone());

    let u = user("u1");
    for body in ["", "   ", "\n\t"] {
        let outcome = social
            .add_comment(
                AddCommentRequest {
                    post_id: "p1".to_string(),
                    content: body.to_string(),
                },
                Some(&u),
            )
            .await
            .unwrap();
        assert!(outcome.is_none());
    }

    let post = store.read(&Post::doc_path("p1")).await.unwrap().unwrap();
    assert_eq!(
        post.get(Post::FIELD_COMMENT_COUNT)
            .and_then(FieldValue::as_int),
        Some(0)
    );
}
