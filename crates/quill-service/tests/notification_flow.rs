//! End-to-end notification delivery scenarios over the in-memory fakes.

use quill_core::{PageRequest, Post, PostId, User, UserId};
use quill_realtime::NotificationHub;
use quill_repository::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryNotificationRepository,
    InMemoryPostLikeRepository, InMemoryPostRepository, InMemoryUserRepository,
    NotificationRepository,
};
use quill_service::{
    CreateCommentRequest, NotificationService, NotificationServiceComponent, PostService,
    PostServiceComponent,
};
use std::sync::Arc;

struct Fixture {
    users: Arc<InMemoryUserRepository>,
    posts: Arc<InMemoryPostRepository>,
    notifications: Arc<InMemoryNotificationRepository>,
    hub: Arc<NotificationHub>,
    post_service: Arc<PostServiceComponent>,
    notification_service: Arc<NotificationServiceComponent>,
}

fn fixture() -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let posts = Arc::new(InMemoryPostRepository::new());
    let comments = Arc::new(InMemoryCommentRepository::new());
    let likes = Arc::new(InMemoryPostLikeRepository::new());
    let categories = Arc::new(InMemoryCategoryRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let hub = Arc::new(NotificationHub::new());

    let notification_service = Arc::new(NotificationServiceComponent::new(
        notifications.clone(),
        posts.clone(),
        users.clone(),
        hub.clone(),
    ));
    let post_service = Arc::new(PostServiceComponent::new(
        posts.clone(),
        comments,
        likes,
        categories,
        notification_service.clone(),
    ));

    Fixture {
        users,
        posts,
        notifications,
        hub,
        post_service,
        notification_service,
    }
}

fn seed_user(fixture: &Fixture, id: i64, name: &str) -> UserId {
    let mut user = User::new(
        format!("user{id}"),
        format!("user{id}@example.com"),
        name.to_string(),
        "hash".into(),
    );
    user.id = UserId::new(id);
    user.is_active = true;
    fixture.users.insert(user);
    UserId::new(id)
}

fn seed_post(fixture: &Fixture, id: i64, author: UserId) -> PostId {
    let mut post = Post::new(author, "Title".into(), "Content".into());
    post.id = PostId::new(id);
    fixture.posts.insert(post);
    PostId::new(id)
}

/// A connected recipient receives exactly one like payload in real time.
#[tokio::test]
async fn connected_author_receives_like_notification() {
    let fx = fixture();
    let author = seed_user(&fx, 7, "Alice");
    let liker = seed_user(&fx, 9, "Bob");
    let post = seed_post(&fx, 3, author);

    let (mut rx, _guard) = fx.hub.subscribe(author);

    let count = fx.post_service.like_post(post, liker).await.unwrap();
    assert_eq!(count, 1);

    let payload = rx.recv().await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["user_id"], 7);
    assert_eq!(value["type"], "like");
    assert_eq!(value["actor_id"], 9);
    assert_eq!(value["message"], "Bob liked your post");
    assert_eq!(value["actor"]["username"], "user9");

    // Exactly one event was delivered.
    assert!(rx.try_recv().is_err());
}

/// An offline recipient still gets a durable, unread notification.
#[tokio::test]
async fn offline_author_gets_durable_notification() {
    let fx = fixture();
    let author = seed_user(&fx, 7, "Alice");
    let liker = seed_user(&fx, 9, "Bob");
    let post = seed_post(&fx, 3, author);

    let count = fx.post_service.like_post(post, liker).await.unwrap();
    assert_eq!(count, 1);

    let stored = fx
        .notifications
        .find_by_user(author, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].is_read);
    assert_eq!(stored[0].actor_id, liker);

    let unread = fx.notification_service.unread_count(author).await.unwrap();
    assert_eq!(unread, 1);
}

/// Liking your own post produces no notification.
#[tokio::test]
async fn self_like_is_not_notified() {
    let fx = fixture();
    let author = seed_user(&fx, 7, "Alice");
    let post = seed_post(&fx, 3, author);

    let (mut rx, _guard) = fx.hub.subscribe(author);

    fx.post_service.like_post(post, author).await.unwrap();

    assert!(rx.try_recv().is_err());
    assert_eq!(
        fx.notification_service.unread_count(author).await.unwrap(),
        0
    );
}

/// A repeat like by the same user notifies only once.
#[tokio::test]
async fn repeat_like_notifies_once() {
    let fx = fixture();
    let author = seed_user(&fx, 7, "Alice");
    let liker = seed_user(&fx, 9, "Bob");
    let post = seed_post(&fx, 3, author);

    fx.post_service.like_post(post, liker).await.unwrap();
    let count = fx.post_service.like_post(post, liker).await.unwrap();
    assert_eq!(count, 1);

    assert_eq!(
        fx.notification_service.unread_count(author).await.unwrap(),
        1
    );
}

/// Commenting notifies the author with a comment-kind payload.
#[tokio::test]
async fn comment_notifies_author() {
    let fx = fixture();
    let author = seed_user(&fx, 7, "Alice");
    let commenter = seed_user(&fx, 9, "Bob");
    let post = seed_post(&fx, 3, author);

    let (mut rx, _guard) = fx.hub.subscribe(author);

    fx.post_service
        .add_comment(
            post,
            commenter,
            CreateCommentRequest {
                content: "Nice post".into(),
            },
        )
        .await
        .unwrap();

    let payload = rx.recv().await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["type"], "comment");
    assert_eq!(value["message"], "Bob commented on your post");
}

/// Read-state transitions: single mark, unknown id, bulk mark.
#[tokio::test]
async fn read_state_transitions() {
    let fx = fixture();
    let author = seed_user(&fx, 7, "Alice");
    let liker = seed_user(&fx, 9, "Bob");
    let commenter = seed_user(&fx, 11, "Carol");
    let post = seed_post(&fx, 3, author);

    fx.post_service.like_post(post, liker).await.unwrap();
    fx.post_service
        .add_comment(
            post,
            commenter,
            CreateCommentRequest {
                content: "Hello".into(),
            },
        )
        .await
        .unwrap();

    let listed = fx
        .notification_service
        .list_for_user(author, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(listed.count, 2);

    let first_id = listed.notifications[0].id;
    fx.notification_service
        .mark_read(first_id, author)
        .await
        .unwrap();
    assert_eq!(
        fx.notification_service.unread_count(author).await.unwrap(),
        1
    );

    // Someone else's notification id is a not-found, not a cross-user write.
    assert!(fx
        .notification_service
        .mark_read(first_id, liker)
        .await
        .is_err());

    let flipped = fx.notification_service.mark_all_read(author).await.unwrap();
    assert_eq!(flipped, 1);
    assert_eq!(
        fx.notification_service.unread_count(author).await.unwrap(),
        0
    );
}
