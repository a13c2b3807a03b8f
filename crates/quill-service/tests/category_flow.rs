//! Category management and public feed scenarios over the in-memory fakes.

use quill_core::{CategoryId, FeedQuery, PageRequest, Post, PostId, QuillError, UserId};
use quill_realtime::NotificationHub;
use quill_repository::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryNotificationRepository,
    InMemoryPostLikeRepository, InMemoryPostRepository, InMemoryUserRepository,
};
use quill_service::{
    CategoryRequest, CategoryService, CategoryServiceComponent, CreatePostRequest,
    NotificationServiceComponent, PostService, PostServiceComponent,
};
use std::sync::Arc;

struct Fixture {
    posts: Arc<InMemoryPostRepository>,
    category_service: Arc<CategoryServiceComponent>,
    post_service: Arc<PostServiceComponent>,
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
        notifications,
        posts.clone(),
        users,
        hub,
    ));
    let category_service = Arc::new(CategoryServiceComponent::new(categories.clone()));
    let post_service = Arc::new(PostServiceComponent::new(
        posts.clone(),
        comments,
        likes,
        categories,
        notification_service,
    ));

    Fixture {
        posts,
        category_service,
        post_service,
    }
}

fn seed_post(fx: &Fixture, id: i64, title: &str, content: &str, category: Option<CategoryId>) {
    let mut post = Post::new(UserId::new(1), title.into(), content.into());
    post.id = PostId::new(id);
    post.category_id = category;
    fx.posts.insert(post);
}

fn request(name: &str) -> CategoryRequest {
    CategoryRequest { name: name.into() }
}

#[tokio::test]
async fn categories_list_alphabetically() {
    let fx = fixture();

    fx.category_service
        .create_category(request("Travel"))
        .await
        .unwrap();
    fx.category_service
        .create_category(request("Cooking"))
        .await
        .unwrap();

    let listed = fx.category_service.list_categories().await.unwrap();
    let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Cooking", "Travel"]);
}

#[tokio::test]
async fn duplicate_category_name_conflicts() {
    let fx = fixture();

    fx.category_service
        .create_category(request("Travel"))
        .await
        .unwrap();
    let err = fx
        .category_service
        .create_category(request("Travel"))
        .await
        .unwrap_err();
    assert!(matches!(err, QuillError::Conflict(_)));
}

#[tokio::test]
async fn empty_category_name_is_rejected() {
    let fx = fixture();

    let err = fx
        .category_service
        .create_category(request(""))
        .await
        .unwrap_err();
    assert!(matches!(err, QuillError::Validation(_)));
}

#[tokio::test]
async fn rename_and_delete_round_trip() {
    let fx = fixture();

    let created = fx
        .category_service
        .create_category(request("Travle"))
        .await
        .unwrap();

    let renamed = fx
        .category_service
        .update_category(created.id, request("Travel"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Travel");

    fx.category_service.delete_category(created.id).await.unwrap();
    assert!(fx.category_service.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn mutating_a_missing_category_is_not_found() {
    let fx = fixture();

    let missing = CategoryId::new(404);
    assert!(matches!(
        fx.category_service
            .update_category(missing, request("Travel"))
            .await
            .unwrap_err(),
        QuillError::NotFound { .. }
    ));
    assert!(matches!(
        fx.category_service.delete_category(missing).await.unwrap_err(),
        QuillError::NotFound { .. }
    ));
}

#[tokio::test]
async fn post_in_unknown_category_is_rejected() {
    let fx = fixture();

    let err = fx
        .post_service
        .create_post(
            UserId::new(1),
            CreatePostRequest {
                title: "Hello".into(),
                content: "World".into(),
                category_id: Some(CategoryId::new(404)),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, QuillError::NotFound { .. }));
}

#[tokio::test]
async fn feed_lists_newest_first() {
    let fx = fixture();
    seed_post(&fx, 1, "First", "one", None);
    seed_post(&fx, 2, "Second", "two", None);
    seed_post(&fx, 3, "Third", "three", None);

    let feed = fx.post_service.feed(FeedQuery::default()).await.unwrap();
    assert_eq!(feed.count, 3);
    let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Third", "Second", "First"]);
}

#[tokio::test]
async fn feed_search_matches_title_and_content() {
    let fx = fixture();
    seed_post(&fx, 1, "Sourdough basics", "flour and water", None);
    seed_post(&fx, 2, "Trip report", "we baked sourdough on the road", None);
    seed_post(&fx, 3, "Unrelated", "nothing here", None);

    let feed = fx
        .post_service
        .feed(FeedQuery {
            search: Some("SOURDOUGH".into()),
            ..FeedQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(feed.count, 2);
}

#[tokio::test]
async fn feed_filters_by_category() {
    let fx = fixture();
    let cooking = fx
        .category_service
        .create_category(request("Cooking"))
        .await
        .unwrap();
    seed_post(&fx, 1, "Stew", "beef", Some(cooking.id));
    seed_post(&fx, 2, "Hiking", "boots", None);

    let feed = fx
        .post_service
        .feed(FeedQuery {
            category_id: Some(cooking.id),
            ..FeedQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(feed.count, 1);
    assert_eq!(feed.items[0].title, "Stew");
    assert_eq!(feed.items[0].category_id, Some(cooking.id));
}

#[tokio::test]
async fn feed_respects_pagination_window() {
    let fx = fixture();
    for id in 1..=5 {
        seed_post(&fx, id, &format!("Post {id}"), "body", None);
    }

    let feed = fx
        .post_service
        .feed(FeedQuery {
            page: PageRequest::new(2, 1),
            ..FeedQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(feed.count, 2);
    let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Post 4", "Post 3"]);
}
