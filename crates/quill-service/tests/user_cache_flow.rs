//! End-to-end user cache scenarios over the in-memory fakes.

use quill_core::{QuillError, User, UserId};
use quill_repository::InMemoryUserRepository;
use quill_service::{
    MemoryCacheService, UpdateProfileRequest, UserService, UserServiceComponent, DEFAULT_USER_TTL,
};
use std::sync::Arc;

fn service_with_user(id: i64) -> (Arc<InMemoryUserRepository>, UserServiceComponent) {
    let users = Arc::new(InMemoryUserRepository::new());
    let mut user = User::new(
        format!("user{id}"),
        format!("user{id}@example.com"),
        format!("User {id}"),
        "hash".into(),
    );
    user.id = UserId::new(id);
    user.is_active = true;
    users.insert(user);

    let service = UserServiceComponent::new(
        Arc::new(MemoryCacheService::new()),
        users.clone(),
        DEFAULT_USER_TTL,
    );
    (users, service)
}

/// Two consecutive lookups hit the durable store once.
#[tokio::test]
async fn repeated_lookup_fetches_durably_once() {
    let (users, service) = service_with_user(42);

    let first = service.get_user(UserId::new(42)).await.unwrap();
    let second = service.get_user(UserId::new(42)).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(users.find_by_id_calls(), 1);
}

/// A profile update invalidates the cache, so the next read is fresh.
#[tokio::test]
async fn lookup_after_update_sees_new_value() {
    let (_users, service) = service_with_user(42);

    // Prime the cache.
    let before = service.get_user(UserId::new(42)).await.unwrap();
    assert_eq!(before.name, "User 42");

    service
        .update_profile(
            UserId::new(42),
            UpdateProfileRequest {
                name: Some("Renamed".into()),
                bio: Some("New bio".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let after = service.get_user(UserId::new(42)).await.unwrap();
    assert_eq!(after.name, "Renamed");
    assert_eq!(after.bio.as_deref(), Some("New bio"));
}

/// Updating a user that vanished is a not-found, not a silent success.
#[tokio::test]
async fn update_of_missing_user_is_not_found() {
    let (users, service) = service_with_user(42);
    users.remove(UserId::new(42));

    let err = service
        .update_profile(
            UserId::new(42),
            UpdateProfileRequest {
                name: Some("Ghost".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, QuillError::NotFound { .. }));
}

/// Validation failures surface before any durable write.
#[tokio::test]
async fn invalid_profile_update_is_rejected() {
    let (_users, service) = service_with_user(42);

    let err = service
        .update_profile(
            UserId::new(42),
            UpdateProfileRequest {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, QuillError::Validation(_)));
}
