//! Notification service: creation, delivery, and read state.

use crate::dto::NotificationListResponse;
use async_trait::async_trait;
use quill_core::{
    Interface, Notification, NotificationId, NotificationKind, PageRequest, PostId, QuillError,
    QuillResult, UserId,
};
use quill_realtime::NotificationHub;
use quill_repository::{NotificationRepository, PostRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Notification creation, delivery, and read-state management.
#[async_trait]
pub trait NotificationService: Interface + Send + Sync {
    /// Notifies a post's author that someone liked it.
    ///
    /// No-op when the actor is the author. Persists the notification, then
    /// pushes it to the recipient's live channel best-effort.
    async fn notify_post_liked(&self, post_id: PostId, actor_id: UserId) -> QuillResult<()>;

    /// Notifies a post's author that someone commented on it.
    async fn notify_post_commented(&self, post_id: PostId, actor_id: UserId) -> QuillResult<()>;

    /// Lists a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> QuillResult<NotificationListResponse>;

    /// Counts a user's unread notifications.
    async fn unread_count(&self, user_id: UserId) -> QuillResult<i64>;

    /// Marks one notification as read; `NotFound` when it doesn't exist or
    /// belongs to someone else.
    async fn mark_read(&self, id: NotificationId, user_id: UserId) -> QuillResult<()>;

    /// Marks all of a user's notifications as read, returning the count.
    async fn mark_all_read(&self, user_id: UserId) -> QuillResult<u64>;
}

/// Concrete notification service for Shaku DI.
///
/// The hub is an owned process-wide component passed in as a parameter
/// rather than injected, since the same instance backs the SSE endpoint.
#[derive(Component)]
#[shaku(interface = NotificationService)]
pub struct NotificationServiceComponent {
    #[shaku(inject)]
    notifications: Arc<dyn NotificationRepository>,
    #[shaku(inject)]
    posts: Arc<dyn PostRepository>,
    #[shaku(inject)]
    users: Arc<dyn UserRepository>,
    hub: Arc<NotificationHub>,
}

impl NotificationServiceComponent {
    #[must_use]
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        Self {
            notifications,
            posts,
            users,
            hub,
        }
    }

    async fn notify(
        &self,
        post_id: PostId,
        actor_id: UserId,
        kind: NotificationKind,
        verb: &str,
    ) -> QuillResult<()> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| QuillError::not_found("Post", post_id))?;

        // Never notify users about their own activity.
        if post.user_id == actor_id {
            debug!("Skipping self-notification for user {}", actor_id);
            return Ok(());
        }

        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| QuillError::not_found("User", actor_id))?;

        let message = format!("{} {} your post", actor.name, verb);
        let notification =
            Notification::new(post.user_id, kind, post_id, actor_id, message).with_actor(&actor);

        let created = self.notifications.create(&notification).await?;
        info!(
            "Created {} notification {} for user {}",
            created.kind, created.id, created.user_id
        );

        // Offline or slow recipients just miss the live push; the durable
        // row is what they will see on their next fetch.
        self.hub.send_to_user(created.user_id, &created);

        Ok(())
    }
}

#[async_trait]
impl NotificationService for NotificationServiceComponent {
    async fn notify_post_liked(&self, post_id: PostId, actor_id: UserId) -> QuillResult<()> {
        self.notify(post_id, actor_id, NotificationKind::Like, "liked")
            .await
    }

    async fn notify_post_commented(&self, post_id: PostId, actor_id: UserId) -> QuillResult<()> {
        self.notify(post_id, actor_id, NotificationKind::Comment, "commented on")
            .await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> QuillResult<NotificationListResponse> {
        debug!("Listing notifications for user: {}", user_id);
        let notifications = self.notifications.find_by_user(user_id, page).await?;
        Ok(NotificationListResponse::from(notifications))
    }

    async fn unread_count(&self, user_id: UserId) -> QuillResult<i64> {
        self.notifications.count_unread(user_id).await
    }

    async fn mark_read(&self, id: NotificationId, user_id: UserId) -> QuillResult<()> {
        debug!("Marking notification {} read for user {}", id, user_id);

        let rows = self.notifications.mark_read(id, user_id).await?;
        if rows == 0 {
            return Err(QuillError::not_found("Notification", id));
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: UserId) -> QuillResult<u64> {
        let flipped = self.notifications.mark_all_read(user_id).await?;
        info!(
            "Marked {} notifications read for user {}",
            flipped, user_id
        );
        Ok(flipped)
    }
}

impl std::fmt::Debug for NotificationServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationServiceComponent")
            .finish_non_exhaustive()
    }
}
