//! PostgreSQL notification repository implementation.

use crate::{pool::DatabasePoolInterface, traits::NotificationRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::{
    ActorSummary, Notification, NotificationId, NotificationKind, PageRequest, PostId,
    QuillError, QuillResult, UserId,
};
use shaku::Component;
use sqlx::{FromRow, Row};
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL notification repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = NotificationRepository)]
pub struct PgNotificationRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgNotificationRepository {
    /// Creates a new PostgreSQL notification repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Notification row joined with the actor's user summary. The actor columns
/// are nullable because the join is a LEFT JOIN; a deleted actor leaves the
/// notification intact with no summary attached.
#[derive(Debug, FromRow)]
struct NotificationRow {
    id: i64,
    user_id: i64,
    kind: String,
    related_id: i64,
    actor_id: i64,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
    actor_name: Option<String>,
    actor_username: Option<String>,
    actor_profile_picture: Option<Vec<u8>>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = QuillError;

    /// Fails when the stored type tag is not one this binary knows.
    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = NotificationKind::parse(&row.kind).ok_or_else(|| {
            QuillError::Database(format!(
                "unrecognized type '{}' for notification {}",
                row.kind, row.id
            ))
        })?;

        let actor = match (row.actor_name, row.actor_username) {
            (Some(name), Some(username)) => Some(ActorSummary {
                id: UserId::new(row.actor_id),
                name,
                username,
                profile_picture: row.actor_profile_picture,
            }),
            _ => None,
        };

        Ok(Notification {
            id: NotificationId::new(row.id),
            user_id: UserId::new(row.user_id),
            kind,
            related_id: PostId::new(row.related_id),
            actor_id: UserId::new(row.actor_id),
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
            actor,
        })
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, notification: &Notification) -> QuillResult<Notification> {
        debug!(
            "Creating {} notification for user {}",
            notification.kind, notification.user_id
        );

        let row = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, type, related_id, actor_id, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            "#,
        )
        .bind(notification.user_id.into_inner())
        .bind(notification.kind.to_string())
        .bind(notification.related_id.into_inner())
        .bind(notification.actor_id.into_inner())
        .bind(&notification.message)
        .fetch_one(self.pool.inner())
        .await?;

        let mut created = notification.clone();
        created.id = NotificationId::new(row.try_get::<i64, _>("id")?);
        created.created_at = row.try_get::<DateTime<Utc>, _>("created_at")?;
        created.is_read = false;
        Ok(created)
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> QuillResult<Vec<Notification>> {
        debug!("Listing notifications for user {}", user_id);

        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT n.id, n.user_id, n.type AS kind, n.related_id, n.actor_id,
                   n.message, n.is_read, n.created_at,
                   u.name AS actor_name, u.username AS actor_username,
                   u.profile_picture AS actor_profile_picture
            FROM notifications n
            LEFT JOIN users u ON u.id = n.actor_id
            WHERE n.user_id = $1
            ORDER BY n.created_at DESC, n.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn count_unread(&self, user_id: UserId) -> QuillResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS cnt FROM notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id.into_inner())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.try_get::<i64, _>("cnt")?)
    }

    async fn mark_read(&self, id: NotificationId, user_id: UserId) -> QuillResult<u64> {
        debug!("Marking notification {} read for user {}", id, user_id);

        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
                .bind(id.into_inner())
                .bind(user_id.into_inner())
                .execute(self.pool.inner())
                .await?;

        Ok(result.rows_affected())
    }

    async fn mark_all_read(&self, user_id: UserId) -> QuillResult<u64> {
        debug!("Marking all notifications read for user {}", user_id);

        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND NOT is_read")
                .bind(user_id.into_inner())
                .execute(self.pool.inner())
                .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: &str) -> NotificationRow {
        NotificationRow {
            id: 5,
            user_id: 7,
            kind: kind.into(),
            related_id: 3,
            actor_id: 9,
            message: "Bob liked your post".into(),
            is_read: false,
            created_at: Utc::now(),
            actor_name: Some("Bob".into()),
            actor_username: Some("bob".into()),
            actor_profile_picture: None,
        }
    }

    #[test]
    fn row_with_known_kind_converts() {
        let notification = Notification::try_from(row("comment")).unwrap();
        assert_eq!(notification.kind, NotificationKind::Comment);
        assert!(notification.actor.is_some());
    }

    #[test]
    fn row_with_unknown_kind_is_a_database_error() {
        let err = Notification::try_from(row("mention")).unwrap_err();
        assert!(matches!(err, QuillError::Database(_)));
        assert!(err.to_string().contains("mention"));
    }
}
