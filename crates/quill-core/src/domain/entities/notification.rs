//! Notification entity.

use crate::{NotificationId, NotificationKind, PostId, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Denormalized summary of the user who triggered a notification.
///
/// Carried alongside the notification so clients can render it without a
/// second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub id: UserId,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<Vec<u8>>,
}

impl From<&User> for ActorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            profile_picture: user.profile_picture.clone(),
        }
    }
}

/// A durable notification record.
///
/// Created by domain logic on qualifying events, never by the recipient.
/// The only permitted mutation is flipping `is_read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier for the notification.
    pub id: NotificationId,

    /// The recipient.
    pub user_id: UserId,

    /// The kind of event this notification describes.
    #[serde(rename = "type")]
    pub kind: NotificationKind,

    /// The entity the notification relates to.
    pub related_id: PostId,

    /// The user who triggered the event.
    pub actor_id: UserId,

    /// Human-readable message.
    pub message: String,

    /// Whether the recipient has seen this notification.
    pub is_read: bool,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Denormalized actor profile summary, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorSummary>,
}

impl Notification {
    /// Creates a new unread notification; the id is assigned on save.
    #[must_use]
    pub fn new(
        user_id: UserId,
        kind: NotificationKind,
        related_id: PostId,
        actor_id: UserId,
        message: String,
    ) -> Self {
        Self {
            id: NotificationId::new(0),
            user_id,
            kind,
            related_id,
            actor_id,
            message,
            is_read: false,
            created_at: Utc::now(),
            actor: None,
        }
    }

    /// Attaches a denormalized actor summary.
    #[must_use]
    pub fn with_actor(mut self, actor: &User) -> Self {
        self.actor = Some(ActorSummary::from(actor));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_under_type_key() {
        let notification = Notification::new(
            UserId::new(7),
            NotificationKind::Like,
            PostId::new(3),
            UserId::new(9),
            "Bob liked your post".into(),
        );

        let value: serde_json::Value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], "like");
        assert_eq!(value["user_id"], 7);
        assert_eq!(value["is_read"], false);
    }
}
