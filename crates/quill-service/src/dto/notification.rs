//! Notification DTOs.

use quill_core::Notification;
use serde::Serialize;

/// Page of a user's notifications, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub count: usize,
}

impl From<Vec<Notification>> for NotificationListResponse {
    fn from(notifications: Vec<Notification>) -> Self {
        let count = notifications.len();
        Self {
            notifications,
            count,
        }
    }
}

/// Unread notification count.
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}
