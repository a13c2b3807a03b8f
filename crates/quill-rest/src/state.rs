//! Application state for Axum handlers.

use quill_realtime::NotificationHub;
use quill_service::{AuthService, CategoryService, NotificationService, PostService, UserService};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state.
///
/// The hub is the same instance the notification service pushes into; it is
/// owned here so the SSE endpoint can subscribe without going through DI.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub auth_service: Arc<dyn AuthService>,
    pub post_service: Arc<dyn PostService>,
    pub category_service: Arc<dyn CategoryService>,
    pub notification_service: Arc<dyn NotificationService>,
    pub hub: Arc<NotificationHub>,
    pub heartbeat_interval: Duration,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        auth_service: Arc<dyn AuthService>,
        post_service: Arc<dyn PostService>,
        category_service: Arc<dyn CategoryService>,
        notification_service: Arc<dyn NotificationService>,
        hub: Arc<NotificationHub>,
        heartbeat_interval: Duration,
    ) -> Self {
        Self {
            user_service,
            auth_service,
            post_service,
            category_service,
            notification_service,
            hub,
            heartbeat_interval,
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M, hub: Arc<NotificationHub>, heartbeat_interval: Duration) -> Self
    where
        M: Module
            + HasComponent<dyn UserService>
            + HasComponent<dyn AuthService>
            + HasComponent<dyn PostService>
            + HasComponent<dyn CategoryService>
            + HasComponent<dyn NotificationService>,
    {
        Self {
            user_service: module.resolve(),
            auth_service: module.resolve(),
            post_service: module.resolve(),
            category_service: module.resolve(),
            notification_service: module.resolve(),
            hub,
            heartbeat_interval,
        }
    }
}
