//! HTTP controllers.

pub mod auth_controller;
pub mod category_controller;
pub mod health_controller;
pub mod notification_controller;
pub mod post_controller;
pub mod user_controller;
