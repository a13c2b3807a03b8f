//! # Quill Service
//!
//! Business logic service layer for the Quill blog platform: user, auth,
//! post, category, and notification services plus the caching layer.

pub mod auth_service;
pub mod cache;
pub mod category_service;
pub mod dto;
pub mod notification_service;
pub mod post_service;
pub mod user_service;

pub use auth_service::*;
pub use cache::*;
pub use category_service::*;
pub use dto::*;
pub use notification_service::*;
pub use post_service::*;
pub use user_service::*;
