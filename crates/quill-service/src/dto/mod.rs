//! Request and response data transfer objects.

pub mod auth;
pub mod category;
pub mod notification;
pub mod post;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use category::{CategoryRequest, CategoryResponse};
pub use notification::{NotificationListResponse, UnreadCountResponse};
pub use post::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, FeedResponse, PostResponse,
};
pub use user::{UpdateProfileRequest, UserResponse};
