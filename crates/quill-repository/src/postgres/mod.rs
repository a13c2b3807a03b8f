//! PostgreSQL repository implementations.

mod category_repository;
mod comment_repository;
mod like_repository;
mod notification_repository;
mod post_repository;
mod user_repository;

pub use category_repository::PgCategoryRepository;
pub use comment_repository::PgCommentRepository;
pub use like_repository::PgPostLikeRepository;
pub use notification_repository::PgNotificationRepository;
pub use post_repository::PgPostRepository;
pub use user_repository::PgUserRepository;
