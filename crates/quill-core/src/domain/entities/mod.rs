//! Domain entities.

pub mod category;
pub mod comment;
pub mod feed;
pub mod notification;
pub mod post;
pub mod user;

pub use category::Category;
pub use comment::Comment;
pub use feed::{FeedItem, FeedQuery};
pub use notification::{ActorSummary, Notification};
pub use post::Post;
pub use user::User;
