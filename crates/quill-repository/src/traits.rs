//! Repository trait definitions.

use async_trait::async_trait;
use quill_core::{
    Category, CategoryId, Comment, FeedItem, FeedQuery, Interface, Notification, NotificationId,
    PageRequest, Post, PostId, QuillResult, User, UserId,
};

/// User repository trait.
///
/// `find_*` methods return `Ok(None)` for missing rows; translating that
/// into a NotFound error is the caller's decision.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> QuillResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> QuillResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> QuillResult<Option<User>>;

    /// Saves a new user, returning it with its assigned id.
    async fn save(&self, user: &User) -> QuillResult<User>;

    /// Updates an existing user.
    ///
    /// Returns the number of rows affected; zero means the user no longer
    /// exists and callers should treat it as not-found.
    async fn update(&self, user: &User) -> QuillResult<u64>;
}

/// Post repository trait.
#[async_trait]
pub trait PostRepository: Interface + Send + Sync {
    /// Finds a post by ID.
    async fn find_by_id(&self, id: PostId) -> QuillResult<Option<Post>>;

    /// Saves a new post, returning it with its assigned id.
    async fn save(&self, post: &Post) -> QuillResult<Post>;

    /// Lists posts for the public feed, newest first, with author and
    /// category names joined in where the backing store can resolve them.
    async fn feed(&self, query: &FeedQuery) -> QuillResult<Vec<FeedItem>>;
}

/// Category repository trait.
#[async_trait]
pub trait CategoryRepository: Interface + Send + Sync {
    /// Finds a category by ID.
    async fn find_by_id(&self, id: CategoryId) -> QuillResult<Option<Category>>;

    /// Lists all categories, ordered by name.
    async fn find_all(&self) -> QuillResult<Vec<Category>>;

    /// Saves a new category, returning it with its assigned id.
    ///
    /// A duplicate name surfaces as a Conflict error.
    async fn save(&self, category: &Category) -> QuillResult<Category>;

    /// Renames an existing category.
    ///
    /// Returns the number of rows affected; zero means the category no
    /// longer exists. A duplicate name surfaces as a Conflict error.
    async fn update(&self, category: &Category) -> QuillResult<u64>;

    /// Deletes a category.
    ///
    /// Returns the number of rows affected; zero means the category no
    /// longer exists.
    async fn delete(&self, id: CategoryId) -> QuillResult<u64>;
}

/// Comment repository trait.
#[async_trait]
pub trait CommentRepository: Interface + Send + Sync {
    /// Saves a new comment, returning it with its assigned id.
    async fn save(&self, comment: &Comment) -> QuillResult<Comment>;

    /// Lists comments on a post, oldest first.
    async fn find_by_post(&self, post_id: PostId, page: PageRequest) -> QuillResult<Vec<Comment>>;
}

/// Post like repository trait.
#[async_trait]
pub trait PostLikeRepository: Interface + Send + Sync {
    /// Records a like. Returns `false` if the user had already liked the post.
    async fn add(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool>;

    /// Removes a like. Returns `false` if no like existed.
    async fn remove(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool>;

    /// Checks whether the user has liked the post.
    async fn exists(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool>;

    /// Counts likes on a post.
    async fn count(&self, post_id: PostId) -> QuillResult<i64>;
}

/// Notification repository trait.
#[async_trait]
pub trait NotificationRepository: Interface + Send + Sync {
    /// Persists a notification, returning it with its assigned id.
    async fn create(&self, notification: &Notification) -> QuillResult<Notification>;

    /// Lists a user's notifications, newest first, with the actor summary
    /// joined in.
    async fn find_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> QuillResult<Vec<Notification>>;

    /// Counts a user's unread notifications.
    async fn count_unread(&self, user_id: UserId) -> QuillResult<i64>;

    /// Marks one notification as read, scoped to the owning user.
    ///
    /// Returns the number of rows affected; zero means the notification does
    /// not exist or belongs to someone else.
    async fn mark_read(&self, id: NotificationId, user_id: UserId) -> QuillResult<u64>;

    /// Marks all of a user's notifications as read, returning how many were
    /// flipped.
    async fn mark_all_read(&self, user_id: UserId) -> QuillResult<u64>;
}
