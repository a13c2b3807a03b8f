//! Post service: posts, comments, and likes.

use crate::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, FeedResponse, PostResponse,
};
use crate::notification_service::NotificationService;
use async_trait::async_trait;
use quill_core::{
    Comment, FeedQuery, Interface, PageRequest, Post, PostId, QuillError, QuillResult, UserId,
};
use quill_repository::{
    CategoryRepository, CommentRepository, PostLikeRepository, PostRepository,
};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

/// Posts, comments, and likes.
///
/// Liking and commenting trigger notifications to the post author; the
/// notification push never fails the request.
#[async_trait]
pub trait PostService: Interface + Send + Sync {
    /// Creates a post.
    async fn create_post(
        &self,
        author_id: UserId,
        request: CreatePostRequest,
    ) -> QuillResult<PostResponse>;

    /// Fetches a post with its like count.
    async fn get_post(&self, id: PostId) -> QuillResult<PostResponse>;

    /// Lists the public feed, newest first.
    async fn feed(&self, query: FeedQuery) -> QuillResult<FeedResponse>;

    /// Adds a comment and notifies the post author.
    async fn add_comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        request: CreateCommentRequest,
    ) -> QuillResult<CommentResponse>;

    /// Lists comments on a post, oldest first.
    async fn list_comments(
        &self,
        post_id: PostId,
        page: PageRequest,
    ) -> QuillResult<Vec<CommentResponse>>;

    /// Likes a post, returning the new like count.
    ///
    /// Idempotent; only the first like by a user notifies the author.
    async fn like_post(&self, post_id: PostId, user_id: UserId) -> QuillResult<i64>;

    /// Removes a like, returning the new like count.
    async fn unlike_post(&self, post_id: PostId, user_id: UserId) -> QuillResult<i64>;
}

/// Concrete post service for Shaku DI.
#[derive(Component)]
#[shaku(interface = PostService)]
pub struct PostServiceComponent {
    #[shaku(inject)]
    posts: Arc<dyn PostRepository>,
    #[shaku(inject)]
    comments: Arc<dyn CommentRepository>,
    #[shaku(inject)]
    likes: Arc<dyn PostLikeRepository>,
    #[shaku(inject)]
    categories: Arc<dyn CategoryRepository>,
    #[shaku(inject)]
    notifications: Arc<dyn NotificationService>,
}

impl PostServiceComponent {
    #[must_use]
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn PostLikeRepository>,
        categories: Arc<dyn CategoryRepository>,
        notifications: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            posts,
            comments,
            likes,
            categories,
            notifications,
        }
    }

    async fn require_post(&self, id: PostId) -> QuillResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| QuillError::not_found("Post", id))
    }
}

#[async_trait]
impl PostService for PostServiceComponent {
    async fn create_post(
        &self,
        author_id: UserId,
        request: CreatePostRequest,
    ) -> QuillResult<PostResponse> {
        debug!("Creating post for user: {}", author_id);

        request.validate()?;

        if let Some(category_id) = request.category_id {
            self.categories
                .find_by_id(category_id)
                .await?
                .ok_or_else(|| QuillError::not_found("Category", category_id))?;
        }

        let mut post = Post::new(author_id, request.title, request.content);
        post.category_id = request.category_id;
        let saved = self.posts.save(&post).await?;

        info!("Post created: {} by user {}", saved.id, author_id);
        Ok(PostResponse::from_post(saved, 0))
    }

    async fn get_post(&self, id: PostId) -> QuillResult<PostResponse> {
        let post = self.require_post(id).await?;
        let like_count = self.likes.count(id).await?;
        Ok(PostResponse::from_post(post, like_count))
    }

    async fn feed(&self, query: FeedQuery) -> QuillResult<FeedResponse> {
        let items = self.posts.feed(&query).await?;
        let count = items.len();
        Ok(FeedResponse { items, count })
    }

    async fn add_comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        request: CreateCommentRequest,
    ) -> QuillResult<CommentResponse> {
        debug!("Adding comment to post {} by user {}", post_id, author_id);

        request.validate()?;
        self.require_post(post_id).await?;

        let comment = Comment::new(post_id, author_id, request.content);
        let saved = self.comments.save(&comment).await?;

        // The comment is durable; a failed notification must not undo it.
        if let Err(e) = self
            .notifications
            .notify_post_commented(post_id, author_id)
            .await
        {
            warn!("Failed to create comment notification: {}", e);
        }

        info!("Comment {} added to post {}", saved.id, post_id);
        Ok(CommentResponse::from(saved))
    }

    async fn list_comments(
        &self,
        post_id: PostId,
        page: PageRequest,
    ) -> QuillResult<Vec<CommentResponse>> {
        self.require_post(post_id).await?;
        let comments = self.comments.find_by_post(post_id, page).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    async fn like_post(&self, post_id: PostId, user_id: UserId) -> QuillResult<i64> {
        debug!("User {} liking post {}", user_id, post_id);

        self.require_post(post_id).await?;

        // Repeat likes are absorbed without a second notification.
        if self.likes.add(post_id, user_id).await? {
            if let Err(e) = self.notifications.notify_post_liked(post_id, user_id).await {
                warn!("Failed to create like notification: {}", e);
            }
        }

        self.likes.count(post_id).await
    }

    async fn unlike_post(&self, post_id: PostId, user_id: UserId) -> QuillResult<i64> {
        debug!("User {} unliking post {}", user_id, post_id);

        self.require_post(post_id).await?;
        self.likes.remove(post_id, user_id).await?;
        self.likes.count(post_id).await
    }
}

impl std::fmt::Debug for PostServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostServiceComponent").finish_non_exhaustive()
    }
}
