//! In-memory repository implementations.
//!
//! These back the service-layer tests. They implement the same traits as the
//! PostgreSQL repositories, so services can be exercised without a database.

use crate::traits::{
    CategoryRepository, CommentRepository, NotificationRepository, PostLikeRepository,
    PostRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use quill_core::{
    Category, CategoryId, Comment, CommentId, FeedItem, FeedQuery, Notification, NotificationId,
    PageRequest, Post, PostId, QuillError, QuillResult, User, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

/// In-memory user repository.
///
/// Counts `find_by_id` calls so tests can assert how often a caller actually
/// reached the backing store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
    next_id: AtomicI64,
    find_by_id_calls: AtomicUsize,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            find_by_id_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `find_by_id` calls made so far.
    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    /// Inserts a user directly, bypassing id assignment.
    pub fn insert(&self, user: User) {
        self.users.lock().insert(user.id, user);
    }

    /// Removes a user directly.
    pub fn remove(&self, id: UserId) {
        self.users.lock().remove(&id);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> QuillResult<Option<User>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> QuillResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> QuillResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn save(&self, user: &User) -> QuillResult<User> {
        let mut stored = user.clone();
        if stored.id.into_inner() == 0 {
            stored.id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.users.lock().insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> QuillResult<u64> {
        let mut users = self.users.lock();
        if users.contains_key(&user.id) {
            users.insert(user.id, user.clone());
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<HashMap<PostId, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Inserts a post directly, bypassing id assignment.
    pub fn insert(&self, post: Post) {
        self.posts.lock().insert(post.id, post);
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> QuillResult<Option<Post>> {
        Ok(self.posts.lock().get(&id).cloned())
    }

    async fn save(&self, post: &Post) -> QuillResult<Post> {
        let mut stored = post.clone();
        if stored.id.into_inner() == 0 {
            stored.id = PostId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.posts.lock().insert(stored.id, stored.clone());
        Ok(stored)
    }

    /// The fake has no user or category tables to join against, so the
    /// author and category names come back as `None`.
    async fn feed(&self, query: &FeedQuery) -> QuillResult<Vec<FeedItem>> {
        let posts = self.posts.lock();
        let search = query.search.as_ref().map(|s| s.to_lowercase());
        let mut matching: Vec<Post> = posts
            .values()
            .filter(|p| match &search {
                Some(needle) => {
                    p.title.to_lowercase().contains(needle)
                        || p.content.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|p| match query.category_id {
                Some(category_id) => p.category_id == Some(category_id),
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(matching
            .into_iter()
            .skip(query.page.offset as usize)
            .take(query.page.limit as usize)
            .map(|p| FeedItem {
                post_id: p.id,
                title: p.title,
                user_id: p.user_id,
                author: None,
                category_id: p.category_id,
                category: None,
                updated_at: p.updated_at,
            })
            .collect())
    }
}

/// In-memory category repository.
///
/// Enforces name uniqueness the way the real table's constraint does.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: Mutex<HashMap<CategoryId, Category>>,
    next_id: AtomicI64,
}

impl InMemoryCategoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> QuillResult<Option<Category>> {
        Ok(self.categories.lock().get(&id).cloned())
    }

    async fn find_all(&self) -> QuillResult<Vec<Category>> {
        let mut all: Vec<Category> = self.categories.lock().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn save(&self, category: &Category) -> QuillResult<Category> {
        let mut categories = self.categories.lock();
        if categories.values().any(|c| c.name == category.name) {
            return Err(QuillError::conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
        let mut stored = category.clone();
        if stored.id.into_inner() == 0 {
            stored.id = CategoryId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        categories.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, category: &Category) -> QuillResult<u64> {
        let mut categories = self.categories.lock();
        if categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(QuillError::conflict(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
        if categories.contains_key(&category.id) {
            categories.insert(category.id, category.clone());
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn delete(&self, id: CategoryId) -> QuillResult<u64> {
        if self.categories.lock().remove(&id).is_some() {
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

/// In-memory comment repository.
#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: Mutex<Vec<Comment>>,
    next_id: AtomicI64,
}

impl InMemoryCommentRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            comments: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn save(&self, comment: &Comment) -> QuillResult<Comment> {
        let mut stored = comment.clone();
        if stored.id.into_inner() == 0 {
            stored.id = CommentId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.comments.lock().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_post(&self, post_id: PostId, page: PageRequest) -> QuillResult<Vec<Comment>> {
        let comments = self.comments.lock();
        let mut matching: Vec<Comment> = comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(matching
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }
}

/// In-memory post like repository.
#[derive(Default)]
pub struct InMemoryPostLikeRepository {
    likes: Mutex<Vec<(PostId, UserId)>>,
}

impl InMemoryPostLikeRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostLikeRepository for InMemoryPostLikeRepository {
    async fn add(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool> {
        let mut likes = self.likes.lock();
        if likes.contains(&(post_id, user_id)) {
            Ok(false)
        } else {
            likes.push((post_id, user_id));
            Ok(true)
        }
    }

    async fn remove(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool> {
        let mut likes = self.likes.lock();
        let before = likes.len();
        likes.retain(|entry| *entry != (post_id, user_id));
        Ok(likes.len() < before)
    }

    async fn exists(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool> {
        Ok(self.likes.lock().contains(&(post_id, user_id)))
    }

    async fn count(&self, post_id: PostId) -> QuillResult<i64> {
        Ok(self
            .likes
            .lock()
            .iter()
            .filter(|(p, _)| *p == post_id)
            .count() as i64)
    }
}

/// In-memory notification repository.
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: Mutex<Vec<Notification>>,
    next_id: AtomicI64,
}

impl InMemoryNotificationRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, notification: &Notification) -> QuillResult<Notification> {
        let mut stored = notification.clone();
        stored.id = NotificationId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        stored.is_read = false;
        stored.created_at = Utc::now();
        self.notifications.lock().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> QuillResult<Vec<Notification>> {
        let notifications = self.notifications.lock();
        let mut matching: Vec<Notification> = notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(matching
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count_unread(&self, user_id: UserId) -> QuillResult<i64> {
        Ok(self
            .notifications
            .lock()
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: NotificationId, user_id: UserId) -> QuillResult<u64> {
        let mut notifications = self.notifications.lock();
        match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn mark_all_read(&self, user_id: UserId) -> QuillResult<u64> {
        let mut notifications = self.notifications.lock();
        let mut flipped = 0;
        for notification in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            notification.is_read = true;
            flipped += 1;
        }
        Ok(flipped)
    }
}
