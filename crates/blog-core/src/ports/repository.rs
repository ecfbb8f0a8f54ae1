use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, CommentEntry, Location, Post, PostEntry, User};
use crate::error::RepoError;
use crate::pagination::Window;
use crate::policy::visibility;

/// Field rules a repository enforces before writing an entity.
pub trait Validate {
    fn validate(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

impl Validate for User {}
impl Validate for Location {}
impl Validate for Post {}
impl Validate for Comment {}

impl Validate for Category {
    fn validate(&self) -> Result<(), RepoError> {
        if Category::is_valid_slug(&self.slug) {
            Ok(())
        } else {
            Err(RepoError::Invalid(format!("invalid category slug: {}", self.slug)))
        }
    }
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, applying the cascade and clear-on-delete rules.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. Deleting a user deletes their posts and comments.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository. Deleting a category clears it from its posts.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

/// Location repository. Deleting a location clears it from its posts.
pub trait LocationRepository: BaseRepository<Location, Uuid> {}

/// Post repository. Deleting a post deletes its comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Posts matching `filter`, newest `pub_date` first, sliced by `window`.
    async fn feed(&self, filter: &PostFilter, window: Window)
    -> Result<Vec<PostEntry>, RepoError>;

    /// A single post with its references and comment count.
    async fn entry(&self, id: Uuid) -> Result<Option<PostEntry>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// All comments of a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<CommentEntry>, RepoError>;
}

/// Which posts a feed query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// No publication filtering; used for an author's own profile.
    #[default]
    All,
    /// Only posts public at the given instant.
    PublicAt(DateTime<Utc>),
}

/// Feed query filter.
///
/// Built fresh for every query through the builder methods; nothing about
/// a filter is shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub author_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub visibility: Visibility,
}

impl PostFilter {
    pub fn public_at(mut self, now: DateTime<Utc>) -> Self {
        self.visibility = Visibility::PublicAt(now);
        self
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn by_author(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Evaluate the filter against one post and the category it references.
    ///
    /// Stores that cannot push the filter down to a query language use this
    /// so that they agree with the visibility policy exactly.
    pub fn matches(&self, post: &Post, category: Option<&Category>) -> bool {
        self.author_id.is_none_or(|id| post.author_id == id)
            && self.category_id.is_none_or(|id| post.category_id == Some(id))
            && match self.visibility {
                Visibility::All => true,
                Visibility::PublicAt(now) => visibility::is_public(post, category, now),
            }
    }
}

/// Handles to every entity store, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::domain::PostDraft;

    #[test]
    fn test_filter_defaults_to_everything() {
        let filter = PostFilter::default();
        assert_eq!(filter.visibility, Visibility::All);
        assert!(filter.author_id.is_none() && filter.category_id.is_none());
    }

    #[test]
    fn test_filter_matches_like_policy() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let category = Category::new("news".into(), "News".into(), String::new());
        let draft = PostDraft {
            title: "Scheduled".into(),
            text: "Soon".into(),
            image: None,
            pub_date: now + TimeDelta::hours(1),
            is_published: true,
            location_id: None,
            category_id: Some(category.id),
        };
        let post = Post::new(author, draft, now);

        assert!(PostFilter::default().by_author(author).matches(&post, Some(&category)));
        assert!(!PostFilter::default().public_at(now).matches(&post, Some(&category)));
        assert!(
            PostFilter::default()
                .public_at(now + TimeDelta::hours(2))
                .in_category(category.id)
                .matches(&post, Some(&category))
        );
        assert!(
            !PostFilter::default()
                .in_category(Uuid::new_v4())
                .matches(&post, Some(&category))
        );
    }
}
