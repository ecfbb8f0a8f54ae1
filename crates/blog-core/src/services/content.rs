//! Read side: feeds and post detail.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, CommentEntry, PostEntry, User, Viewer};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest, Paginator};
use crate::policy::category_is_open;
use crate::ports::{PostFilter, Repositories};

/// Which feed to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    /// Every public post.
    Home,
    /// Public posts of one published category, by slug.
    Category(String),
    /// Posts of one author, by username.
    Profile(String),
}

/// What a feed was listed for.
#[derive(Debug, Clone)]
pub enum FeedContext {
    Home,
    Category(Category),
    Profile(User),
}

#[derive(Debug, Clone)]
pub struct Feed {
    pub context: FeedContext,
    pub page: Page<PostEntry>,
}

/// How the viewer got to see a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The viewer wrote it; publication rules were skipped.
    Owner,
    Visible,
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    pub entry: PostEntry,
    pub comments: Vec<CommentEntry>,
    pub access: Access,
}

/// Decide whether a fetched post may be shown. `None` reads as not found.
pub fn detail_access(entry: &PostEntry, viewer: &Viewer, now: DateTime<Utc>) -> Option<Access> {
    if viewer.is(entry.post.author_id) {
        Some(Access::Owner)
    } else if entry.is_visible_to(viewer, now) {
        Some(Access::Visible)
    } else {
        None
    }
}

/// Feed and detail queries.
#[derive(Clone)]
pub struct ContentService {
    repos: Repositories,
    paginator: Paginator,
}

impl ContentService {
    pub fn new(repos: Repositories) -> Self {
        Self {
            repos,
            paginator: Paginator::default(),
        }
    }

    /// List one page of a feed.
    ///
    /// A missing or unpublished category and an unknown username are
    /// reported as [`DomainError::NotFound`].
    pub async fn list_feed(
        &self,
        kind: FeedKind,
        viewer: &Viewer,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Feed, DomainError> {
        let (filter, context) = match kind {
            FeedKind::Home => (PostFilter::default().public_at(now), FeedContext::Home),
            FeedKind::Category(slug) => {
                let category = self
                    .repos
                    .categories
                    .find_by_slug(&slug)
                    .await?
                    .filter(category_is_open)
                    .ok_or_else(|| DomainError::not_found("category", &slug))?;

                let filter = PostFilter::default()
                    .in_category(category.id)
                    .public_at(now);
                (filter, FeedContext::Category(category))
            }
            FeedKind::Profile(username) => {
                let profile = self
                    .repos
                    .users
                    .find_by_username(&username)
                    .await?
                    .ok_or_else(|| DomainError::not_found("user", &username))?;

                let mut filter = PostFilter::default().by_author(profile.id);
                if !viewer.is(profile.id) {
                    filter = filter.public_at(now);
                }
                (filter, FeedContext::Profile(profile))
            }
        };

        let count = self.repos.posts.count(&filter).await?;
        let number = self.paginator.resolve(page, count);
        let items = self
            .repos
            .posts
            .feed(&filter, self.paginator.window(number))
            .await?;

        tracing::debug!(?filter, count, page = number, "feed listed");

        Ok(Feed {
            context,
            page: self.paginator.page(items, number, count),
        })
    }

    /// Fetch one post with its comments, hiding it unless `viewer` may see it.
    pub async fn post_detail(
        &self,
        post_id: Uuid,
        viewer: &Viewer,
        now: DateTime<Utc>,
    ) -> Result<PostDetail, DomainError> {
        let not_found = || DomainError::not_found("post", post_id);

        let entry = self.repos.posts.entry(post_id).await?.ok_or_else(not_found)?;
        let access = detail_access(&entry, viewer, now).ok_or_else(not_found)?;
        let comments = self.repos.comments.find_by_post(post_id).await?;

        Ok(PostDetail {
            entry,
            comments,
            access,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::domain::{Author, Post, PostDraft};

    fn entry(author_id: Uuid, is_published: bool, now: DateTime<Utc>) -> PostEntry {
        let category = Category::new("misc".into(), "Misc".into(), String::new());
        let draft = PostDraft {
            title: "Draft".into(),
            text: "Body".into(),
            image: None,
            pub_date: now - TimeDelta::minutes(5),
            is_published,
            location_id: None,
            category_id: Some(category.id),
        };
        PostEntry {
            post: Post::new(author_id, draft, now),
            author: Author {
                id: author_id,
                username: "writer".into(),
            },
            category: Some(category),
            location: None,
            comment_count: 0,
        }
    }

    #[test]
    fn test_detail_state_machine() {
        let now = Utc::now();
        let author = Uuid::new_v4();

        let hidden = entry(author, false, now);
        assert_eq!(detail_access(&hidden, &Viewer::User(author), now), Some(Access::Owner));
        assert_eq!(detail_access(&hidden, &Viewer::Anonymous, now), None);

        let public = entry(author, true, now);
        assert_eq!(detail_access(&public, &Viewer::User(author), now), Some(Access::Owner));
        assert_eq!(detail_access(&public, &Viewer::Anonymous, now), Some(Access::Visible));
        assert_eq!(
            detail_access(&public, &Viewer::User(Uuid::new_v4()), now),
            Some(Access::Visible)
        );
    }
}
