//! Write side for posts and comments.
//!
//! Every operation checks, in order: the viewer is signed in, the target
//! exists (and for comments belongs to the given post), the viewer wrote
//! it. A failed authorship check is [`DomainError::Denied`], which the
//! boundary turns into a trip back to the post's detail page.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, CommentDraft, Post, PostDraft, Viewer};
use crate::error::DomainError;
use crate::policy::{can_delete, can_modify, is_visible, require_authenticated};
use crate::ports::Repositories;

#[derive(Clone)]
pub struct AuthoringService {
    repos: Repositories,
}

impl AuthoringService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create_post(
        &self,
        viewer: &Viewer,
        draft: PostDraft,
        now: DateTime<Utc>,
    ) -> Result<Post, DomainError> {
        let author_id = require_authenticated(viewer)?;
        self.validate_post(&draft).await?;

        let post = self.repos.posts.save(Post::new(author_id, draft, now)).await?;
        tracing::info!(post_id = %post.id, %author_id, "post created");
        Ok(post)
    }

    /// Load a post its author is about to edit or delete.
    pub async fn post_for_edit(&self, viewer: &Viewer, post_id: Uuid) -> Result<Post, DomainError> {
        require_authenticated(viewer)?;
        let post = self.find_post(post_id).await?;

        if !can_modify(&post, viewer) {
            return Err(DomainError::Denied { post_id });
        }
        Ok(post)
    }

    pub async fn edit_post(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let mut post = self.post_for_edit(viewer, post_id).await?;
        self.validate_post(&draft).await?;

        post.apply(draft);
        let post = self.repos.posts.save(post).await?;
        tracing::info!(%post_id, "post updated");
        Ok(post)
    }

    pub async fn delete_post(&self, viewer: &Viewer, post_id: Uuid) -> Result<Post, DomainError> {
        require_authenticated(viewer)?;
        let post = self.find_post(post_id).await?;

        if !can_delete(&post, viewer) {
            return Err(DomainError::Denied { post_id });
        }

        self.repos.posts.delete(post_id).await?;
        tracing::info!(%post_id, "post deleted");
        Ok(post)
    }

    /// Comment on a post the viewer can see.
    pub async fn add_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        draft: CommentDraft,
        now: DateTime<Utc>,
    ) -> Result<Comment, DomainError> {
        let author_id = require_authenticated(viewer)?;
        let post = self.find_post(post_id).await?;

        let category = match post.category_id {
            Some(id) => self.repos.categories.find_by_id(id).await?,
            None => None,
        };
        if !is_visible(&post, category.as_ref(), viewer, now) {
            return Err(DomainError::not_found("post", post_id));
        }

        let comment = Comment::new(author_id, post_id, draft.into_text(), now);
        let comment = self.repos.comments.save(comment).await?;
        tracing::info!(comment_id = %comment.id, %post_id, "comment added");
        Ok(comment)
    }

    /// Load a comment its author is about to edit or delete.
    pub async fn comment_for_edit(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, DomainError> {
        require_authenticated(viewer)?;
        let comment = self.find_comment(post_id, comment_id).await?;

        if !can_modify(&comment, viewer) {
            return Err(DomainError::Denied { post_id });
        }
        Ok(comment)
    }

    pub async fn edit_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
        draft: CommentDraft,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.comment_for_edit(viewer, post_id, comment_id).await?;

        comment.text = draft.into_text();
        let comment = self.repos.comments.save(comment).await?;
        tracing::info!(%comment_id, %post_id, "comment updated");
        Ok(comment)
    }

    pub async fn delete_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, DomainError> {
        require_authenticated(viewer)?;
        let comment = self.find_comment(post_id, comment_id).await?;

        if !can_delete(&comment, viewer) {
            return Err(DomainError::Denied { post_id });
        }

        self.repos.comments.delete(comment_id).await?;
        tracing::info!(%comment_id, %post_id, "comment deleted");
        Ok(comment)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    /// The comment, provided it hangs off `post_id`.
    async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, DomainError> {
        self.repos
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    /// Field rules plus existence of the referenced category and location.
    async fn validate_post(&self, draft: &PostDraft) -> Result<(), DomainError> {
        draft.validate()?;

        let mut errors = Vec::new();
        if let Some(id) = draft.category_id {
            if self.repos.categories.find_by_id(id).await?.is_none() {
                errors.push("category: select a valid choice".to_string());
            }
        }
        if let Some(id) = draft.location_id {
            if self.repos.locations.find_by_id(id).await?.is_none() {
                errors.push("location: select a valid choice".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}
