use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Author;

/// Stored in place of a comment submitted without text.
pub const EMPTY_COMMENT_TEXT: &str = "---Empty---";

/// Comment entity - a reply to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub author_id: Uuid,
    /// Deleting the post deletes the comment.
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub is_published: bool,
}

impl Comment {
    pub fn new(author_id: Uuid, post_id: Uuid, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            author_id,
            post_id,
            created_at: now,
            is_published: true,
        }
    }
}

/// A comment with its author's public identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEntry {
    pub comment: Comment,
    pub author: Author,
}
