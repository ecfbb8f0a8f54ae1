use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Author, Category, Location, PostDraft};

/// Post entity - a publication written by a single author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// Reference to an uploaded image, if any.
    pub image: Option<String>,
    /// May lie in the future; the post stays hidden until then.
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    /// Cleared when the location is deleted.
    pub location_id: Option<Uuid>,
    /// Cleared when the category is deleted.
    pub category_id: Option<Uuid>,
}

impl Post {
    /// Create a new post owned by `author_id` from a submitted draft.
    pub fn new(author_id: Uuid, draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            text: draft.text,
            image: draft.image,
            pub_date: draft.pub_date,
            is_published: draft.is_published,
            created_at: now,
            author_id,
            location_id: draft.location_id,
            category_id: draft.category_id,
        }
    }

    /// Overwrite the editable fields, keeping identity, author and `created_at`.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.text = draft.text;
        self.image = draft.image;
        self.pub_date = draft.pub_date;
        self.is_published = draft.is_published;
        self.location_id = draft.location_id;
        self.category_id = draft.category_id;
    }
}

/// A post joined with the rows it references, as shown in feeds and detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEntry {
    pub post: Post,
    pub author: Author,
    pub category: Option<Category>,
    pub location: Option<Location>,
    /// Number of comments on the post, published or not.
    pub comment_count: u64,
}
