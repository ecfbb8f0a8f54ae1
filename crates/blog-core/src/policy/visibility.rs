//! Publication rules for posts and categories.
//!
//! A post is public only when it is published, filed under a published
//! category, and its publication date has been reached. Its author sees it
//! regardless, which is how drafts and scheduled posts get previewed.

use chrono::{DateTime, Utc};

use crate::domain::{Category, Post, PostEntry, Viewer};

/// A category lists its posts only while published.
pub fn category_is_open(category: &Category) -> bool {
    category.is_published
}

/// Visibility to somebody who is not the author.
///
/// `category` must be the row `post.category_id` points to; any other
/// category is treated as missing.
pub fn is_public(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    let category = category.filter(|c| post.category_id == Some(c.id));

    post.is_published && category.is_some_and(category_is_open) && post.pub_date <= now
}

/// Whether `viewer` may see `post` at `now`.
pub fn is_visible(
    post: &Post,
    category: Option<&Category>,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> bool {
    viewer.is(post.author_id) || is_public(post, category, now)
}

impl PostEntry {
    pub fn is_visible_to(&self, viewer: &Viewer, now: DateTime<Utc>) -> bool {
        is_visible(&self.post, self.category.as_ref(), viewer, now)
    }
}
