use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - groups posts under a URL slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    /// Unique; latin letters, digits, `-` and `_` only.
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Unpublished categories hide every post filed under them.
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new, published category.
    pub fn new(slug: String, title: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug,
            title,
            description,
            is_published: true,
            created_at: Utc::now(),
        }
    }

    /// Whether `slug` only uses the characters allowed in a category URL.
    pub fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && slug.len() <= 64
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}
