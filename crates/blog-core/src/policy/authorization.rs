//! Authorship checks gating edits and deletions.
//!
//! Only the author of a post or comment may change or remove it. There are
//! no roles and no moderator override.

use uuid::Uuid;

use crate::domain::{Comment, Post, Viewer};
use crate::error::DomainError;

/// Content owned by a single user.
pub trait Authored {
    fn author_id(&self) -> Uuid;
}

impl Authored for Post {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

impl Authored for Comment {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

pub fn can_modify<E: Authored + ?Sized>(entity: &E, viewer: &Viewer) -> bool {
    viewer.is(entity.author_id())
}

pub fn can_delete<E: Authored + ?Sized>(entity: &E, viewer: &Viewer) -> bool {
    viewer.is(entity.author_id())
}

/// Mutations are refused to anonymous viewers before anything is looked up.
pub fn require_authenticated(viewer: &Viewer) -> Result<Uuid, DomainError> {
    viewer.user_id().ok_or(DomainError::AuthenticationRequired)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_only_author_may_change_comment() {
        let author = Uuid::new_v4();
        let comment = Comment::new(author, Uuid::new_v4(), "hi".into(), Utc::now());

        assert!(can_modify(&comment, &Viewer::User(author)));
        assert!(can_delete(&comment, &Viewer::User(author)));
        assert!(!can_modify(&comment, &Viewer::User(Uuid::new_v4())));
        assert!(!can_delete(&comment, &Viewer::User(Uuid::new_v4())));
        assert!(!can_modify(&comment, &Viewer::Anonymous));
        assert!(!can_delete(&comment, &Viewer::Anonymous));
    }

    #[test]
    fn test_require_authenticated() {
        let id = Uuid::new_v4();
        assert_eq!(require_authenticated(&Viewer::User(id)).unwrap(), id);
        assert!(matches!(
            require_authenticated(&Viewer::Anonymous),
            Err(DomainError::AuthenticationRequired)
        ));
    }
}
