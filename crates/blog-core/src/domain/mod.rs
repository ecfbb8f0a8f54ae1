//! Domain entities - the core business objects.

mod category;
mod comment;
mod draft;
mod location;
mod post;
mod user;
mod viewer;

pub use category::Category;
pub use comment::{Comment, CommentEntry, EMPTY_COMMENT_TEXT};
pub use draft::{CommentDraft, PostDraft, ProfileDraft, RegistrationDraft};
pub use location::Location;
pub use post::{Post, PostEntry};
pub use user::{Author, User};
pub use viewer::Viewer;
