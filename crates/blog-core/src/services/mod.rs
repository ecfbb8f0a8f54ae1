//! Services composing the policies with the entity stores.
//!
//! Each service is a plain value built from [`Repositories`]; request
//! handlers receive one and call it, passing the viewer and the current
//! time explicitly.
//!
//! [`Repositories`]: crate::ports::Repositories

mod account;
mod authoring;
mod content;

pub use account::AccountService;
pub use authoring::AuthoringService;
pub use content::{Access, ContentService, Feed, FeedContext, FeedKind, PostDetail, detail_access};
