//! Who may see what, and who may change it.

pub mod authorization;
pub mod visibility;

pub use authorization::{Authored, can_delete, can_modify, require_authenticated};
pub use visibility::{category_is_open, is_public, is_visible};
