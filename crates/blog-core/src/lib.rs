//! # Blog Core
//!
//! The domain layer of the blog.
//! Entities, the visibility and authorization policies, pagination and the
//! services composing them. Storage and authentication are reached only
//! through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod ports;
pub mod services;

pub use domain::Viewer;
pub use error::DomainError;
