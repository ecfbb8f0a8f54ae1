//! # Blog Shared
//!
//! Wire types exchanged by the HTTP API and its clients.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, RedirectResponse};
