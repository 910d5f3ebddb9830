//! Portfolio, blog and contact endpoints.
//!
//! These are consumers of the session: every request goes out through the
//! session's client and so carries its token, and a rejected token on any
//! of them ends the session.

mod api;
mod models;

pub use api::ContentApi;
pub use models::{
    Author, BlogPost, Comment, ContactMessage, PostInput, Project, ProjectInput,
};
