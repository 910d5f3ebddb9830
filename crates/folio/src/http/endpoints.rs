//! API endpoint paths and request/response types.

use serde::{Deserialize, Serialize};

use crate::types::{ResourceId, User};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST: exchange email and password for a token.
pub const LOGIN: &str = "/api/users/login";

/// POST: create an account; answers like [`LOGIN`].
pub const REGISTER: &str = "/api/users/register";

/// GET: the user behind the current token.
pub const ME: &str = "/api/users/me";

/// Project collection.
pub const PROJECTS: &str = "/api/projects";

/// Blog post collection.
pub const BLOG: &str = "/api/blog";

/// POST: contact form.
pub const CONTACT: &str = "/api/contact";

/// Path of one project.
pub fn project(id: &ResourceId) -> String {
    format!("{}/{}", PROJECTS, id)
}

/// Path of one blog post.
pub fn post(id: &ResourceId) -> String {
    format!("{}/{}", BLOG, id)
}

/// Path of a post's comment collection.
pub fn comments(post_id: &ResourceId) -> String {
    format!("{}/{}/comments", BLOG, post_id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for registration.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from login and registration.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Error body returned alongside a non-2xx status.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
