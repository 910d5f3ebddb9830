//! The site's route table.

use std::fmt;

use crate::types::ResourceId;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";

/// Path of the home view.
pub const HOME_PATH: &str = "/";

/// A view of the site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
    Blog,
    BlogPost(ResourceId),
    Contact,
    Login,
    Register,
    Admin,
}

impl Route {
    /// Match a path such as `/blog/12` against the route table.
    ///
    /// A trailing slash and any query string are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .strip_prefix('/')
            .unwrap_or(trimmed)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["projects"] => Some(Route::Projects),
            ["blog"] => Some(Route::Blog),
            ["blog", id] => ResourceId::new(*id).ok().map(Route::BlogPost),
            ["contact"] => Some(Route::Contact),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["admin"] => Some(Route::Admin),
            _ => None,
        }
    }

    /// The canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => HOME_PATH.to_string(),
            Route::Projects => "/projects".to_string(),
            Route::Blog => "/blog".to_string(),
            Route::BlogPost(id) => format!("/blog/{}", id),
            Route::Contact => "/contact".to_string(),
            Route::Login => LOGIN_PATH.to_string(),
            Route::Register => "/register".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }

    /// Restricted views are only rendered for a signed-in user.
    pub fn is_restricted(&self) -> bool {
        matches!(self, Route::Admin)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where to go after a successful login.
///
/// Returns the originally requested view when it is a known route other
/// than the sign-in views themselves, else the home page.
pub fn destination_after_login(from: Option<&str>) -> String {
    match from.and_then(Route::parse) {
        Some(Route::Login | Route::Register) | None => HOME_PATH.to_string(),
        Some(route) => route.path(),
    }
}
