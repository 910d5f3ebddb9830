//! folio - session client for a portfolio and blog API
//!
//! This library signs users in against the folio HTTP API, keeps their
//! bearer token across restarts, and decides whether restricted views may be
//! shown. All authenticated traffic flows through one [`SessionManager`].
//!
//! # Example
//!
//! ```no_run
//! use folio::{Config, ContentApi, Credentials, SessionManager};
//! use folio::guard::{GuardDecision, RouteGuard};
//!
//! # async fn example() -> Result<(), folio::Error> {
//! let session = SessionManager::from_config(&Config::from_env()?)?;
//! session.initialize().await;
//!
//! let mut admin = RouteGuard::new(session.subscribe(), "/admin");
//! if let GuardDecision::Redirect { .. } = admin.settled().await {
//!     session.login(Credentials::new("a@b.com", "secret1")).await?;
//! }
//!
//! for project in ContentApi::new(&session).list_projects().await? {
//!     println!("{}: {}", project.id, project.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod guard;
pub mod http;
pub mod routes;
pub mod session;
pub mod store;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, RegistrationForm, Token};
pub use config::Config;
pub use content::ContentApi;
pub use error::Error;
pub use http::ApiClient;
pub use session::{SessionManager, SessionSnapshot, SessionState};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{ApiUrl, ResourceId, User};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
