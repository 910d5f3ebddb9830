//! Persistent storage for the bearer token.
//!
//! A [`TokenStore`] is a single key-value slot that survives restarts. It
//! holds at most one token; absence means nobody is signed in. The store
//! owns durability only: deciding when to save or clear is the session
//! manager's job.

mod file;
mod memory;

use async_trait::async_trait;

use crate::Result;
use crate::auth::Token;

pub use file::{FileTokenStore, TOKEN_KEY};
pub use memory::MemoryTokenStore;

/// A persistent slot holding the current bearer token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Write `token`, replacing any previous value.
    async fn save(&self, token: &Token) -> Result<()>;

    /// Read the persisted token, if any.
    async fn load(&self) -> Result<Option<Token>>;

    /// Remove the persisted token. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
}
