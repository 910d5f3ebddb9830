//! In-process token store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;
use crate::auth::Token;

use super::TokenStore;

/// A token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    pub fn with_token(token: Token) -> Self {
        Self {
            slot: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, token: &Token) -> Result<()> {
        *self.slot.write().await = Some(token.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Token>> {
        Ok(self.slot.read().await.clone())
    }

    async fn clear(&self) -> Result<()> {
        self.slot.write().await.take();
        Ok(())
    }
}
