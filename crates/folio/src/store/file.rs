//! File-backed token store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Result;
use crate::auth::Token;
use crate::error::StorageError;

use super::TokenStore;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Name of the slot the token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Default file name inside the data directory.
const TOKEN_FILE: &str = "token.json";

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

/// A token store backed by a small JSON file.
///
/// The file is written with owner-only permissions on Unix. A file that
/// cannot be parsed is treated as an empty slot.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the token in the platform data directory for folio.
    pub fn in_data_dir() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "folio").ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join(TOKEN_FILE)))
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &'static str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            action,
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("failed to create", e))?;
        }

        let stored = StoredToken {
            token: token.as_str().to_string(),
            saved_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(StorageError::from)?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error("failed to write", e))?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, perms)
                .await
                .map_err(|e| self.io_error("failed to restrict", e))?;
        }

        debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Token>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error("failed to read", e).into()),
        };

        match serde_json::from_str::<StoredToken>(&json) {
            Ok(stored) => Ok(Token::new(stored.token)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable token file");
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "token cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error("failed to remove", e).into()),
        }
    }
}
