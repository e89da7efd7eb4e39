//! Signed-in account identity and the sign-out capability.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transfer::DriveCredential;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Failure reported by the remote sign-out, displayed verbatim.
    #[error("{0}")]
    SignOut(String),
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse session: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Identity of the signed-in remote account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAccount {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }
}

/// Remote sign-out.
///
/// Errors are returned as-is; the session controller forwards them to its
/// caller without wrapping.
#[allow(async_fn_in_trait)]
pub trait SignOut {
    async fn sign_out(&self) -> SessionResult<()>;
}

/// Account plus the token needed to talk to the drive.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub account: SessionAccount,
    pub access_token: String,
}

impl StoredSession {
    pub fn credential(&self) -> DriveCredential {
        DriveCredential::new(self.account.name.clone(), self.access_token.clone())
    }
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StoredSession")
            .field("account", &self.account)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Session persisted as a JSON file; signing out deletes the file.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> SessionResult<Option<StoredSession>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    pub fn save(&self, session: &StoredSession) -> SessionResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl SignOut for FileSession {
    async fn sign_out(&self) -> SessionResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionError::SignOut(format!(
                "Failed to Logout: {error}"
            ))),
        }
    }
}
