//! Remote snapshot transfer capability.
//!
//! The backup workflow only knows how to ask for an upload or a download and
//! wait for the single outcome; the transport behind it is injected.

mod folder;

use std::fmt;

use futures_util::stream::BoxStream;
use thiserror::Error;

pub use folder::FolderDrive;

#[derive(Debug, Error)]
pub enum TransferError {
    /// Failure reported by the remote side, displayed verbatim.
    #[error("{0}")]
    Remote(String),
    #[error("Invalid drive credential: {0}")]
    InvalidCredential(String),
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Remote transfer produced no outcome")]
    NoOutcome,
}

pub type TransferResult<T> = Result<T, TransferError>;

/// Outcome of one upload or download.
pub type SyncOutcome = TransferResult<()>;

/// Lazy stream carrying the single outcome of a transfer.
pub type TransferStream = BoxStream<'static, SyncOutcome>;

/// Credential handed to the remote drive for one transfer.
#[derive(Clone, PartialEq, Eq)]
pub struct DriveCredential {
    pub account: String,
    pub access_token: String,
}

impl DriveCredential {
    pub fn new(account: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for DriveCredential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DriveCredential")
            .field("account", &self.account)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Upload/download of the local database snapshot.
///
/// Each call returns a lazy stream that yields exactly one outcome once it is
/// polled. Retry and timeout policy belong to the implementation.
pub trait RemoteTransfer {
    fn upload_snapshot(&self, credential: &DriveCredential) -> TransferStream;

    fn download_snapshot(&self, credential: &DriveCredential) -> TransferStream;
}
