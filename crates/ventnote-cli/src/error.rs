use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] ventnote_core::StoreError),
    #[error(transparent)]
    Transfer(#[from] ventnote_core::TransferError),
    #[error(transparent)]
    Session(#[from] ventnote_core::SessionError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Account name cannot be empty")]
    EmptyAccount,
    #[error("Access token cannot be empty")]
    EmptyToken,
    #[error("Not signed in. Run `ventnote login --account NAME --token TOKEN` first.")]
    NotSignedIn,
}
