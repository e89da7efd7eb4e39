//! ventnote-core - Core library for VentNote backups
//!
//! This crate holds the sync window scheduler, the durable counter store it
//! persists into, and the backup/session controller that wraps the remote
//! drive. The CLI and app shells only wire concrete collaborators into it.

pub mod auto_sync;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod store;
pub mod transfer;
pub mod util;

#[cfg(test)]
mod testing;

pub use auto_sync::{AutoSync, AutoSyncOutcome};
pub use controller::BackupController;
pub use error::{StoreError, StoreResult};
pub use scheduler::{SyncCounterState, SyncScheduler};
pub use session::{SessionAccount, SessionError, SignOut};
pub use state::BackupState;
pub use store::{CounterStore, MemoryCounterStore};
pub use transfer::{DriveCredential, RemoteTransfer, SyncOutcome, TransferError};
