//! Backup workflow and session controller.
//!
//! Upload and download always settle into a [`SyncOutcome`] value. Logout is
//! different: a failing sign-out is forwarded unchanged to the caller and the
//! account stays published. Callers handle the two shapes separately.

use futures_util::StreamExt;

use crate::session::{SessionAccount, SessionResult, SignOut};
use crate::state::BackupState;
use crate::transfer::{DriveCredential, RemoteTransfer, SyncOutcome, TransferError, TransferStream};

pub struct BackupController<R, A> {
    remote: R,
    auth: A,
    state: BackupState,
}

impl<R: RemoteTransfer, A: SignOut> BackupController<R, A> {
    pub fn new(remote: R, auth: A) -> Self {
        Self::with_state(remote, auth, BackupState::new())
    }

    /// Build a controller publishing into an existing `state`.
    pub const fn with_state(remote: R, auth: A, state: BackupState) -> Self {
        Self {
            remote,
            auth,
            state,
        }
    }

    pub const fn state(&self) -> &BackupState {
        &self.state
    }

    pub const fn remote(&self) -> &R {
        &self.remote
    }

    pub fn sign_in(&self, account: SessionAccount) {
        self.state.sign_in(account);
    }

    /// Upload the local snapshot.
    pub async fn backup_db(&self, credential: &DriveCredential) -> SyncOutcome {
        let _loading = self.state.begin_loading();
        let outcome = first_outcome(self.remote.upload_snapshot(credential)).await;
        log_outcome("backup", &outcome);
        outcome
    }

    /// Replace the local snapshot with the remote copy.
    pub async fn sync_db(&self, credential: &DriveCredential) -> SyncOutcome {
        let _loading = self.state.begin_loading();
        let outcome = first_outcome(self.remote.download_snapshot(credential)).await;
        log_outcome("sync", &outcome);
        outcome
    }

    /// Sign out of the remote account and clear the published identity.
    pub async fn logout(&self) -> SessionResult<()> {
        let loading = self.state.begin_loading();
        self.auth.sign_out().await?;
        self.state.clear_account();
        drop(loading);
        tracing::info!("Signed out of remote drive");
        Ok(())
    }
}

async fn first_outcome(mut stream: TransferStream) -> SyncOutcome {
    stream.next().await.unwrap_or(Err(TransferError::NoOutcome))
}

fn log_outcome(operation: &str, outcome: &SyncOutcome) {
    match outcome {
        Ok(()) => tracing::info!(operation, "Snapshot transfer completed"),
        Err(error) => tracing::warn!(operation, %error, "Snapshot transfer failed"),
    }
}
