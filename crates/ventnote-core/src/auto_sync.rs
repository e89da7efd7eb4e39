//! Budgeted background sync.
//!
//! Opens a new window when due, refuses to touch the remote once the window's
//! attempts are spent, and charges one attempt per transfer whatever its
//! outcome.

use crate::controller::BackupController;
use crate::error::StoreResult;
use crate::scheduler::SyncScheduler;
use crate::session::SignOut;
use crate::store::CounterStore;
use crate::transfer::{DriveCredential, RemoteTransfer, TransferError};

#[derive(Debug)]
pub enum AutoSyncOutcome {
    Synced { remaining: i32 },
    Failed { error: TransferError, remaining: i32 },
    /// No attempts left in the current window; the remote was not called.
    Exhausted { window_started_at: i64 },
}

pub struct AutoSync<'a, S, R, A> {
    scheduler: &'a SyncScheduler<S>,
    controller: &'a BackupController<R, A>,
    max_attempts: i32,
}

impl<'a, S, R, A> AutoSync<'a, S, R, A>
where
    S: CounterStore,
    R: RemoteTransfer,
    A: SignOut,
{
    pub const fn new(
        scheduler: &'a SyncScheduler<S>,
        controller: &'a BackupController<R, A>,
        max_attempts: i32,
    ) -> Self {
        Self {
            scheduler,
            controller,
            max_attempts,
        }
    }

    pub async fn run(&self, credential: &DriveCredential, now: i64) -> StoreResult<AutoSyncOutcome> {
        let before = self.scheduler.state().await?;
        self.scheduler
            .set_saved_day(before.last_sync_day_millis, now, self.max_attempts)
            .await?;

        let current = self.scheduler.state().await?;
        if current.attempt_count <= 0 {
            tracing::info!(
                window_started_at = current.last_sync_day_millis,
                "Sync attempts exhausted for this window"
            );
            return Ok(AutoSyncOutcome::Exhausted {
                window_started_at: current.last_sync_day_millis,
            });
        }

        let outcome = self.controller.sync_db(credential).await;
        let remaining = current.attempt_count - 1;
        self.scheduler.set_max_sync_attempt(remaining).await?;

        Ok(match outcome {
            Ok(()) => AutoSyncOutcome::Synced { remaining },
            Err(error) => AutoSyncOutcome::Failed { error, remaining },
        })
    }
}
