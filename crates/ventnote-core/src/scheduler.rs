//! Sync attempt scheduling.
//!
//! Background sync is allowed a fixed number of attempts per one-hour window.
//! The window start ("saved day") and the remaining attempt budget are kept in
//! a [`CounterStore`] so the schedule survives restarts.

use futures_util::StreamExt;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::store::{CounterStore, CounterStream};

/// Length of a sync window in milliseconds.
pub const SYNC_WINDOW_MILLIS: i64 = 60 * 60 * 1000;

/// Store key holding the remaining attempt count.
pub const MAX_SYNC_ATTEMPT_KEY: &str = "maxSyncAttemptKey";

/// Store key holding the start of the current sync window (Unix ms).
pub const SAVED_DAY_KEY: &str = "savedDay";

/// Snapshot of the persisted scheduling counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncCounterState {
    pub last_sync_day_millis: i64,
    pub attempt_count: i32,
}

/// Returns `true` when a sync at `now` starts a new window.
///
/// A zero `previous_day` means no window was ever recorded. A clock that moved
/// backwards never opens a window.
pub const fn opens_new_window(previous_day: i64, now: i64) -> bool {
    previous_day == 0 || now.saturating_sub(previous_day) > SYNC_WINDOW_MILLIS
}

/// Decides when a new attempt window opens and keeps its bookkeeping.
#[derive(Debug)]
pub struct SyncScheduler<S> {
    store: S,
}

impl<S: CounterStore> SyncScheduler<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Start a new window at `now` with `max_attempts` when the previous one
    /// has expired.
    ///
    /// The day is written before the count. If the count write fails the new
    /// day stays persisted; nothing is rolled back.
    pub async fn set_saved_day(
        &self,
        previous_day: i64,
        now: i64,
        max_attempts: i32,
    ) -> StoreResult<()> {
        validate_attempts(max_attempts)?;

        if !opens_new_window(previous_day, now) {
            tracing::debug!(previous_day, now, "Sync window still open");
            return Ok(());
        }

        self.store.set_long(SAVED_DAY_KEY, now).await?;
        self.store.set_int(MAX_SYNC_ATTEMPT_KEY, max_attempts).await?;
        tracing::debug!(now, max_attempts, "Opened new sync window");
        Ok(())
    }

    /// Overwrite the remaining attempt count.
    pub async fn set_max_sync_attempt(&self, value: i32) -> StoreResult<()> {
        validate_attempts(value)?;
        self.store.set_int(MAX_SYNC_ATTEMPT_KEY, value).await
    }

    /// Live stream of the remaining attempt count.
    pub fn attempt_count(&self) -> CounterStream<i32> {
        self.store.get_int(MAX_SYNC_ATTEMPT_KEY)
    }

    /// Live stream of the current window start.
    pub fn last_sync_day(&self) -> CounterStream<i64> {
        self.store.get_long(SAVED_DAY_KEY)
    }

    /// Current value of both counters.
    pub async fn state(&self) -> StoreResult<SyncCounterState> {
        let last_sync_day_millis = self
            .last_sync_day()
            .next()
            .await
            .ok_or_else(|| closed_stream(SAVED_DAY_KEY))?;
        let attempt_count = self
            .attempt_count()
            .next()
            .await
            .ok_or_else(|| closed_stream(MAX_SYNC_ATTEMPT_KEY))?;

        Ok(SyncCounterState {
            last_sync_day_millis,
            attempt_count,
        })
    }
}

fn validate_attempts(value: i32) -> StoreResult<()> {
    if value < 0 {
        return Err(StoreError::InvalidInput(format!(
            "attempt count must not be negative (got {value})"
        )));
    }
    Ok(())
}

fn closed_stream(key: &str) -> StoreError {
    StoreError::Database(format!("counter stream for '{key}' ended"))
}
