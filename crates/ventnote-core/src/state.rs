//! Observable backup state shared with UI/CLI observers.
//!
//! Both values are single-writer `watch` channels: only the backup controller
//! writes them, and a late subscriber always sees the latest value.

use tokio::sync::watch;

use crate::session::SessionAccount;

#[derive(Debug)]
pub struct BackupState {
    loading: watch::Sender<bool>,
    account: watch::Sender<Option<SessionAccount>>,
}

impl Default for BackupState {
    fn default() -> Self {
        Self::new()
    }
}

impl BackupState {
    pub fn new() -> Self {
        let (loading, _) = watch::channel(false);
        let (account, _) = watch::channel(None);
        Self { loading, account }
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn account(&self) -> Option<SessionAccount> {
        self.account.borrow().clone()
    }

    pub fn subscribe_account(&self) -> watch::Receiver<Option<SessionAccount>> {
        self.account.subscribe()
    }

    /// Publish the account after an external sign-in.
    pub fn sign_in(&self, account: SessionAccount) {
        tracing::debug!(account = %account.name, "Account signed in");
        self.account.send_replace(Some(account));
    }

    pub(crate) fn clear_account(&self) {
        self.account.send_replace(None);
    }

    /// Raise the loading flag until the returned guard is dropped.
    pub(crate) fn begin_loading(&self) -> LoadingGuard<'_> {
        self.loading.send_replace(true);
        LoadingGuard { state: self }
    }
}

/// Lowers the loading flag on drop, including early returns and unwinding.
#[must_use = "loading is cleared as soon as the guard is dropped"]
pub(crate) struct LoadingGuard<'a> {
    state: &'a BackupState,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.loading.send_replace(false);
    }
}
