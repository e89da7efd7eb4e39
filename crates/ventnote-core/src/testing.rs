//! Test doubles for the store, remote transfer and sign-out seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;

use crate::error::{StoreError, StoreResult};
use crate::session::{SessionError, SessionResult, SignOut};
use crate::store::{CounterStore, CounterStream, MemoryCounterStore};
use crate::transfer::{DriveCredential, RemoteTransfer, TransferError, TransferStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Int(String, i32),
    Long(String, i64),
}

#[derive(Debug, Clone, Copy)]
pub enum FailingKey {
    Int(&'static str),
    Long(&'static str),
}

/// Memory store that records every write and can reject one key.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryCounterStore,
    failing: Option<FailingKey>,
    attempted: Mutex<Vec<StoreWrite>>,
    writes: Mutex<Vec<StoreWrite>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(key: FailingKey) -> Self {
        Self {
            failing: Some(key),
            ..Self::default()
        }
    }

    /// Writes that were persisted.
    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }

    /// Every write that was requested, including rejected ones.
    pub fn attempted(&self) -> Vec<StoreWrite> {
        self.attempted.lock().unwrap().clone()
    }

    fn check(&self, write: &StoreWrite) -> StoreResult<()> {
        self.attempted.lock().unwrap().push(write.clone());
        let rejected = match (self.failing, write) {
            (Some(FailingKey::Int(failing)), StoreWrite::Int(key, _))
            | (Some(FailingKey::Long(failing)), StoreWrite::Long(key, _)) => failing == key,
            _ => false,
        };
        if rejected {
            return Err(StoreError::Database("write rejected".to_string()));
        }
        self.writes.lock().unwrap().push(write.clone());
        Ok(())
    }
}

impl CounterStore for RecordingStore {
    async fn set_int(&self, key: &str, value: i32) -> StoreResult<()> {
        self.check(&StoreWrite::Int(key.to_string(), value))?;
        self.inner.set_int(key, value).await
    }

    fn get_int(&self, key: &str) -> CounterStream<i32> {
        self.inner.get_int(key)
    }

    async fn set_long(&self, key: &str, value: i64) -> StoreResult<()> {
        self.check(&StoreWrite::Long(key.to_string(), value))?;
        self.inner.set_long(key, value).await
    }

    fn get_long(&self, key: &str) -> CounterStream<i64> {
        self.inner.get_long(key)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TransferScript {
    Succeed,
    Fail(&'static str),
    Empty,
    Panic,
}

/// Remote transfer returning scripted outcomes.
///
/// Records the loading flag when called and again when its stream is polled.
pub struct ScriptedTransfer {
    upload: TransferScript,
    download: TransferScript,
    loading: watch::Receiver<bool>,
    upload_calls: AtomicUsize,
    download_calls: AtomicUsize,
    loading_seen: Arc<Mutex<Vec<bool>>>,
    last_account: Mutex<Option<String>>,
}

impl ScriptedTransfer {
    pub fn new(
        upload: TransferScript,
        download: TransferScript,
        loading: watch::Receiver<bool>,
    ) -> Self {
        Self {
            upload,
            download,
            loading,
            upload_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            loading_seen: Arc::new(Mutex::new(Vec::new())),
            last_account: Mutex::new(None),
        }
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.lock().unwrap().clone()
    }

    pub fn last_account(&self) -> Option<String> {
        self.last_account.lock().unwrap().clone()
    }

    fn run(
        &self,
        script: TransferScript,
        calls: &AtomicUsize,
        credential: &DriveCredential,
    ) -> TransferStream {
        calls.fetch_add(1, Ordering::SeqCst);
        *self.last_account.lock().unwrap() = Some(credential.account.clone());
        let loading_now = *self.loading.borrow();
        self.loading_seen.lock().unwrap().push(loading_now);

        match script {
            TransferScript::Panic => panic!("remote transfer crashed"),
            TransferScript::Empty => stream::empty().boxed(),
            TransferScript::Succeed | TransferScript::Fail(_) => {
                let loading = self.loading.clone();
                let seen = Arc::clone(&self.loading_seen);
                stream::once(async move {
                    let loading_now = *loading.borrow();
                    seen.lock().unwrap().push(loading_now);
                    match script {
                        TransferScript::Fail(message) => {
                            Err(TransferError::Remote(message.to_string()))
                        }
                        _ => Ok(()),
                    }
                })
                .boxed()
            }
        }
    }
}

impl RemoteTransfer for ScriptedTransfer {
    fn upload_snapshot(&self, credential: &DriveCredential) -> TransferStream {
        self.run(self.upload, &self.upload_calls, credential)
    }

    fn download_snapshot(&self, credential: &DriveCredential) -> TransferStream {
        self.run(self.download, &self.download_calls, credential)
    }
}

/// Sign-out capability with a scripted result.
pub struct ScriptedSignOut {
    failure: Option<&'static str>,
    calls: AtomicUsize,
    loading: Option<watch::Receiver<bool>>,
    loading_seen: Mutex<Vec<bool>>,
}

impl ScriptedSignOut {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            calls: AtomicUsize::new(0),
            loading: None,
            loading_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            failure: Some(message),
            ..Self::succeeding()
        }
    }

    pub fn observing(mut self, loading: watch::Receiver<bool>) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.lock().unwrap().clone()
    }
}

impl SignOut for ScriptedSignOut {
    async fn sign_out(&self) -> SessionResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(loading) = &self.loading {
            let loading_now = *loading.borrow();
            self.loading_seen.lock().unwrap().push(loading_now);
        }
        match self.failure {
            Some(message) => Err(SessionError::SignOut(message.to_string())),
            None => Ok(()),
        }
    }
}
