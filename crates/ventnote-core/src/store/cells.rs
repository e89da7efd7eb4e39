use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::CounterStream;

/// Per-key `watch` channels backing the live counter streams.
///
/// Every key owns one sender for the lifetime of the store, so streams handed
/// out by [`LiveCells::subscribe`] only end when the store itself is dropped.
#[derive(Debug)]
pub(crate) struct LiveCells<T> {
    cells: Mutex<HashMap<String, watch::Sender<T>>>,
}

impl<T> Default for LiveCells<T> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> LiveCells<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Replace the value for `key` and wake every subscriber.
    pub(crate) fn publish(&self, key: &str, value: T) {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sender) = cells.get(key) {
            sender.send_replace(value);
        } else {
            let (sender, _) = watch::channel(value);
            cells.insert(key.to_string(), sender);
        }
    }

    pub(crate) fn subscribe(&self, key: &str) -> CounterStream<T> {
        let receiver = {
            let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
            cells
                .entry(key.to_string())
                .or_insert_with(|| watch::channel(T::default()).0)
                .subscribe()
        };
        WatchStream::new(receiver).boxed()
    }

    pub(crate) fn current(&self, key: &str) -> Option<T> {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.get(key).map(|sender| sender.borrow().clone())
    }
}
