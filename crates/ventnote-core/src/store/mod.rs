//! Durable counter store contract.
//!
//! The scheduler persists two small numbers (remaining sync attempts and the
//! day of the last sync window) through this trait. Getters hand out live
//! streams: the current value first, then every later write, forever.

mod cells;
mod memory;

use futures_util::stream::BoxStream;

use crate::error::StoreResult;

pub(crate) use cells::LiveCells;
pub use memory::MemoryCounterStore;

/// Live stream of a single counter key.
pub type CounterStream<T> = BoxStream<'static, T>;

/// Key-value persistence for integer and long counters.
#[allow(async_fn_in_trait)]
pub trait CounterStore {
    /// Persist an integer under `key`.
    async fn set_int(&self, key: &str, value: i32) -> StoreResult<()>;

    /// Live stream of the integer stored under `key` (0 when never written).
    fn get_int(&self, key: &str) -> CounterStream<i32>;

    /// Persist a long under `key`.
    async fn set_long(&self, key: &str, value: i64) -> StoreResult<()>;

    /// Live stream of the long stored under `key` (0 when never written).
    fn get_long(&self, key: &str) -> CounterStream<i64>;
}

impl<S: CounterStore> CounterStore for &S {
    async fn set_int(&self, key: &str, value: i32) -> StoreResult<()> {
        (**self).set_int(key, value).await
    }

    fn get_int(&self, key: &str) -> CounterStream<i32> {
        (**self).get_int(key)
    }

    async fn set_long(&self, key: &str, value: i64) -> StoreResult<()> {
        (**self).set_long(key, value).await
    }

    fn get_long(&self, key: &str) -> CounterStream<i64> {
        (**self).get_long(key)
    }
}
