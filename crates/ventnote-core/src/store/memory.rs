use crate::error::StoreResult;

use super::{CounterStore, CounterStream, LiveCells};

/// Process-local counter store.
///
/// Values live only as long as the store; useful for tests and for runs that
/// do not need the schedule to survive a restart.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    ints: LiveCells<i32>,
    longs: LiveCells<i64>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    async fn set_int(&self, key: &str, value: i32) -> StoreResult<()> {
        self.ints.publish(key, value);
        Ok(())
    }

    fn get_int(&self, key: &str) -> CounterStream<i32> {
        self.ints.subscribe(key)
    }

    async fn set_long(&self, key: &str, value: i64) -> StoreResult<()> {
        self.longs.publish(key, value);
        Ok(())
    }

    fn get_long(&self, key: &str) -> CounterStream<i64> {
        self.longs.subscribe(key)
    }
}
