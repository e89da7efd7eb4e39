//! libSQL-backed counter store

use std::path::Path;

use crate::error::StoreResult;
use crate::store::{CounterStore, CounterStream, LiveCells};
use crate::util::unix_millis_now;

use super::Database;

const KIND_INT: &str = "int";
const KIND_LONG: &str = "long";

/// Durable implementation of [`CounterStore`].
///
/// Every stored row is loaded into the live cells on open, so getters never
/// touch the database; writes go to the `counters` table first and are only
/// published to subscribers once the row is committed.
#[derive(Debug)]
pub struct LibSqlCounterStore {
    db: Database,
    ints: LiveCells<i32>,
    longs: LiveCells<i64>,
}

impl LibSqlCounterStore {
    /// Open (or create) the counter database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_database(Database::open(path).await?).await
    }

    /// Open an in-memory counter database (useful for testing)
    pub async fn open_in_memory() -> StoreResult<Self> {
        Self::from_database(Database::open_in_memory().await?).await
    }

    async fn from_database(db: Database) -> StoreResult<Self> {
        let store = Self {
            db,
            ints: LiveCells::default(),
            longs: LiveCells::default(),
        };
        store.load_cells().await?;
        Ok(store)
    }

    async fn load_cells(&self) -> StoreResult<()> {
        let mut rows = self
            .db
            .connection()
            .query("SELECT key, kind, value FROM counters", ())
            .await?;

        while let Some(row) = rows.next().await? {
            let key: String = row.get(0)?;
            let kind: String = row.get(1)?;
            let value: i64 = row.get(2)?;

            match kind.as_str() {
                KIND_INT => match i32::try_from(value) {
                    Ok(value) => self.ints.publish(&key, value),
                    Err(_) => tracing::warn!(key = %key, value, "Ignoring out-of-range int counter"),
                },
                KIND_LONG => self.longs.publish(&key, value),
                other => tracing::warn!(key = %key, kind = other, "Ignoring counter of unknown kind"),
            }
        }

        Ok(())
    }

    async fn write(&self, key: &str, kind: &str, value: i64) -> StoreResult<()> {
        self.db
            .connection()
            .execute(
                "INSERT OR REPLACE INTO counters (key, kind, value, updated_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![key, kind, value, unix_millis_now()],
            )
            .await?;
        tracing::debug!(key, kind, value, "Stored counter");
        Ok(())
    }
}

impl CounterStore for LibSqlCounterStore {
    async fn set_int(&self, key: &str, value: i32) -> StoreResult<()> {
        self.write(key, KIND_INT, i64::from(value)).await?;
        self.ints.publish(key, value);
        Ok(())
    }

    fn get_int(&self, key: &str) -> CounterStream<i32> {
        self.ints.subscribe(key)
    }

    async fn set_long(&self, key: &str, value: i64) -> StoreResult<()> {
        self.write(key, KIND_LONG, value).await?;
        self.longs.publish(key, value);
        Ok(())
    }

    fn get_long(&self, key: &str) -> CounterStream<i64> {
        self.longs.subscribe(key)
    }
}
