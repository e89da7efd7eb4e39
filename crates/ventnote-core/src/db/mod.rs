//! Database layer for VentNote backup state

mod connection;
mod counter_repository;
mod migrations;

pub use connection::Database;
pub use counter_repository::LibSqlCounterStore;
