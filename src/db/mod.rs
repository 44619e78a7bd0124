//! Database module: SQLite-backed key-value store.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for the single `kv` table
//! - `sqlite.rs`: [`SqliteStore`], the persistent [`KeyValueStore`](crate::store::KeyValueStore)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqlitePool, SqliteStore};
