//! Key-value storage seam.
//!
//! Everything the lifecycle persists goes through [`KeyValueStore`]: string
//! keys mapping to JSON-encoded string values, the same shape as browser
//! local storage.
//!
//! Layout:
//! - `memory.rs`: process-local map, used by tests
//! - `records.rs`: typed JSON read/write helpers over any store
//! - SQLite-backed store lives in `crate::db`

pub mod memory;
pub mod records;

pub use memory::MemoryStore;

use crate::error::GatehouseError;

/// The account record.
pub const USER_KEY: &str = "user";
/// Session flag; present with value [`SESSION_ACTIVE`] while logged in.
pub const SESSION_KEY: &str = "isLoggedIn";
pub const SESSION_ACTIVE: &str = "true";
/// Admin feature flags.
pub const ADMIN_SETTINGS_KEY: &str = "adminSettings";

#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, GatehouseError>;

    /// Overwrites any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<(), GatehouseError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), GatehouseError>;
}

impl<S: KeyValueStore> KeyValueStore for &S {
    async fn get(&self, key: &str) -> Result<Option<String>, GatehouseError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), GatehouseError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), GatehouseError> {
        (**self).remove(key).await
    }
}
