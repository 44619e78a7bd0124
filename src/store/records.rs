use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::error::GatehouseError;
use crate::store::KeyValueStore;

/// Read and decode the JSON value under `key`.
/// A value that fails to decode is reported as [`GatehouseError::CorruptRecord`].
pub async fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, GatehouseError>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| {
            warn!(key, error = %source, "stored record failed to decode");
            GatehouseError::CorruptRecord {
                key: key.to_string(),
                source,
            }
        })
}

pub async fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), GatehouseError>
where
    T: Serialize,
    S: KeyValueStore,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
