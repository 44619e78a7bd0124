use tracing::{info, warn};

use crate::error::GatehouseError;
use crate::store::{ADMIN_SETTINGS_KEY, KeyValueStore, records};
use crate::types::AdminSettings;

/// Stored settings, or the defaults when none were saved.
pub async fn load<S: KeyValueStore>(store: &S) -> Result<AdminSettings, GatehouseError> {
    Ok(records::load_json(store, ADMIN_SETTINGS_KEY)
        .await?
        .unwrap_or_default())
}

pub async fn save<S: KeyValueStore>(
    store: &S,
    settings: &AdminSettings,
) -> Result<(), GatehouseError> {
    records::save_json(store, ADMIN_SETTINGS_KEY, settings).await?;
    info!(
        dashboard = settings.dashboard_enabled,
        upload = settings.upload_enabled,
        insights = settings.insights_enabled,
        max_uploads = settings.max_uploads,
        "admin settings saved"
    );
    Ok(())
}

/// Apply `edit` to the current settings and save the result.
/// A corrupt stored record is replaced, starting from the defaults.
pub async fn update<S, F>(store: &S, edit: F) -> Result<AdminSettings, GatehouseError>
where
    S: KeyValueStore,
    F: FnOnce(&mut AdminSettings),
{
    let mut current = match load(store).await {
        Ok(current) => current,
        Err(GatehouseError::CorruptRecord { .. }) => {
            warn!("replacing corrupt admin settings with defaults");
            AdminSettings::default()
        }
        Err(e) => return Err(e),
    };
    edit(&mut current);
    save(store, &current).await?;
    Ok(current)
}

pub async fn reset<S: KeyValueStore>(store: &S) -> Result<AdminSettings, GatehouseError> {
    let defaults = AdminSettings::default();
    save(store, &defaults).await?;
    Ok(defaults)
}
