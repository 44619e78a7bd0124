//! The administrative side of the account lifecycle.
//!
//! Approval is not reachable through [`AccountLifecycle`](super::AccountLifecycle):
//! it is the external actor that writes `status = APPROVED` into the same
//! storage key the lifecycle reads.

use tracing::{debug, info, warn};

use crate::error::GatehouseError;
use crate::store::{KeyValueStore, USER_KEY, records};
use crate::types::{Account, AccountStatus};

/// Flip the stored account to APPROVED. Already-approved accounts are left as they are.
pub async fn approve<S: KeyValueStore>(store: &S) -> Result<Account, GatehouseError> {
    let Some(mut account) = records::load_json::<Account, _>(store, USER_KEY).await? else {
        warn!("approval requested but no account is registered");
        return Err(GatehouseError::AccountNotFound);
    };

    if account.status.is_approved() {
        debug!("account already approved");
        return Ok(account);
    }

    account.status = AccountStatus::Approved;
    records::save_json(store, USER_KEY, &account).await?;
    info!(status = %account.status, "account approved");
    Ok(account)
}
