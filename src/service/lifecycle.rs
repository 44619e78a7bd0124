use tracing::{debug, info, warn};

use crate::error::GatehouseError;
use crate::service::notice::{Notice, Notifier, TracingNotifier, announce};
use crate::store::{KeyValueStore, SESSION_ACTIVE, SESSION_KEY, USER_KEY, records};
use crate::types::Account;

/// Registration, login and session handling over an injected store.
///
/// The account is created by [`register`](Self::register) and only read by
/// [`login`](Self::login). Moving it from PENDING to APPROVED is left to
/// [`approval::approve`](crate::service::approval::approve).
pub struct AccountLifecycle<S, N = TracingNotifier> {
    store: S,
    notifier: N,
}

impl<S: KeyValueStore> AccountLifecycle<S> {
    pub fn new(store: S) -> Self {
        Self::with_notifier(store, TracingNotifier)
    }
}

impl<S: KeyValueStore, N: Notifier> AccountLifecycle<S, N> {
    pub fn with_notifier(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a fresh PENDING account, replacing whatever was stored before.
    pub async fn register(&self) -> Result<Account, GatehouseError> {
        let account = Account::pending();
        records::save_json(&self.store, USER_KEY, &account).await?;
        info!(status = %account.status, "account registered");
        self.notifier.notify(Notice::RegistrationPending);
        Ok(account)
    }

    /// Establish a session if the stored account is approved.
    pub async fn login(&self) -> Result<(), GatehouseError> {
        let Some(account) = self.account().await? else {
            warn!("login attempted without an account");
            return self.fail(GatehouseError::AccountNotFound);
        };

        if !account.status.is_approved() {
            warn!(status = %account.status, "login rejected");
            return self.fail(GatehouseError::NotApproved);
        }

        self.store.set(SESSION_KEY, SESSION_ACTIVE).await?;
        info!("session established");
        self.notifier.notify(Notice::LoggedIn);
        Ok(())
    }

    /// Clear the session flag. The account is untouched.
    pub async fn logout(&self) -> Result<(), GatehouseError> {
        self.store.remove(SESSION_KEY).await?;
        info!("session cleared");
        self.notifier.notify(Notice::LoggedOut);
        Ok(())
    }

    /// Any non-empty session flag counts as logged in.
    pub async fn is_authenticated(&self) -> Result<bool, GatehouseError> {
        let flag = self.store.get(SESSION_KEY).await?;
        Ok(flag.is_some_and(|v| !v.is_empty()))
    }

    /// Gate for protected content: `Unauthenticated` means send the user away.
    pub async fn guard(&self) -> Result<(), GatehouseError> {
        if self.is_authenticated().await? {
            return Ok(());
        }
        debug!("guard rejected unauthenticated access");
        self.fail(GatehouseError::Unauthenticated)
    }

    pub async fn account(&self) -> Result<Option<Account>, GatehouseError> {
        records::load_json(&self.store, USER_KEY).await
    }

    fn fail(&self, err: GatehouseError) -> Result<(), GatehouseError> {
        announce(&self.notifier, &err);
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::approval;
    use crate::service::notice::RecordingNotifier;
    use crate::store::MemoryStore;
    use crate::types::AccountStatus;

    #[tokio::test]
    async fn register_notifies_pending() {
        let store = MemoryStore::new();
        let notices = RecordingNotifier::new();
        let lifecycle = AccountLifecycle::with_notifier(&store, &notices);

        let account = lifecycle.register().await.unwrap();
        assert_eq!(account.status, AccountStatus::Pending);
        assert_eq!(notices.notices(), vec![Notice::RegistrationPending]);
    }

    #[tokio::test]
    async fn failed_logins_notify_and_leave_no_session() {
        let store = MemoryStore::new();
        let notices = RecordingNotifier::new();
        let lifecycle = AccountLifecycle::with_notifier(&store, &notices);

        let err = lifecycle.login().await.unwrap_err();
        assert!(matches!(err, GatehouseError::AccountNotFound));
        assert_eq!(notices.last(), Some(Notice::RegisterFirst));

        lifecycle.register().await.unwrap();
        let err = lifecycle.login().await.unwrap_err();
        assert!(matches!(err, GatehouseError::NotApproved));
        assert_eq!(notices.last(), Some(Notice::AwaitingApproval));

        assert_eq!(store.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn login_does_not_mutate_account() {
        let store = MemoryStore::new();
        let lifecycle = AccountLifecycle::new(&store);
        lifecycle.register().await.unwrap();
        approval::approve(&store).await.unwrap();

        let before = store.get(USER_KEY).await.unwrap();
        lifecycle.login().await.unwrap();
        assert_eq!(store.get(USER_KEY).await.unwrap(), before);
    }

    #[tokio::test]
    async fn empty_session_flag_is_not_authenticated() {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, "").await.unwrap();
        let lifecycle = AccountLifecycle::new(&store);
        assert!(!lifecycle.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn logout_keeps_account() {
        let store = MemoryStore::new();
        let notices = RecordingNotifier::new();
        let lifecycle = AccountLifecycle::with_notifier(&store, &notices);
        lifecycle.register().await.unwrap();
        approval::approve(&store).await.unwrap();
        lifecycle.login().await.unwrap();

        lifecycle.logout().await.unwrap();
        lifecycle.logout().await.unwrap();

        assert!(!lifecycle.is_authenticated().await.unwrap());
        assert_eq!(
            lifecycle.account().await.unwrap().map(|a| a.status),
            Some(AccountStatus::Approved)
        );
        let err = lifecycle.guard().await.unwrap_err();
        assert!(matches!(err, GatehouseError::Unauthenticated));
        assert_eq!(notices.last(), Some(Notice::LoginRequired));
    }
}
