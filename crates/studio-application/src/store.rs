//! The store context object.
//!
//! Holds the current [`AppState`], serializes dispatches through the pure
//! reducer, runs the token side effects of `Login`/`Logout`, and publishes
//! every committed state to subscribers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use studio_core::state::{Action, AppState, TokenRepository, reduce};
use tokio::sync::{Mutex, watch};

/// An explicit, injectable store. Several isolated instances may coexist.
pub struct Store {
    state_tx: watch::Sender<Arc<AppState>>,
    tokens: Arc<dyn TokenRepository>,
    /// Number of committed transitions. Only written while the channel's
    /// write lock is held, so it always matches the published state.
    revision: AtomicU64,
    /// Number of commits that flipped `is_authenticated` from false to true.
    /// Written under the same lock as `revision`.
    auth_epoch: AtomicU64,
    dispatch_lock: Mutex<()>,
}

impl Store {
    /// Creates a store from the seed dataset.
    ///
    /// The session starts authenticated when the token slot holds a token.
    pub async fn open(tokens: Arc<dyn TokenRepository>) -> Self {
        let has_token = match tokens.get_token().await {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read token, starting signed out");
                false
            }
        };

        let mut initial = AppState::seed();
        initial.session.is_authenticated = has_token;
        tracing::debug!(authenticated = has_token, "Store opened");

        Self::with_state(initial, tokens)
    }

    /// Creates a store around an explicit initial state.
    pub fn with_state(initial: AppState, tokens: Arc<dyn TokenRepository>) -> Self {
        let (state_tx, _) = watch::channel(Arc::new(initial));
        Self {
            state_tx,
            tokens,
            revision: AtomicU64::new(0),
            auth_epoch: AtomicU64::new(0),
            dispatch_lock: Mutex::new(()),
        }
    }

    /// The latest committed state.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state_tx.borrow())
    }

    /// Receives every committed state. Actions that change nothing do not
    /// notify.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.state_tx.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Counts sign-in edges. Observers that only see the latest state can
    /// compare epochs to detect a sign-in that was followed by other commits.
    pub fn auth_epoch(&self) -> u64 {
        self.auth_epoch.load(Ordering::Acquire)
    }

    /// Applies `action` and returns the committed state.
    ///
    /// The token effect of `Login`/`Logout` runs first, so observers of the
    /// new session already find the token slot updated. Token slot failures
    /// are logged and never block the transition.
    pub async fn dispatch(&self, action: Action) -> Arc<AppState> {
        let _guard = self.dispatch_lock.lock().await;
        self.apply(action).await
    }

    /// Applies `action` only if `guard` accepts the state it would apply to.
    ///
    /// The guard runs under the dispatch lock, so no other dispatch can
    /// commit between the check and the transition. Returns `None` when the
    /// guard refuses.
    pub async fn dispatch_if<F>(&self, action: Action, guard: F) -> Option<Arc<AppState>>
    where
        F: FnOnce(&AppState) -> bool,
    {
        let _guard = self.dispatch_lock.lock().await;
        let current = self.state();
        if !guard(current.as_ref()) {
            tracing::debug!(action = action.kind(), "Action refused by guard");
            return None;
        }
        Some(self.apply(action).await)
    }

    /// Runs the token effect and commits. Callers hold `dispatch_lock`.
    async fn apply(&self, action: Action) -> Arc<AppState> {
        let kind = action.kind();

        match &action {
            Action::Login { token, .. } => {
                if let Err(e) = self.tokens.set_token(token).await {
                    tracing::warn!(error = %e, "Failed to persist token");
                }
            }
            Action::Logout => {
                if let Err(e) = self.tokens.clear_token().await {
                    tracing::warn!(error = %e, "Failed to clear token");
                }
            }
            _ => {}
        }

        let revision = &self.revision;
        let auth_epoch = &self.auth_epoch;
        let changed = self.state_tx.send_if_modified(|current| {
            let next = reduce(current, action);
            if Arc::ptr_eq(&next, current) {
                return false;
            }
            if !current.is_authenticated() && next.is_authenticated() {
                auth_epoch.fetch_add(1, Ordering::AcqRel);
            }
            *current = next;
            revision.fetch_add(1, Ordering::AcqRel);
            true
        });

        if changed {
            tracing::debug!(action = kind, "Action committed");
        } else {
            tracing::debug!(action = kind, "Action left state unchanged");
        }

        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::entity::{UserRole, UserSession};
    use studio_core::settings::{PurchasedAddons, SettingsPatch};
    use studio_core::state::CollectionUpdate;
    use studio_core::storage::{KeyValueStore, TOKEN_KEY};
    use studio_infrastructure::{KeyValueTokenRepository, MemoryKeyValueStore};

    fn user(id: &str) -> UserSession {
        UserSession {
            id: id.to_string(),
            name: "Ana".to_string(),
            email: format!("{}@example.com", id),
            role: UserRole::Admin,
            studio_id: None,
            subscription_plan_id: None,
        }
    }

    async fn store_with(kv: &MemoryKeyValueStore) -> Store {
        Store::open(Arc::new(KeyValueTokenRepository::new(Arc::new(kv.clone())))).await
    }

    #[tokio::test]
    async fn test_initial_auth_follows_token_slot() {
        let signed_out = store_with(&MemoryKeyValueStore::new()).await;
        assert!(!signed_out.state().is_authenticated());

        let kv = MemoryKeyValueStore::with_entries([(TOKEN_KEY, "tok")]);
        let signed_in = store_with(&kv).await;
        assert!(signed_in.state().is_authenticated());
        assert!(signed_in.state().session.user.is_none());
    }

    #[tokio::test]
    async fn test_login_and_logout_touch_token_slot() {
        let kv = MemoryKeyValueStore::new();
        let store = store_with(&kv).await;

        let state = store
            .dispatch(Action::login(
                user("u1"),
                Some(SettingsPatch::app_name("Studio X")),
                "tok1",
            ))
            .await;
        assert!(state.is_authenticated());
        assert_eq!(state.settings.app_name, "Studio X");
        assert!(state.settings.is_dark_mode);
        assert_eq!(kv.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok1"));

        store.dispatch(Action::Logout).await;
        assert!(!kv.contains(TOKEN_KEY).await);
        assert!(!store.state().is_authenticated());
    }

    #[tokio::test]
    async fn test_noop_action_does_not_notify() {
        let store = store_with(&MemoryKeyValueStore::new()).await;
        let mut rx = store.subscribe();
        let _ = rx.borrow_and_update();

        let before = store.state();
        let after = store
            .dispatch(Action::UpdateSubscription {
                plan_id: "plan_pro".to_string(),
                addons: PurchasedAddons {
                    financial_module: Some(true),
                    whatsapp_bot: None,
                },
            })
            .await;
        assert!(Arc::ptr_eq(&before, &after));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.revision(), 0);

        store.dispatch(Action::Unknown).await;
        assert!(!rx.has_changed().unwrap());

        store.dispatch(Action::ToggleTheme).await;
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().settings.is_dark_mode);
        assert_eq!(store.revision(), 1);
    }

    #[tokio::test]
    async fn test_auth_epoch_counts_sign_in_edges() {
        let kv = MemoryKeyValueStore::new();
        let store = store_with(&kv).await;
        assert_eq!(store.auth_epoch(), 0);

        store.dispatch(Action::login(user("u1"), None, "t1")).await;
        assert_eq!(store.auth_epoch(), 1);

        // Already signed in: not an edge.
        store.dispatch(Action::login(user("u2"), None, "t2")).await;
        assert_eq!(store.auth_epoch(), 1);

        store.dispatch(Action::Logout).await;
        store.dispatch(Action::login(user("u3"), None, "t3")).await;
        assert_eq!(store.auth_epoch(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_if_refused_leaves_state_alone() {
        let store = store_with(&MemoryKeyValueStore::new()).await;
        let before = store.state();

        let refused = store
            .dispatch_if(Action::ToggleTheme, |state| state.is_authenticated())
            .await;
        assert!(refused.is_none());
        assert!(Arc::ptr_eq(&before, &store.state()));
        assert_eq!(store.revision(), 0);

        let applied = store
            .dispatch_if(Action::ToggleTheme, |state| !state.is_authenticated())
            .await
            .unwrap();
        assert!(!applied.settings.is_dark_mode);
        assert_eq!(store.revision(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_dispatch_if_guard_sees_latest_commit() {
        let kv = MemoryKeyValueStore::new();
        let store = Arc::new(store_with(&kv).await);
        store.dispatch(Action::login(user("u1"), None, "t1")).await;

        // A guarded write racing a logout either lands before it (and is then
        // reset to seed) or is refused; it never lands on the signed-out state.
        for _ in 0..50 {
            let writer = {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .dispatch_if(
                            Action::replace_collection(CollectionUpdate::Rooms(Vec::new())),
                            |state| state.is_authenticated(),
                        )
                        .await
                })
            };
            store.dispatch(Action::Logout).await;
            writer.await.unwrap();

            let state = store.state();
            if !state.is_authenticated() {
                assert_eq!(*state.rooms, studio_core::seed::rooms());
            }
            store.dispatch(Action::login(user("u1"), None, "t1")).await;
        }
    }

    #[tokio::test]
    async fn test_isolated_instances() {
        let a = store_with(&MemoryKeyValueStore::new()).await;
        let b = store_with(&MemoryKeyValueStore::new()).await;

        a.dispatch(Action::ToggleTheme).await;
        assert!(!a.state().settings.is_dark_mode);
        assert!(b.state().settings.is_dark_mode);
    }
}
