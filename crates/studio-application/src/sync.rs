//! Remote sync.
//!
//! Fetches every collection endpoint concurrently and replaces the matching
//! store collection for each fetch that succeeds. A failed endpoint leaves
//! its collection untouched and never aborts the batch.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use studio_core::entity::{AgendaItem, Equipment, Instructor, Room, Student, Transaction};
use studio_core::error::{Result, StudioError};
use studio_core::remote::{Endpoint, Transport};
use studio_core::settings::SettingsPatch;
use studio_core::state::{Action, AppState, CollectionUpdate};

use crate::store::Store;

/// Outcome of one sync batch.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Endpoints whose data was applied to the store.
    pub applied: Vec<Endpoint>,
    /// Endpoints that failed, with the reason.
    pub failed: Vec<(Endpoint, StudioError)>,
    /// Endpoints fetched successfully but dropped because the session
    /// ended while the batch was in flight.
    pub discarded: Vec<Endpoint>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.discarded.is_empty()
    }

    /// True when any endpoint answered 401.
    pub fn session_expired(&self) -> bool {
        self.failed.iter().any(|(_, e)| e.is_session_expired())
    }
}

/// Pulls remote data into a [`Store`].
pub struct RemoteSyncService {
    transport: Arc<dyn Transport>,
}

impl RemoteSyncService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Runs one sync batch: raises `isLoading`, fetches all endpoints at
    /// once, applies each success, and clears `isLoading`.
    ///
    /// No retries. Results are discarded if the session that started the
    /// batch is no longer the signed-in one when they arrive.
    pub async fn sync(&self, store: &Store) -> SyncReport {
        let owner = session_owner(&store.state());
        store.dispatch(Action::set_loading(true)).await;

        let (students, instructors, rooms, equipments, transactions, agenda, settings) = tokio::join!(
            self.fetch_collection::<Student>(Endpoint::Students),
            self.fetch_collection::<Instructor>(Endpoint::Instructors),
            self.fetch_collection::<Room>(Endpoint::Rooms),
            self.fetch_collection::<Equipment>(Endpoint::Equipments),
            self.fetch_collection::<Transaction>(Endpoint::Transactions),
            self.fetch_collection::<AgendaItem>(Endpoint::Agenda),
            self.fetch_settings(),
        );

        let results: Vec<(Endpoint, Result<Action>)> = vec![
            (
                Endpoint::Students,
                students.map(|items| Action::replace_collection(CollectionUpdate::Students(items))),
            ),
            (
                Endpoint::Instructors,
                instructors
                    .map(|items| Action::replace_collection(CollectionUpdate::Instructors(items))),
            ),
            (
                Endpoint::Rooms,
                rooms.map(|items| Action::replace_collection(CollectionUpdate::Rooms(items))),
            ),
            (
                Endpoint::Equipments,
                equipments
                    .map(|items| Action::replace_collection(CollectionUpdate::Equipments(items))),
            ),
            (
                Endpoint::Transactions,
                transactions
                    .map(|items| Action::replace_collection(CollectionUpdate::Transactions(items))),
            ),
            (
                Endpoint::Agenda,
                agenda.map(|items| Action::replace_collection(CollectionUpdate::Agenda(items))),
            ),
            (Endpoint::Settings, settings.map(Action::update_settings)),
        ];

        let mut report = SyncReport::default();
        for (endpoint, result) in results {
            match result {
                Ok(action) => {
                    let still_owner = |state: &AppState| {
                        let current = session_owner(state);
                        current.is_some() && current == owner
                    };
                    if store.dispatch_if(action, still_owner).await.is_some() {
                        report.applied.push(endpoint);
                    } else {
                        report.discarded.push(endpoint);
                    }
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "Sync fetch failed, keeping local data");
                    report.failed.push((endpoint, e));
                }
            }
        }

        store.dispatch(Action::set_loading(false)).await;

        if !report.discarded.is_empty() {
            tracing::info!(
                discarded = report.discarded.len(),
                "Session changed during sync, results dropped"
            );
        }
        if report.session_expired() {
            tracing::warn!("Remote session expired during sync, continuing offline");
        }
        tracing::info!(
            applied = report.applied.len(),
            failed = report.failed.len(),
            "Sync finished"
        );

        report
    }

    async fn fetch_collection<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<T>> {
        let value = self.transport.get(&endpoint.path()).await?;
        serde_json::from_value(value).map_err(|e| StudioError::decode(endpoint.as_ref(), e.to_string()))
    }

    async fn fetch_settings(&self) -> Result<SettingsPatch> {
        let endpoint = Endpoint::Settings;
        let value = self.transport.get(&endpoint.path()).await?;
        serde_json::from_value(value).map_err(|e| StudioError::decode(endpoint.as_ref(), e.to_string()))
    }
}

/// Identity a batch belongs to: `None` when signed out.
fn session_owner(state: &AppState) -> Option<Option<String>> {
    state
        .is_authenticated()
        .then(|| state.session.user.as_ref().map(|user| user.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use studio_infrastructure::{KeyValueTokenRepository, MemoryKeyValueStore};

    /// Answers every GET with the same body.
    struct ConstTransport(Value);

    #[async_trait]
    impl Transport for ConstTransport {
        async fn get(&self, _path: &str) -> Result<Value> {
            Ok(self.0.clone())
        }

        async fn post(&self, _path: &str, _body: &Value) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn put(&self, _path: &str, _body: &Value) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn delete(&self, _path: &str) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    async fn signed_in_store() -> Store {
        let kv = MemoryKeyValueStore::with_entries([("auth_token", "tok")]);
        Store::open(Arc::new(KeyValueTokenRepository::new(Arc::new(kv)))).await
    }

    #[tokio::test]
    async fn test_wrong_shape_is_a_per_endpoint_failure() {
        let store = signed_in_store().await;
        let before = store.state();

        // An object decodes as a settings patch but not as a collection.
        let service = RemoteSyncService::new(Arc::new(ConstTransport(json!({}))));
        let report = service.sync(&store).await;

        assert_eq!(report.applied, vec![Endpoint::Settings]);
        assert_eq!(report.failed.len(), 6);
        assert!(report
            .failed
            .iter()
            .all(|(_, e)| matches!(e, StudioError::Decode { .. })));

        let after = store.state();
        assert!(Arc::ptr_eq(&before.students, &after.students));
        assert!(!after.is_loading);
    }

    #[tokio::test]
    async fn test_signed_out_results_are_discarded() {
        let kv = MemoryKeyValueStore::new();
        let store = Store::open(Arc::new(KeyValueTokenRepository::new(Arc::new(kv)))).await;

        let service = RemoteSyncService::new(Arc::new(ConstTransport(json!([]))));
        let report = service.sync(&store).await;

        assert!(report.applied.is_empty());
        assert!(report.discarded.len() >= 6);
        assert_eq!(report.discarded.len() + report.failed.len(), 7);
        assert!(!store.state().students.is_empty());
        assert!(!store.state().is_loading);
    }

    #[test]
    fn test_session_owner() {
        let mut state = AppState::seed();
        assert_eq!(session_owner(&state), None);
        state.session.is_authenticated = true;
        assert_eq!(session_owner(&state), Some(None));
    }
}
