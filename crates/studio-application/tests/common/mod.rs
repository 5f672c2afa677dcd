//! Shared fixtures for the studio-application integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use studio_application::{
    LifecycleController, LifecycleHandle, RemoteSyncService, Store, ThemeFlag,
};
use studio_core::entity::{UserRole, UserSession};
use studio_core::error::{Result, StudioError};
use studio_core::remote::Transport;
use studio_core::storage::KeyValueStore;
use studio_infrastructure::{KeyValueSnapshotRepository, KeyValueTokenRepository, MemoryKeyValueStore};
use tokio::sync::watch;

/// Transport answering GETs from a fixed script.
///
/// Paths missing from the script fail with a 500. When gated, every GET
/// waits until [`ScriptedTransport::open_gate`] is called.
pub struct ScriptedTransport {
    responses: HashMap<String, Result<Value>>,
    calls: AtomicUsize,
    gate: watch::Sender<bool>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            responses: HashMap::new(),
            calls: AtomicUsize::new(0),
            gate,
        }
    }

    /// Script answering every endpoint with [`remote_payloads`].
    pub fn healthy() -> Self {
        remote_payloads()
            .into_iter()
            .fold(Self::new(), |t, (path, body)| t.respond(path, body))
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, path: &str, error: StudioError) -> Self {
        self.responses.insert(path.to_string(), Err(error));
        self
    }

    pub fn gated(self) -> Self {
        self.gate.send_replace(false);
        self
    }

    pub fn open_gate(&self) {
        self.gate.send_replace(true);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;

        self.responses
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(StudioError::remote(500, format!("no script for {path}"))))
    }

    async fn post(&self, _path: &str, body: &Value) -> Result<Value> {
        Ok(body.clone())
    }

    async fn put(&self, _path: &str, body: &Value) -> Result<Value> {
        Ok(body.clone())
    }

    async fn delete(&self, _path: &str) -> Result<Value> {
        Ok(Value::Null)
    }
}

/// Key-value store whose writes always fail.
#[derive(Default)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(StudioError::storage(format!("disk full writing {key}")))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

/// One record per collection endpoint plus a settings body.
pub fn remote_payloads() -> Vec<(&'static str, Value)> {
    vec![
        (
            "/students",
            json!([{"id": "s9", "name": "Remote Student", "schedule": ["Sex 09:00"]}]),
        ),
        (
            "/instructors",
            json!([{"id": "i9", "name": "Remote Instructor"}]),
        ),
        ("/rooms", json!([{"id": "r9", "name": "Remote Room", "capacity": 3}])),
        (
            "/equipments",
            json!([{"id": "e9", "name": "Chair", "status": "available"}]),
        ),
        (
            "/transactions",
            json!([{
                "id": "t9",
                "description": "Remote income",
                "amount": 99.0,
                "type": "income",
                "date": "2025-02-01",
                "status": "paid"
            }]),
        ),
        (
            "/agenda",
            json!([{"id": "a9", "studentId": "s9", "date": "2025-02-03", "time": "09:00"}]),
        ),
        ("/settings", json!({"appName": "Remote Studio"})),
    ]
}

pub fn user(id: &str, role: UserRole) -> UserSession {
    UserSession {
        id: id.to_string(),
        name: format!("User {}", id),
        email: format!("{}@example.com", id),
        role,
        studio_id: None,
        subscription_plan_id: None,
    }
}

/// A store with its own token slot in `kv`.
pub async fn open_store(kv: &MemoryKeyValueStore) -> Arc<Store> {
    let tokens = Arc::new(KeyValueTokenRepository::new(Arc::new(kv.clone())));
    Arc::new(Store::open(tokens).await)
}

pub struct Harness {
    pub kv: MemoryKeyValueStore,
    pub transport: Arc<ScriptedTransport>,
    pub theme: ThemeFlag,
    pub handle: LifecycleHandle,
}

/// Starts a full lifecycle over `kv` for both slots.
pub async fn start_lifecycle(kv: MemoryKeyValueStore, transport: ScriptedTransport) -> Harness {
    let transport = Arc::new(transport);
    let theme = ThemeFlag::new();
    let store = open_store(&kv).await;

    let handle = LifecycleController::new(
        store,
        Arc::new(KeyValueSnapshotRepository::new(Arc::new(kv.clone()))),
        Arc::new(RemoteSyncService::new(transport.clone())),
        Arc::new(theme.clone()),
    )
    .start()
    .await;

    Harness {
        kv,
        transport,
        theme,
        handle,
    }
}
