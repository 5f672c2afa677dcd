//! Bootstrap and lifecycle controller.
//!
//! Drives the store through `ColdStart -> Hydrated -> (Syncing <-> Idle)`:
//! hydrates from the persisted snapshot, saves the snapshot after every
//! committed change to the persisted projection, mirrors the theme flag,
//! and starts a remote sync whenever the session becomes authenticated.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use strum::Display;
use studio_core::state::{Action, AppState, Snapshot, SnapshotRepository};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::store::Store;
use crate::sync::RemoteSyncService;
use crate::theme::ThemeSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LifecyclePhase {
    ColdStart,
    Hydrated,
    Syncing,
    Idle,
}

impl LifecyclePhase {
    /// No hydration or sync is running.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Hydrated | Self::Idle)
    }
}

/// Collaborators of the lifecycle, before it starts.
pub struct LifecycleController {
    store: Arc<Store>,
    snapshots: Arc<dyn SnapshotRepository>,
    sync: Arc<RemoteSyncService>,
    theme: Arc<dyn ThemeSink>,
}

struct Shared {
    store: Arc<Store>,
    snapshots: Arc<dyn SnapshotRepository>,
    sync: Arc<RemoteSyncService>,
    theme: Arc<dyn ThemeSink>,
    phase: watch::Sender<LifecyclePhase>,
    /// A trigger arrived while a batch was running. Only touched inside the
    /// phase channel's write lock.
    sync_pending: AtomicBool,
    /// Store revision the worker has fully handled.
    processed: watch::Sender<u64>,
}

/// A running lifecycle.
pub struct LifecycleHandle {
    shared: Arc<Shared>,
    stop_tx: watch::Sender<bool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl LifecycleController {
    pub fn new(
        store: Arc<Store>,
        snapshots: Arc<dyn SnapshotRepository>,
        sync: Arc<RemoteSyncService>,
        theme: Arc<dyn ThemeSink>,
    ) -> Self {
        Self {
            store,
            snapshots,
            sync,
            theme,
        }
    }

    /// Hydrates the store and starts reacting to committed states.
    ///
    /// Returns once the store is hydrated. If the session is already
    /// authenticated, a sync is started in the background.
    pub async fn start(self) -> LifecycleHandle {
        let (phase, _) = watch::channel(LifecyclePhase::ColdStart);
        let (processed, _) = watch::channel(0);
        let shared = Arc::new(Shared {
            store: self.store,
            snapshots: self.snapshots,
            sync: self.sync,
            theme: self.theme,
            phase,
            sync_pending: AtomicBool::new(false),
            processed,
        });

        shared.hydrate().await;

        // The hydrated state is the save baseline, so it is never written
        // straight back.
        let mut rx = shared.store.subscribe();
        let (baseline, revision, auth_epoch) = {
            let guard = rx.borrow_and_update();
            (
                Arc::clone(&guard),
                shared.store.revision(),
                shared.store.auth_epoch(),
            )
        };
        shared.processed.send_replace(revision);
        shared.set_phase(LifecyclePhase::Hydrated);
        shared.theme.apply(baseline.settings.is_dark_mode);

        if baseline.is_authenticated() {
            shared.trigger_sync(&baseline);
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let worker = tokio::spawn(run(
            Arc::clone(&shared),
            rx,
            baseline,
            auth_epoch,
            stop_rx,
        ));

        LifecycleHandle {
            shared,
            stop_tx,
            worker: Mutex::new(Some(worker)),
        }
    }
}

impl Shared {
    async fn hydrate(&self) {
        match self.snapshots.load().await {
            Ok(Some(snapshot)) => {
                tracing::info!(version = snapshot.version, "Hydrating from persisted snapshot");
                self.store
                    .dispatch(Action::ReplaceState {
                        patch: snapshot.into_patch(),
                    })
                    .await;
            }
            Ok(None) => tracing::info!("No persisted snapshot, starting from seed data"),
            Err(e) => tracing::warn!(error = %e, "Failed to load snapshot, starting from seed data"),
        }
    }

    fn set_phase(&self, next: LifecyclePhase) {
        let previous = self.phase.send_replace(next);
        if previous != next {
            tracing::info!(from = %previous, to = %next, "Lifecycle transition");
        }
    }

    /// Starts a sync unless the session is an impersonation. A trigger that
    /// arrives while a batch is running queues one more batch instead.
    /// Returns whether a new batch was started.
    fn trigger_sync(self: &Arc<Self>, state: &AppState) -> bool {
        if state.is_impersonating() {
            tracing::debug!("Impersonated session, remote sync skipped");
            return false;
        }

        let started = self.phase.send_if_modified(|phase| {
            if *phase == LifecyclePhase::Syncing {
                self.sync_pending.store(true, Ordering::Release);
                return false;
            }
            *phase = LifecyclePhase::Syncing;
            true
        });
        if !started {
            tracing::debug!("Sync in flight, another batch queued");
            return false;
        }
        tracing::info!(to = %LifecyclePhase::Syncing, "Lifecycle transition");

        let shared = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                shared.sync.sync(&shared.store).await;
                if !shared.finish_batch() {
                    break;
                }
                tracing::debug!("Running queued sync batch");
            }
        });
        true
    }

    /// Moves to `Idle` unless a queued trigger still applies to the current
    /// session. Returns whether another batch should run.
    fn finish_batch(&self) -> bool {
        let mut again = false;
        self.phase.send_if_modified(|phase| {
            if self.sync_pending.swap(false, Ordering::AcqRel) {
                let state = self.store.state();
                if state.is_authenticated() && !state.is_impersonating() {
                    again = true;
                    return false;
                }
            }
            *phase = LifecyclePhase::Idle;
            true
        });
        if !again {
            tracing::info!(from = %LifecyclePhase::Syncing, to = %LifecyclePhase::Idle, "Lifecycle transition");
        }
        again
    }

    async fn save(&self, state: &AppState) -> bool {
        match self.snapshots.save(&Snapshot::from_state(state)).await {
            Ok(()) => {
                tracing::debug!("Snapshot saved");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save snapshot");
                false
            }
        }
    }

    async fn on_commit(
        self: &Arc<Self>,
        previous: &AppState,
        state: &Arc<AppState>,
        auth_epoch: u64,
        seen_epoch: &mut u64,
        last_saved: &mut Arc<AppState>,
    ) {
        if !Arc::ptr_eq(&previous.settings, &state.settings) {
            self.theme.apply(state.settings.is_dark_mode);
        }

        if !state.same_persisted_projection(&**last_saved) && self.save(state).await {
            *last_saved = Arc::clone(state);
        }

        // Several commits may collapse into one observation, so sign-in
        // edges are counted by the store rather than inferred from
        // `previous`.
        if auth_epoch != *seen_epoch {
            *seen_epoch = auth_epoch;
            if state.is_authenticated() {
                self.trigger_sync(state);
            }
        }
    }
}

async fn run(
    shared: Arc<Shared>,
    mut rx: watch::Receiver<Arc<AppState>>,
    baseline: Arc<AppState>,
    mut seen_epoch: u64,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut previous = Arc::clone(&baseline);
    let mut last_saved = baseline;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let (state, revision, auth_epoch) = {
                    let guard = rx.borrow_and_update();
                    (
                        Arc::clone(&guard),
                        shared.store.revision(),
                        shared.store.auth_epoch(),
                    )
                };
                shared
                    .on_commit(&previous, &state, auth_epoch, &mut seen_epoch, &mut last_saved)
                    .await;
                previous = state;
                shared.processed.send_replace(revision);
            }
            _ = stop_rx.changed() => break,
        }
    }

    let state = shared.store.state();
    if !state.same_persisted_projection(&last_saved) {
        tracing::debug!("Flushing final snapshot");
        shared.save(&state).await;
    }
    shared.processed.send_replace(u64::MAX);
}

impl LifecycleHandle {
    pub fn store(&self) -> &Arc<Store> {
        &self.shared.store
    }

    pub fn phase(&self) -> LifecyclePhase {
        *self.shared.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<LifecyclePhase> {
        self.shared.phase.subscribe()
    }

    /// Starts a sync on demand, with the same guards as the automatic one.
    ///
    /// Returns `false` when signed out or impersonating, and when a batch is
    /// already running (one more batch is queued then).
    pub fn request_sync(&self) -> bool {
        let state = self.shared.store.state();
        if !state.is_authenticated() {
            tracing::debug!("Signed out, sync request ignored");
            return false;
        }
        self.shared.trigger_sync(&state)
    }

    /// Waits until every committed state has been handled and no sync is
    /// running.
    pub async fn wait_idle(&self) {
        let mut processed = self.shared.processed.subscribe();
        let mut phase = self.shared.phase.subscribe();

        loop {
            let target = self.shared.store.revision();
            let caught_up = processed.wait_for(|seen| *seen >= target).await.is_ok();
            if !caught_up {
                return;
            }
            let settled = phase.wait_for(|p| p.is_settled()).await.is_ok();
            if !settled {
                return;
            }
            if self.shared.store.revision() == target {
                return;
            }
        }
    }

    /// Waits for in-flight work, flushes a final snapshot if the persisted
    /// projection changed, and stops the controller.
    pub async fn shutdown(&self) {
        self.wait_idle().await;
        self.stop_tx.send_replace(true);

        let worker = self.worker.lock().await.take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::warn!(error = %e, "Lifecycle worker ended abnormally");
            }
        }
        tracing::info!("Lifecycle stopped");
    }
}
