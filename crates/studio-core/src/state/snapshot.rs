//! The persisted projection of the store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::{
    Addon, AgendaItem, Equipment, EscalaItem, Instructor, Room, Student, SubscriptionPlan,
    Transaction,
};
use crate::settings::{Settings, SuperAdminSettings};
use crate::state::model::{AppState, StatePatch};

/// Current layout of the persisted blob.
pub const SNAPSHOT_VERSION: u32 = 1;

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Domain collections, settings and catalog, as written to durable storage.
///
/// Session and transient flags are never part of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "current_version")]
    pub version: u32,
    pub students: Arc<Vec<Student>>,
    pub instructors: Arc<Vec<Instructor>>,
    pub rooms: Arc<Vec<Room>>,
    pub equipments: Arc<Vec<Equipment>>,
    pub transactions: Arc<Vec<Transaction>>,
    pub agenda: Arc<Vec<AgendaItem>>,
    pub escala: Arc<Vec<EscalaItem>>,
    pub settings: Arc<Settings>,
    pub super_admin_settings: Arc<SuperAdminSettings>,
    pub subscription_plans: Arc<Vec<SubscriptionPlan>>,
    pub addons: Arc<Vec<Addon>>,
}

impl Snapshot {
    /// Projects `state`, sharing its sub-trees.
    pub fn from_state(state: &AppState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            students: Arc::clone(&state.students),
            instructors: Arc::clone(&state.instructors),
            rooms: Arc::clone(&state.rooms),
            equipments: Arc::clone(&state.equipments),
            transactions: Arc::clone(&state.transactions),
            agenda: Arc::clone(&state.agenda),
            escala: Arc::clone(&state.escala),
            settings: Arc::clone(&state.settings),
            super_admin_settings: Arc::clone(&state.super_admin_settings),
            subscription_plans: Arc::clone(&state.subscription_plans),
            addons: Arc::clone(&state.addons),
        }
    }

    /// Whether this build understands the snapshot layout.
    pub fn is_supported(&self) -> bool {
        self.version <= SNAPSHOT_VERSION
    }

    /// Converts into the patch used to hydrate the store.
    pub fn into_patch(self) -> StatePatch {
        StatePatch {
            students: Some(self.students),
            instructors: Some(self.instructors),
            rooms: Some(self.rooms),
            equipments: Some(self.equipments),
            transactions: Some(self.transactions),
            agenda: Some(self.agenda),
            escala: Some(self.escala),
            settings: Some(self.settings),
            super_admin_settings: Some(self.super_admin_settings),
            subscription_plans: Some(self.subscription_plans),
            addons: Some(self.addons),
            ..StatePatch::default()
        }
    }
}

impl From<&AppState> for Snapshot {
    fn from(state: &AppState) -> Self {
        Self::from_state(state)
    }
}
