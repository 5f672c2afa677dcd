//! Store state models.
//!
//! `AppState` is an immutable snapshot. Every collection and settings record
//! sits behind an `Arc`, so producing the next state clones pointers only
//! and sub-trees untouched by an action keep their identity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::{
    Addon, AgendaItem, Equipment, EscalaItem, Instructor, Room, Student, SubscriptionPlan,
    Transaction, UserSession,
};
use crate::patch::present;
use crate::seed;
use crate::settings::{Settings, SuperAdminSettings};

/// Tab shown after login and when impersonation starts.
pub const LANDING_TAB: &str = "painel";
/// Tab the super admin returns to when impersonation stops.
pub const CLIENTS_TAB: &str = "clients";

/// Authentication state of the client.
///
/// When `impersonating_from` is set, `user` is the impersonated identity and
/// `impersonating_from` the real one. Only one level is supported.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Option<UserSession>,
    pub impersonating_from: Option<UserSession>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn is_impersonating(&self) -> bool {
        self.impersonating_from.is_some()
    }
}

/// The whole store state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub session: Session,

    // ============================================================================
    // Domain collections (replaced wholesale)
    // ============================================================================
    pub students: Arc<Vec<Student>>,
    pub instructors: Arc<Vec<Instructor>>,
    pub rooms: Arc<Vec<Room>>,
    pub equipments: Arc<Vec<Equipment>>,
    pub transactions: Arc<Vec<Transaction>>,
    pub agenda: Arc<Vec<AgendaItem>>,
    pub escala: Arc<Vec<EscalaItem>>,

    // ============================================================================
    // Settings and catalog
    // ============================================================================
    pub settings: Arc<Settings>,
    pub super_admin_settings: Arc<SuperAdminSettings>,
    pub subscription_plans: Arc<Vec<SubscriptionPlan>>,
    pub addons: Arc<Vec<Addon>>,

    // ============================================================================
    // Transient flags (never persisted)
    // ============================================================================
    pub active_tab: String,
    pub is_loading: bool,
    pub password_just_changed: bool,
}

impl AppState {
    /// State built from the seed dataset, signed out.
    pub fn seed() -> Self {
        Self {
            session: Session::default(),
            students: Arc::new(seed::students()),
            instructors: Arc::new(seed::instructors()),
            rooms: Arc::new(seed::rooms()),
            equipments: Arc::new(seed::equipments()),
            transactions: Arc::new(seed::transactions()),
            agenda: Arc::new(seed::agenda()),
            escala: Arc::new(seed::escala()),
            settings: Arc::new(Settings::default()),
            super_admin_settings: Arc::new(SuperAdminSettings::default()),
            subscription_plans: Arc::new(seed::subscription_plans()),
            addons: Arc::new(seed::addons()),
            active_tab: LANDING_TAB.to_string(),
            is_loading: false,
            password_just_changed: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    pub fn is_impersonating(&self) -> bool {
        self.session.is_impersonating()
    }

    /// True when both states share every persisted sub-tree by identity.
    ///
    /// Transient flags and the session are ignored.
    pub fn same_persisted_projection(&self, other: &AppState) -> bool {
        Arc::ptr_eq(&self.students, &other.students)
            && Arc::ptr_eq(&self.instructors, &other.instructors)
            && Arc::ptr_eq(&self.rooms, &other.rooms)
            && Arc::ptr_eq(&self.equipments, &other.equipments)
            && Arc::ptr_eq(&self.transactions, &other.transactions)
            && Arc::ptr_eq(&self.agenda, &other.agenda)
            && Arc::ptr_eq(&self.escala, &other.escala)
            && Arc::ptr_eq(&self.settings, &other.settings)
            && Arc::ptr_eq(&self.super_admin_settings, &other.super_admin_settings)
            && Arc::ptr_eq(&self.subscription_plans, &other.subscription_plans)
            && Arc::ptr_eq(&self.addons, &other.addons)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::seed()
    }
}

/// Partial state for bulk hydration. `None` means "leave as is".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_authenticated: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub user: Option<Option<UserSession>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub impersonating_from: Option<Option<UserSession>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Arc<Vec<Student>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructors: Option<Arc<Vec<Instructor>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Arc<Vec<Room>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipments: Option<Arc<Vec<Equipment>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Arc<Vec<Transaction>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda: Option<Arc<Vec<AgendaItem>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escala: Option<Arc<Vec<EscalaItem>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Arc<Settings>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_admin_settings: Option<Arc<SuperAdminSettings>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_plans: Option<Arc<Vec<SubscriptionPlan>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Arc<Vec<Addon>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loading: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_just_changed: Option<bool>,
}
