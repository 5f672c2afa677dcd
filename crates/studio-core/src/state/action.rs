//! The closed set of store actions.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::entity::{
    Addon, AgendaItem, Equipment, EscalaItem, Instructor, Room, Student, SubscriptionPlan,
    Transaction, UserSession,
};
use crate::settings::{PurchasedAddons, SettingsPatch, SuperAdminSettingsPatch};
use crate::state::model::StatePatch;

/// Names of the wholesale-replaced domain collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum CollectionName {
    Students,
    Instructors,
    Rooms,
    Equipments,
    Transactions,
    Agenda,
    Escala,
}

/// New contents for one domain collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "collection", content = "items", rename_all = "camelCase")]
pub enum CollectionUpdate {
    Students(Vec<Student>),
    Instructors(Vec<Instructor>),
    Rooms(Vec<Room>),
    Equipments(Vec<Equipment>),
    Transactions(Vec<Transaction>),
    Agenda(Vec<AgendaItem>),
    Escala(Vec<EscalaItem>),
}

impl CollectionUpdate {
    pub fn name(&self) -> CollectionName {
        match self {
            Self::Students(_) => CollectionName::Students,
            Self::Instructors(_) => CollectionName::Instructors,
            Self::Rooms(_) => CollectionName::Rooms,
            Self::Equipments(_) => CollectionName::Equipments,
            Self::Transactions(_) => CollectionName::Transactions,
            Self::Agenda(_) => CollectionName::Agenda,
            Self::Escala(_) => CollectionName::Escala,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Students(items) => items.len(),
            Self::Instructors(items) => items.len(),
            Self::Rooms(items) => items.len(),
            Self::Equipments(items) => items.len(),
            Self::Transactions(items) => items.len(),
            Self::Agenda(items) => items.len(),
            Self::Escala(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything that can change the store.
///
/// Actions round-trip through JSON with a `type` tag. Tags this build does
/// not know deserialize to [`Action::Unknown`], which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Shallow-merge a partial state (bulk hydration).
    ReplaceState { patch: StatePatch },
    ReplaceCollection { update: CollectionUpdate },
    UpdateSettings { patch: SettingsPatch },
    UpdateSuperAdminSettings { patch: SuperAdminSettingsPatch },
    SetActiveTab { tab: String },
    ToggleTheme,
    /// Signs in. The token is stored by the dispatch wrapper, not the reducer.
    Login {
        user: UserSession,
        #[serde(default)]
        settings: Option<SettingsPatch>,
        token: String,
    },
    /// Signs out. The token is erased by the dispatch wrapper, not the reducer.
    Logout,
    PasswordChanged,
    SetLoading { loading: bool },
    UpdateSubscription {
        plan_id: String,
        addons: PurchasedAddons,
    },
    Impersonate {
        user: UserSession,
        settings: SettingsPatch,
    },
    StopImpersonating,
    ReplaceSubscriptionPlans { items: Vec<SubscriptionPlan> },
    ReplaceAddons { items: Vec<Addon> },
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn replace_collection(update: CollectionUpdate) -> Self {
        Self::ReplaceCollection { update }
    }

    pub fn update_settings(patch: SettingsPatch) -> Self {
        Self::UpdateSettings { patch }
    }

    pub fn set_loading(loading: bool) -> Self {
        Self::SetLoading { loading }
    }

    pub fn login(user: UserSession, settings: Option<SettingsPatch>, token: impl Into<String>) -> Self {
        Self::Login {
            user,
            settings,
            token: token.into(),
        }
    }

    /// Short name for logs; never includes payloads such as tokens.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReplaceState { .. } => "REPLACE_STATE",
            Self::ReplaceCollection { .. } => "REPLACE_COLLECTION",
            Self::UpdateSettings { .. } => "UPDATE_SETTINGS",
            Self::UpdateSuperAdminSettings { .. } => "UPDATE_SUPER_ADMIN_SETTINGS",
            Self::SetActiveTab { .. } => "SET_ACTIVE_TAB",
            Self::ToggleTheme => "TOGGLE_THEME",
            Self::Login { .. } => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::PasswordChanged => "PASSWORD_CHANGED",
            Self::SetLoading { .. } => "SET_LOADING",
            Self::UpdateSubscription { .. } => "UPDATE_SUBSCRIPTION",
            Self::Impersonate { .. } => "IMPERSONATE",
            Self::StopImpersonating => "STOP_IMPERSONATING",
            Self::ReplaceSubscriptionPlans { .. } => "REPLACE_SUBSCRIPTION_PLANS",
            Self::ReplaceAddons { .. } => "REPLACE_ADDONS",
            Self::Unknown => "UNKNOWN",
        }
    }
}
