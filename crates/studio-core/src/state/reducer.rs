//! The pure state transition function.

use std::sync::Arc;

use crate::patch::pick;
use crate::settings::Settings;
use crate::state::action::{Action, CollectionUpdate};
use crate::state::model::{AppState, CLIENTS_TAB, LANDING_TAB, StatePatch};

/// Computes the state that follows `state` after `action`.
///
/// Total and side-effect free. When an action changes nothing (unknown
/// variants, `UpdateSubscription` without a user) the input `Arc` itself is
/// returned, so callers can detect no-ops with `Arc::ptr_eq`. Sub-trees an
/// action does not touch are shared with the input.
pub fn reduce(state: &Arc<AppState>, action: Action) -> Arc<AppState> {
    let mut next = AppState::clone(state);

    match action {
        Action::ReplaceState { patch } => apply_patch(&mut next, patch),
        Action::ReplaceCollection { update } => replace_collection(&mut next, update),
        Action::UpdateSettings { patch } => {
            next.settings = Arc::new(state.settings.merged(&patch));
        }
        Action::UpdateSuperAdminSettings { patch } => {
            next.super_admin_settings = Arc::new(state.super_admin_settings.merged(&patch));
        }
        Action::SetActiveTab { tab } => next.active_tab = tab,
        Action::ToggleTheme => {
            let mut settings = Settings::clone(&state.settings);
            settings.is_dark_mode = !settings.is_dark_mode;
            next.settings = Arc::new(settings);
        }
        Action::Login { user, settings, .. } => {
            next.session.is_authenticated = true;
            next.session.user = Some(user);
            if let Some(patch) = settings {
                let mut fresh = Settings::default().merged(&patch);
                fresh.is_dark_mode = state.settings.is_dark_mode;
                next.settings = Arc::new(fresh);
            }
        }
        Action::Logout => {
            next = AppState::seed();
            next.settings = Arc::clone(&state.settings);
        }
        Action::PasswordChanged => next.password_just_changed = true,
        Action::SetLoading { loading } => next.is_loading = loading,
        Action::UpdateSubscription { plan_id, addons } => {
            let Some(user) = next.session.user.as_mut() else {
                return Arc::clone(state);
            };
            user.subscription_plan_id = Some(plan_id);
            let mut settings = Settings::clone(&state.settings);
            settings.purchased_addons = Some(addons);
            next.settings = Arc::new(settings);
        }
        Action::Impersonate { user, settings } => {
            next.session.impersonating_from = state.session.user.clone();
            next.session.user = Some(user);
            next.settings = Arc::new(state.settings.merged(&settings));
            next.active_tab = LANDING_TAB.to_string();
        }
        Action::StopImpersonating => {
            next.session.user = state.session.impersonating_from.clone();
            next.session.impersonating_from = None;
            next.active_tab = CLIENTS_TAB.to_string();
        }
        Action::ReplaceSubscriptionPlans { items } => next.subscription_plans = Arc::new(items),
        Action::ReplaceAddons { items } => next.addons = Arc::new(items),
        Action::Unknown => return Arc::clone(state),
    }

    Arc::new(next)
}

fn replace_collection(state: &mut AppState, update: CollectionUpdate) {
    match update {
        CollectionUpdate::Students(items) => state.students = Arc::new(items),
        CollectionUpdate::Instructors(items) => state.instructors = Arc::new(items),
        CollectionUpdate::Rooms(items) => state.rooms = Arc::new(items),
        CollectionUpdate::Equipments(items) => state.equipments = Arc::new(items),
        CollectionUpdate::Transactions(items) => state.transactions = Arc::new(items),
        CollectionUpdate::Agenda(items) => state.agenda = Arc::new(items),
        CollectionUpdate::Escala(items) => state.escala = Arc::new(items),
    }
}

fn apply_patch(state: &mut AppState, patch: StatePatch) {
    let session = &mut state.session;
    session.is_authenticated = pick(&patch.is_authenticated, &session.is_authenticated);
    if let Some(user) = patch.user {
        session.user = user;
    }
    if let Some(from) = patch.impersonating_from {
        session.impersonating_from = from;
    }

    macro_rules! replace {
        ($($field:ident),* $(,)?) => {
            $(if let Some(value) = patch.$field {
                state.$field = value;
            })*
        };
    }
    replace!(
        students,
        instructors,
        rooms,
        equipments,
        transactions,
        agenda,
        escala,
        settings,
        super_admin_settings,
        subscription_plans,
        addons,
        active_tab,
        is_loading,
        password_just_changed,
    );
}
