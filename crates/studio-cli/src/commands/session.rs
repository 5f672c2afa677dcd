use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use studio_core::entity::{UserRole, UserSession};
use studio_core::settings::SettingsPatch;
use studio_core::state::Action;

use crate::bootstrap::AppBootstrap;

fn parse_role(raw: &str) -> Result<UserRole> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| anyhow!("Unknown role '{}': use admin, superAdmin or instructor", raw))
}

pub async fn login(
    app: &AppBootstrap,
    user_id: String,
    name: String,
    email: String,
    role: &str,
    token: String,
    app_name: Option<String>,
) -> Result<()> {
    let user = UserSession {
        id: user_id,
        name,
        email,
        role: parse_role(role)?,
        studio_id: None,
        subscription_plan_id: None,
    };
    let settings = app_name.map(SettingsPatch::app_name);

    let state = app.store().dispatch(Action::login(user, settings, token)).await;
    app.handle.wait_idle().await;

    let name = state
        .session
        .user
        .as_ref()
        .map(|u| u.name.as_str())
        .unwrap_or_default();
    println!("{} Signed in as {}", "✓".green(), name);
    Ok(())
}

pub async fn logout(app: &AppBootstrap) -> Result<()> {
    app.store().dispatch(Action::Logout).await;
    println!("{} Signed out, local data reset", "✓".green());
    Ok(())
}

pub async fn sync(app: &AppBootstrap) -> Result<()> {
    if !app.store().state().is_authenticated() {
        bail!("Not signed in: run `studio login` first");
    }
    // A sync may already be running from startup; either way wait for it.
    app.handle.request_sync();
    app.handle.wait_idle().await;

    let state = app.store().state();
    println!(
        "{} Sync finished: {} students, {} rooms, {} transactions",
        "✓".green(),
        state.students.len(),
        state.rooms.len(),
        state.transactions.len()
    );
    Ok(())
}

pub async fn impersonate(
    app: &AppBootstrap,
    user_id: String,
    name: String,
    app_name: Option<String>,
) -> Result<()> {
    let user = UserSession {
        id: user_id.clone(),
        name,
        email: String::new(),
        role: UserRole::Admin,
        studio_id: Some(user_id),
        subscription_plan_id: None,
    };
    let settings = app_name.map(SettingsPatch::app_name).unwrap_or_default();

    let state = app
        .store()
        .dispatch(Action::Impersonate { user, settings })
        .await;
    println!(
        "{} Impersonating {} (tab: {})",
        "✓".green(),
        state.settings.app_name,
        state.active_tab
    );
    Ok(())
}

pub async fn stop_impersonating(app: &AppBootstrap) -> Result<()> {
    let state = app.store().dispatch(Action::StopImpersonating).await;
    println!("{} Back to own session (tab: {})", "✓".green(), state.active_tab);
    Ok(())
}
