use anyhow::{Context, Result};
use colored::Colorize;
use studio_core::settings::PurchasedAddons;
use studio_core::state::Action;

use crate::bootstrap::AppBootstrap;

pub async fn toggle_theme(app: &AppBootstrap) -> Result<()> {
    let state = app.store().dispatch(Action::ToggleTheme).await;
    app.handle.wait_idle().await;
    let mode = if state.settings.is_dark_mode { "dark" } else { "light" };
    println!("{} Theme is now {}", "✓".green(), mode);
    Ok(())
}

pub async fn subscription(
    app: &AppBootstrap,
    plan_id: String,
    financial: bool,
    whatsapp: bool,
) -> Result<()> {
    let before = app.store().state();
    let addons = PurchasedAddons {
        financial_module: Some(financial),
        whatsapp_bot: Some(whatsapp),
    };
    let after = app
        .store()
        .dispatch(Action::UpdateSubscription { plan_id, addons })
        .await;

    if std::sync::Arc::ptr_eq(&before, &after) {
        println!(
            "{} No user in this session, subscription unchanged",
            "!".yellow()
        );
    } else {
        println!("{} Subscription updated", "✓".green());
    }
    Ok(())
}

pub async fn dispatch_raw(app: &AppBootstrap, raw: &str) -> Result<()> {
    let action: Action = serde_json::from_str(raw).context("Invalid action JSON")?;
    if action == Action::Unknown {
        println!("{} Unknown action type, ignored", "!".yellow());
        return Ok(());
    }
    let kind = action.kind();
    app.store().dispatch(action).await;
    println!("{} {}", "✓".green(), kind);
    Ok(())
}
