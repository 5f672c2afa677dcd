use anyhow::Result;
use colored::Colorize;
use studio_core::state::Session;

use crate::bootstrap::AppBootstrap;

pub fn show(app: &AppBootstrap) -> Result<()> {
    let state = app.store().state();
    let session = &state.session;

    println!("{}", state.settings.app_name.bold());
    println!("  Remote:     {}", app.api_base_url);
    println!("  Data:       {}", app.data_dir.display());
    println!("  Phase:      {}", app.handle.phase());

    let auth = if session.is_authenticated {
        "signed in".green()
    } else {
        "signed out".yellow()
    };
    println!("  Session:    {}", auth);
    if let Some(line) = user_line(session) {
        println!("  User:       {}", line);
    }
    println!(
        "  Theme:      {}",
        if app.theme.is_dark() { "dark" } else { "light" }
    );
    println!("  Active tab: {}", state.active_tab);

    println!("{}", "Collections".bold());
    let rows = [
        ("students", state.students.len()),
        ("instructors", state.instructors.len()),
        ("rooms", state.rooms.len()),
        ("equipments", state.equipments.len()),
        ("transactions", state.transactions.len()),
        ("agenda", state.agenda.len()),
        ("escala", state.escala.len()),
        ("plans", state.subscription_plans.len()),
        ("addons", state.addons.len()),
    ];
    for (name, count) in rows {
        println!("  {:<13} {}", name, count);
    }

    Ok(())
}

/// The acting user, plus the real identity behind an impersonation.
fn user_line(session: &Session) -> Option<String> {
    let user = session.user.as_ref()?;
    let line = format!("{} ({})", user.name, user.id);
    Some(match &session.impersonating_from {
        Some(real) => format!("{} {}", line, format!("impersonated by {}", real.name).magenta()),
        None => line,
    })
}
