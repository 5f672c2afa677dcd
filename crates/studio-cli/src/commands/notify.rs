use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use studio_core::chatbot::TemplateKey;

use crate::bootstrap::AppBootstrap;

pub async fn send(
    app: &AppBootstrap,
    student_id: &str,
    template: &str,
    vars: Vec<(String, String)>,
) -> Result<()> {
    let key: TemplateKey = serde_json::from_value(serde_json::Value::String(template.to_string()))
        .with_context(|| format!("Unknown template '{}'", template))?;

    let state = app.store().state();
    let student = state
        .students
        .iter()
        .find(|s| s.id == student_id)
        .ok_or_else(|| anyhow!("Student '{}' not found", student_id))?;

    let variables: BTreeMap<String, String> = vars.into_iter().collect();
    let sent = app
        .chatbot
        .send_message(student, key, &state.settings, &variables)
        .await
        .map_err(|e| anyhow!("Failed to send message: {}", e))?;

    match sent {
        Some(message) => {
            println!("{} To {} ({})", "✓".green(), message.recipient_name, message.phone);
            println!("{}", message.body);
        }
        None => println!(
            "{} Chatbot or template '{}' is disabled, nothing sent",
            "!".yellow(),
            key
        ),
    }
    Ok(())
}
