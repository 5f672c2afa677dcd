//! Chatbot notifications.
//!
//! Builds the outbound WhatsApp text for a student from the studio's
//! chatbot templates. Delivery itself happens behind [`MessageSender`].
//!
//! # Module Structure
//!
//! - `model`: template keys and chatbot settings
//! - `template`: `{name}` token substitution

mod model;
mod template;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entity::Student;
use crate::error::Result;
use crate::settings::Settings;

pub use model::{ChatbotFeature, ChatbotSettings, TemplateKey};
pub use template::{STUDENT_TOKEN, STUDIO_TOKEN, replace_variables};

/// Variable filled in for welcome messages.
pub const NEXT_CLASS_VAR: &str = "proxima_aula";
/// Used for `{proxima_aula}` when the student has nothing scheduled.
pub const NEXT_CLASS_FALLBACK: &str = "em breve (entraremos em contato para agendar)";

/// A message ready to be handed to a [`MessageSender`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub student_id: String,
    pub recipient_name: String,
    pub phone: String,
    pub template_key: TemplateKey,
    pub body: String,
}

/// Delivery channel for chatbot messages.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<()>;
}

/// Composes the message for `template_key`, if it should be sent at all.
///
/// Returns `None` unless the chatbot is globally enabled, the template is
/// enabled, and its text is non-empty.
pub fn compose_message(
    student: &Student,
    template_key: TemplateKey,
    settings: &Settings,
    variables: &BTreeMap<String, String>,
) -> Option<OutboundMessage> {
    let chatbot = settings.chatbot_settings.as_ref()?;
    if !chatbot.is_enabled {
        return None;
    }

    let feature = chatbot.feature(template_key)?;
    if !feature.is_enabled || feature.template.is_empty() {
        return None;
    }

    let mut variables = variables.clone();
    if template_key == TemplateKey::WelcomeMessage {
        let next_class = student
            .schedule
            .first()
            .map(String::as_str)
            .filter(|class| !class.is_empty())
            .unwrap_or(NEXT_CLASS_FALLBACK);
        variables.insert(NEXT_CLASS_VAR.to_string(), next_class.to_string());
    }

    let raw = replace_variables(&feature.template, student, settings, &variables);

    Some(OutboundMessage {
        student_id: student.id.clone(),
        recipient_name: student.name.clone(),
        phone: student.phone.clone(),
        template_key,
        body: friendly_rewrite(&raw),
    })
}

/// Stand-in for the generative rewrite step: appends a smiley.
pub fn friendly_rewrite(text: &str) -> String {
    format!("{text} 😊")
}
