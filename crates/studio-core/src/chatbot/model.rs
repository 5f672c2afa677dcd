//! Chatbot configuration models.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// Which automated message a notification uses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TemplateKey {
    ClassReminder,
    ExpiryWarning,
    BirthdayMessage,
    PaymentConfirmation,
    WelcomeMessage,
    RescheduleNotification,
}

/// Per-template switch plus the template text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotFeature {
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub template: String,
}

impl ChatbotFeature {
    pub fn enabled(template: impl Into<String>) -> Self {
        Self {
            is_enabled: true,
            template: template.into(),
        }
    }
}

/// WhatsApp chatbot configuration stored inside the studio settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotSettings {
    /// Global switch; nothing is sent while this is off.
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_reminder: Option<ChatbotFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_warning: Option<ChatbotFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday_message: Option<ChatbotFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_confirmation: Option<ChatbotFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<ChatbotFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reschedule_notification: Option<ChatbotFeature>,
}

impl ChatbotSettings {
    /// Returns the configuration of one template, if any.
    pub fn feature(&self, key: TemplateKey) -> Option<&ChatbotFeature> {
        match key {
            TemplateKey::ClassReminder => self.class_reminder.as_ref(),
            TemplateKey::ExpiryWarning => self.expiry_warning.as_ref(),
            TemplateKey::BirthdayMessage => self.birthday_message.as_ref(),
            TemplateKey::PaymentConfirmation => self.payment_confirmation.as_ref(),
            TemplateKey::WelcomeMessage => self.welcome_message.as_ref(),
            TemplateKey::RescheduleNotification => self.reschedule_notification.as_ref(),
        }
    }

    /// Replaces the configuration of one template.
    pub fn set_feature(&mut self, key: TemplateKey, feature: ChatbotFeature) {
        let slot = match key {
            TemplateKey::ClassReminder => &mut self.class_reminder,
            TemplateKey::ExpiryWarning => &mut self.expiry_warning,
            TemplateKey::BirthdayMessage => &mut self.birthday_message,
            TemplateKey::PaymentConfirmation => &mut self.payment_confirmation,
            TemplateKey::WelcomeMessage => &mut self.welcome_message,
            TemplateKey::RescheduleNotification => &mut self.reschedule_notification,
        };
        *slot = Some(feature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_template_key_names_match_settings_keys() {
        let mut settings = ChatbotSettings::default();
        for key in TemplateKey::iter() {
            settings.set_feature(key, ChatbotFeature::enabled(key.to_string()));
        }
        let json = serde_json::to_value(&settings).unwrap();
        for key in TemplateKey::iter() {
            assert_eq!(json[key.as_ref()]["template"], key.to_string());
        }
        assert_eq!(TemplateKey::BirthdayMessage.as_ref(), "birthdayMessage");
    }
}
