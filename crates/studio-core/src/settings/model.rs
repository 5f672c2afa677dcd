//! Studio settings models.
//!
//! `Settings` is always present in the store. Updates arrive as a
//! `SettingsPatch` and are shallow-merged: every field the patch carries
//! replaces the current value wholesale, every other field is kept.

use serde::{Deserialize, Serialize};

use crate::chatbot::ChatbotSettings;
use crate::patch::{pick, present};

/// Postal address of the studio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub complement: String,
}

/// Price of a weekly-frequency plan, as shown on the pricing screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanPrice {
    pub label: String,
    pub value: String,
}

impl PlanPrice {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Add-on feature flags the studio has purchased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedAddons {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_module: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_bot: Option<bool>,
}

/// Studio configuration merged with the dark-mode UI preference.
///
/// Missing fields deserialize to the seed defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub is_dark_mode: bool,
    pub app_name: String,
    pub logo: Option<String>,
    pub phone: String,
    pub email: String,
    pub modality: String,
    pub document_type: String,
    pub document: String,
    pub admin_password: String,
    pub address: Address,
    pub plans: Vec<PlanPrice>,
    pub commission: String,
    pub alert_days: String,
    pub auto_inactive_days: String,
    pub instructor_sees_all_students: bool,
    #[serde(rename = "metaFaturamento")]
    pub revenue_goal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatbot_settings: Option<ChatbotSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_addons: Option<PurchasedAddons>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_dark_mode: true,
            app_name: "Meu Estúdio".to_string(),
            logo: None,
            phone: String::new(),
            email: String::new(),
            modality: "Pilates".to_string(),
            document_type: "CNPJ".to_string(),
            document: String::new(),
            admin_password: String::new(),
            address: Address::default(),
            plans: vec![
                PlanPrice::new("Valor para 1 aula por semana", "150"),
                PlanPrice::new("Valor para 2 aulas por semana", "250"),
                PlanPrice::new("Valor para 3 aulas por semana", "320"),
                PlanPrice::new("Valor para 4 aulas por semana", "380"),
                PlanPrice::new("Valor para 5 aulas por semana", "420"),
            ],
            commission: "40".to_string(),
            alert_days: "7".to_string(),
            auto_inactive_days: "30".to_string(),
            instructor_sees_all_students: false,
            revenue_goal: 10000.0,
            chatbot_settings: None,
            purchased_addons: None,
        }
    }
}

/// Partial settings update. `None` means "leave as is".
///
/// Nullable fields (`logo`, `chatbotSettings`, `purchasedAddons`) use a
/// double option so an explicit JSON `null` clears the value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub logo: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<PlanPrice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_inactive_days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_sees_all_students: Option<bool>,
    #[serde(
        default,
        rename = "metaFaturamento",
        skip_serializing_if = "Option::is_none"
    )]
    pub revenue_goal: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub chatbot_settings: Option<Option<ChatbotSettings>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub purchased_addons: Option<Option<PurchasedAddons>>,
}

impl Settings {
    /// Returns a copy of `self` with every field carried by `patch` replaced.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            is_dark_mode: pick(&patch.is_dark_mode, &self.is_dark_mode),
            app_name: pick(&patch.app_name, &self.app_name),
            logo: pick(&patch.logo, &self.logo),
            phone: pick(&patch.phone, &self.phone),
            email: pick(&patch.email, &self.email),
            modality: pick(&patch.modality, &self.modality),
            document_type: pick(&patch.document_type, &self.document_type),
            document: pick(&patch.document, &self.document),
            admin_password: pick(&patch.admin_password, &self.admin_password),
            address: pick(&patch.address, &self.address),
            plans: pick(&patch.plans, &self.plans),
            commission: pick(&patch.commission, &self.commission),
            alert_days: pick(&patch.alert_days, &self.alert_days),
            auto_inactive_days: pick(&patch.auto_inactive_days, &self.auto_inactive_days),
            instructor_sees_all_students: pick(
                &patch.instructor_sees_all_students,
                &self.instructor_sees_all_students,
            ),
            revenue_goal: pick(&patch.revenue_goal, &self.revenue_goal),
            chatbot_settings: pick(&patch.chatbot_settings, &self.chatbot_settings),
            purchased_addons: pick(&patch.purchased_addons, &self.purchased_addons),
        }
    }

    /// True when the chatbot is globally switched on.
    pub fn chatbot_enabled(&self) -> bool {
        self.chatbot_settings
            .as_ref()
            .is_some_and(|chatbot| chatbot.is_enabled)
    }
}

impl SettingsPatch {
    pub fn app_name(name: impl Into<String>) -> Self {
        Self {
            app_name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Tenant-onboarding defaults managed by the platform super admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SuperAdminSettings {
    pub default_trial_days: u32,
    pub default_commission: f64,
    pub default_alert_days: u32,
    pub support_link: String,
}

impl Default for SuperAdminSettings {
    fn default() -> Self {
        Self {
            default_trial_days: 30,
            default_commission: 40.0,
            default_alert_days: 7,
            support_link: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_trial_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_commission: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_alert_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_link: Option<String>,
}

impl SuperAdminSettings {
    pub fn merged(&self, patch: &SuperAdminSettingsPatch) -> Self {
        Self {
            default_trial_days: pick(&patch.default_trial_days, &self.default_trial_days),
            default_commission: pick(&patch.default_commission, &self.default_commission),
            default_alert_days: pick(&patch.default_alert_days, &self.default_alert_days),
            support_link: pick(&patch.support_link, &self.support_link),
        }
    }
}
