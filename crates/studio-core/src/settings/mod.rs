//! Studio settings and super-admin defaults.

mod model;

pub use model::{
    Address, PlanPrice, PurchasedAddons, Settings, SettingsPatch, SuperAdminSettings,
    SuperAdminSettingsPatch,
};
