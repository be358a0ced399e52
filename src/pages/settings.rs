use crate::config::{Company, Preferences, UserProfile};
use crate::Config;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What the settings page shows. Read-only.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub company: Company,
    pub user: UserProfile,
    pub preferences: Preferences,
    pub tax_rate: Decimal,
}

/// What the profile page shows. Read-only.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub role: String,
    pub company: String,
}

impl SettingsView {
    pub fn new(config: &Config) -> Self {
        Self {
            company: config.company().clone(),
            user: config.user().clone(),
            preferences: config.preferences().clone(),
            tax_rate: config.tax_rate(),
        }
    }
}

impl ProfileView {
    pub fn new(config: &Config) -> Self {
        let user = config.user();
        Self {
            name: user.full_name(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            location: user.location.clone(),
            role: user.role.clone(),
            company: config.company().name.clone(),
        }
    }
}
