use serde::{Deserialize, Serialize};

mod error;
mod persistence;
mod settings;

pub use error::{Error, Result};
pub use settings::{ApiSettings, BillingMode, BillingSettings};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub billing: BillingSettings,
}
