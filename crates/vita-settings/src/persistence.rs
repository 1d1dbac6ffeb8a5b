use std::path::Path;

use crate::{AppSettings, BillingMode, Error, Result};

const SETTINGS_FILE: &str = "settings.json";

impl AppSettings {
    /// Load settings from `config_path`, then apply environment overrides.
    ///
    /// A missing file yields the defaults; fields absent from the file keep
    /// their defaults.
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut settings = if config_path.exists() {
            let raw = std::fs::read_to_string(config_path).map_err(|source| Error::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&raw)?
        } else {
            AppSettings::default()
        };

        apply_env_overrides(
            &mut settings,
            std::env::var("API_BASE_URL").ok(),
            std::env::var("VITALEDGER_BILLING_MODE").ok(),
        );

        Ok(settings)
    }

    /// Load from the default path under the platform config dir, creating
    /// the directory if needed.
    pub fn load_from_default_path_creating() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or(Error::MissingConfigDir)?
            .join("vitaledger");
        std::fs::create_dir_all(&config_dir).map_err(|source| Error::Write {
            path: config_dir.clone(),
            source,
        })?;
        AppSettings::load(config_dir.join(SETTINGS_FILE).as_path())
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json).map_err(|source| Error::Write {
            path: config_path.to_path_buf(),
            source,
        })
    }
}

fn apply_env_overrides(
    settings: &mut AppSettings,
    api_base_url: Option<String>,
    billing_mode: Option<String>,
) {
    if let Some(endpoint) = api_base_url {
        settings.api.endpoint = endpoint;
    }
    if let Some(raw) = billing_mode {
        match raw.parse::<BillingMode>() {
            Ok(mode) => settings.billing.mode = mode,
            Err(err) => tracing::warn!(error = %err, "ignoring billing mode override"),
        }
    }
}
