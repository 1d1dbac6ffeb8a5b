use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Base URL of the VitaLedger backend. Every request path is joined
    /// onto this one value instead of being hardcoded per call site.
    pub endpoint: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingSettings {
    pub mode: BillingMode,
}

/// Which payment behavior the billing pages run against. Read once at
/// startup; the mock activation endpoint only exists when this is `Mock`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingMode {
    #[default]
    Mock,
    Sandbox,
    Live,
}

impl BillingMode {
    pub fn is_mock(self) -> bool {
        matches!(self, BillingMode::Mock)
    }
}

impl std::str::FromStr for BillingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mock" => Ok(BillingMode::Mock),
            "sandbox" => Ok(BillingMode::Sandbox),
            "live" => Ok(BillingMode::Live),
            other => Err(format!("unknown billing mode: {other}")),
        }
    }
}
