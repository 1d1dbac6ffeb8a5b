use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user profile as returned by the identity endpoint.
///
/// The backend owns the schema; this layer treats it as an opaque JSON
/// object and only reads `name` for display purposes. The whole object is
/// overwritten on every successful identity fetch or profile update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(pub Map<String, Value>);

impl UserProfile {
    /// Display name, when the backend included one.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
