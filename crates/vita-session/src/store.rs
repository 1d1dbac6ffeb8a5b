use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::UserProfile;

/// Entry key for the persisted bearer token.
pub const TOKEN_KEY: &str = "token";
/// Entry key for the persisted user profile JSON.
pub const USER_KEY: &str = "user";

const STORE_FILENAME: &str = "session.json";

/// Access to the persisted session credentials.
///
/// Reads fail soft: an anonymous visitor, a malformed store file or a
/// malformed profile entry all surface as absent or empty values, never as
/// an error the caller has to handle. Mutations report their outcome.
pub trait SessionStore: Send + Sync {
    /// The persisted bearer token, or `None` for an anonymous session.
    fn token(&self) -> Option<String>;

    /// The persisted user profile.
    ///
    /// Returns `None` when no profile is stored. A stored entry that fails
    /// to parse yields an empty profile instead of an error.
    fn user(&self) -> Option<UserProfile>;

    /// Persist both credentials. Readers never observe one without the other.
    fn set_session(&self, token: &str, user: &UserProfile) -> Result<()>;

    /// Remove both credentials. Idempotent.
    fn clear_session(&self) -> Result<()>;
}

/// File-backed session store: one JSON object of string entries, written
/// atomically via temp file + rename.
pub struct FileSessionStore {
    entries: Mutex<HashMap<String, String>>,
    path: PathBuf,
}

impl FileSessionStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// An unreadable or unparsable store file is treated as empty; the next
    /// write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "session store unparsable, starting from an empty session",
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        tracing::debug!(
            path = %path.display(),
            num_entries = entries.len(),
            "session store opened",
        );

        Self {
            entries: Mutex::new(entries),
            path,
        }
    }

    /// Open the store at its default location under the platform config dir.
    pub fn open_default() -> Result<Self> {
        let dir = dirs::config_dir()
            .context("missing config dir")?
            .join("vitaledger");
        Ok(Self::open(dir.join(STORE_FILENAME)))
    }

    fn get(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(err) => {
                tracing::warn!(error = %err, "session store lock poisoned");
                None
            }
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        let json = serde_json::to_vec_pretty(entries).context("failed to serialise session")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        // Atomic write via temp + rename to avoid half-written files on crash.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json)
            .with_context(|| format!("failed to write temp file {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to rename temp file to {}", self.path.display()))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| anyhow::anyhow!("session store lock poisoned: {e}"))
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    fn user(&self) -> Option<UserProfile> {
        self.get(USER_KEY).map(|raw| parse_profile(&raw))
    }

    fn set_session(&self, token: &str, user: &UserProfile) -> Result<()> {
        let mut entries = self.lock()?;
        entries.insert(TOKEN_KEY.to_owned(), token.to_owned());
        entries.insert(
            USER_KEY.to_owned(),
            serde_json::to_string(user).context("failed to serialise user profile")?,
        );
        self.flush(&entries)
    }

    fn clear_session(&self) -> Result<()> {
        let mut entries = self.lock()?;
        let removed =
            entries.remove(TOKEN_KEY).is_some() | entries.remove(USER_KEY).is_some();
        if removed {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// In-memory session store, for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.entries.lock().ok()?.get(TOKEN_KEY).cloned()
    }

    fn user(&self) -> Option<UserProfile> {
        let raw = self.entries.lock().ok()?.get(USER_KEY).cloned()?;
        Some(parse_profile(&raw))
    }

    fn set_session(&self, token: &str, user: &UserProfile) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| anyhow::anyhow!("session store lock poisoned: {e}"))?;
        entries.insert(TOKEN_KEY.to_owned(), token.to_owned());
        entries.insert(
            USER_KEY.to_owned(),
            serde_json::to_string(user).context("failed to serialise user profile")?,
        );
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| anyhow::anyhow!("session store lock poisoned: {e}"))?;
        entries.remove(TOKEN_KEY);
        entries.remove(USER_KEY);
        Ok(())
    }
}

fn parse_profile(raw: &str) -> UserProfile {
    match serde_json::from_str(raw) {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(error = %err, "stored user profile unparsable, treating as empty");
            UserProfile::default()
        }
    }
}
