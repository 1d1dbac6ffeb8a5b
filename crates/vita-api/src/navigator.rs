/// Route the user is sent to when the session expires.
pub const LOGIN_PATH: &str = "/login";

/// Advisory notice shown on the login page after a forced sign-out.
pub const SESSION_EXPIRED_NOTICE: &str = "Session expired. Please login again.";

/// Navigation capability invoked by the expiry handler.
///
/// The embedding shell decides what "navigate" means (route change, window
/// redirect); tests assert on the intent instead of a real browser context.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str, notice: Option<&str>);
}

/// Fallback navigator that only records the intent in the log. Used by
/// headless embeddings and as a safe default.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str, notice: Option<&str>) {
        tracing::info!(path, notice, "navigation requested");
    }
}
