use serde::{Deserialize, Serialize};
use serde_json::Value;
use vita_session::UserProfile;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Typed calls against the `/auth` endpoints.
///
/// Login and registration persist the resulting session; profile reads and
/// updates overwrite the stored profile wholesale.
#[derive(Clone)]
pub struct IdentityClient {
    api: ApiClient,
}

impl IdentityClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sign in, persist the session, and return the fetched profile.
    ///
    /// The sign-in call itself is unauthenticated: wrong credentials come
    /// back as a plain failure carrying the backend's `detail` message,
    /// with no session clear and no redirect, matching the login page.
    /// The token is persisted before the profile fetch; a profile fetch
    /// that fails non-fatally leaves the session signed in with an empty
    /// profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .api
            .request("/auth/login", Self::login_options(email, password)?)
            .await?;
        if !response.is_success() {
            return Err(response.into_error("Login failed"));
        }
        let token: TokenResponse = response.json()?;

        self.api
            .store()
            .set_session(&token.access_token, &UserProfile::default())?;

        let response = self.api.get("/auth/me").await?;
        if !response.is_success() {
            tracing::warn!(status = %response.status, "profile fetch after login failed");
            return Ok(UserProfile::default());
        }
        let profile: UserProfile = response.json()?;
        self.api.store().set_session(&token.access_token, &profile)?;

        tracing::debug!(name = profile.name(), "signed in");
        Ok(profile)
    }

    /// Create an account and sign straight in, as the registration page
    /// does. Returns the created profile.
    pub async fn register(&self, registration: &UserProfile) -> Result<UserProfile, ApiError> {
        let response = self
            .api
            .request(
                "/auth/register",
                RequestOptions::post()
                    .json_body(registration)?
                    .unauthenticated(),
            )
            .await?;
        if !response.is_success() {
            return Err(response.into_error("Registration failed"));
        }
        let created: UserProfile = response.json()?;

        let email = registration.0.get("email").and_then(Value::as_str);
        let password = registration.0.get("password").and_then(Value::as_str);
        if let (Some(email), Some(password)) = (email, password) {
            let response = self
                .api
                .request("/auth/login", Self::login_options(email, password)?)
                .await?;
            if response.is_success() {
                let token: TokenResponse = response.json()?;
                self.api.store().set_session(&token.access_token, &created)?;
            } else {
                tracing::warn!(status = %response.status, "sign-in after registration failed");
            }
        }

        Ok(created)
    }

    /// Fetch the current profile and persist it wholesale.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let response = self.api.get("/auth/me").await?;
        if !response.is_success() {
            return Err(response.into_error("Failed to fetch profile"));
        }
        let profile: UserProfile = response.json()?;
        self.persist_profile(&profile)?;
        Ok(profile)
    }

    /// Update the profile; the response becomes the new persisted profile.
    pub async fn update_me(&self, profile: &UserProfile) -> Result<UserProfile, ApiError> {
        let response = self.api.put_json("/auth/me", profile).await?;
        if !response.is_success() {
            return Err(response.into_error("Failed to update profile"));
        }
        let updated: UserProfile = response.json()?;
        self.persist_profile(&updated)?;
        Ok(updated)
    }

    /// Sign out locally. Purely a store mutation; the backend holds no
    /// session state to invalidate.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.api.store().clear_session()?;
        Ok(())
    }

    fn login_options(email: &str, password: &str) -> Result<RequestOptions, ApiError> {
        Ok(RequestOptions::post()
            .json_body(&LoginRequest { email, password })?
            .unauthenticated())
    }

    fn persist_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        // The call just succeeded with bearer auth, so a token is present.
        if let Some(token) = self.api.store().token() {
            self.api.store().set_session(&token, profile)?;
        }
        Ok(())
    }
}
