//! Session manager: token + cached user profile + 24h expiry, plus the
//! route-guard helpers the screens call before rendering.
//!
//! Storage layout (secure store):
//!   auth_token     -> opaque bearer token
//!   user_data      -> JSON-serialized `UserProfile`
//!   session_expiry -> stringified epoch-millisecond integer
//!
//! Writes that belong together (`set_user_data`, `logout`) are only *issued*
//! together; the store gives no multi-key atomicity and nothing is rolled back.

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::api::RemoteApi;
use crate::domain::{Route, UserProfile, UserProfileUpdate};
use crate::error::{CoreError, CoreResult};
use crate::store::KeyValueStore;
use crate::util::Clock;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_DATA_KEY: &str = "user_data";
pub const SESSION_EXPIRY_KEY: &str = "session_expiry";

/// App-store namespace cleared on logout (cached UI state of the signed-in user).
pub const USER_STORAGE_KEY: &str = "user-storage";

const SESSION_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Receives redirect decisions from the route guards. The embedding UI maps
/// these onto its actual navigation stack.
pub trait Navigator: Send + Sync {
    fn replace(&self, route: Route);
}

/// Navigator that drops redirects. For tests and headless embeddings.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn replace(&self, _route: Route) {}
}

pub struct SessionManager {
    secure: Arc<dyn KeyValueStore>,
    app: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    pub fn new(
        secure: Arc<dyn KeyValueStore>,
        app: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { secure, app, navigator, clock }
    }

    // --- Token pass-throughs ---

    #[instrument(level = "debug", skip(self, token))]
    pub async fn set_token(&self, token: &str) -> CoreResult<()> {
        self.secure.set(AUTH_TOKEN_KEY, token).await
    }

    pub async fn get_token(&self) -> CoreResult<Option<String>> {
        self.secure.get(AUTH_TOKEN_KEY).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn remove_token(&self) -> CoreResult<()> {
        self.secure.delete(AUTH_TOKEN_KEY).await
    }

    /// True iff a token is present. Deliberately does NOT check `session_expiry`;
    /// the guards stay cheap and expiry is enforced at `get_user_data` read time.
    pub async fn is_authenticated(&self) -> bool {
        match self.secure.get(AUTH_TOKEN_KEY).await {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(target: "session", error = %e, "token read failed; treating as logged out");
                false
            }
        }
    }

    // --- Route guards (side effect only; no return value consumed) ---

    #[instrument(level = "debug", skip(self))]
    pub async fn require_auth(&self) {
        if !self.is_authenticated().await {
            self.navigator.replace(Route::SignIn);
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn require_guest(&self) {
        if self.is_authenticated().await {
            self.navigator.replace(Route::Home);
        }
    }

    // --- User data + expiry ---

    /// Store the profile and reset the session expiry to now + 24h.
    /// Both writes are issued together; the first failure is reported and the
    /// other write is not rolled back.
    #[instrument(level = "info", skip(self, user), fields(user_id = %user.id))]
    pub async fn set_user_data(&self, user: &UserProfile) -> CoreResult<()> {
        let payload = serde_json::to_string(user)
            .map_err(|e| CoreError::InvalidFormat(format!("user data not serializable: {e}")))?;
        let expiry = (self.clock.now_ms() + SESSION_DURATION_MS).to_string();

        let (user_res, expiry_res) = tokio::join!(
            self.secure.set(USER_DATA_KEY, &payload),
            self.secure.set(SESSION_EXPIRY_KEY, &expiry),
        );
        user_res?;
        expiry_res
    }

    /// Read the cached profile, enforcing expiry: a stale session triggers a
    /// full logout as a side effect before `SessionExpired` is returned.
    #[instrument(level = "info", skip(self))]
    pub async fn get_user_data(&self) -> CoreResult<UserProfile> {
        let (user_res, expiry_res) = tokio::join!(
            self.secure.get(USER_DATA_KEY),
            self.secure.get(SESSION_EXPIRY_KEY),
        );
        let user_raw = user_res?;
        let expiry_raw = expiry_res?;

        if let Some(expiry) = expiry_raw.as_deref().and_then(|s| s.parse::<i64>().ok()) {
            if self.clock.now_ms() > expiry {
                if let Err(e) = self.logout().await {
                    warn!(target: "session", error = %e, "logout during expiry handling failed");
                }
                return Err(CoreError::SessionExpired);
            }
        }

        let raw = user_raw.ok_or_else(|| CoreError::NotFound("No user data found".into()))?;
        serde_json::from_str::<UserProfile>(&raw)
            .map_err(|_| CoreError::InvalidFormat("Invalid user data format".into()))
    }

    /// Merge a partial update over the current profile and persist the result.
    /// Failures from `get_user_data` (expiry, absence, corruption) propagate.
    #[instrument(level = "info", skip(self, updates))]
    pub async fn update_user_data(&self, updates: &UserProfileUpdate) -> CoreResult<UserProfile> {
        let current = self.get_user_data().await?;
        let merged = current.merged(updates);
        let payload = serde_json::to_string(&merged)
            .map_err(|e| CoreError::InvalidFormat(format!("user data not serializable: {e}")))?;
        self.secure.set(USER_DATA_KEY, &payload).await?;
        Ok(merged)
    }

    /// Clear token, profile, expiry, and the app-level `user-storage` namespace.
    /// All clears are issued concurrently; the first failure is reported but
    /// every clear is still attempted.
    #[instrument(level = "info", skip(self))]
    pub async fn logout(&self) -> CoreResult<()> {
        let (token_res, user_res, expiry_res, storage_res) = tokio::join!(
            self.secure.delete(AUTH_TOKEN_KEY),
            self.secure.delete(USER_DATA_KEY),
            self.secure.delete(SESSION_EXPIRY_KEY),
            self.app.delete(USER_STORAGE_KEY),
        );
        token_res?;
        user_res?;
        expiry_res?;
        storage_res
    }

    /// Exchange credentials with the backend and establish the local session
    /// (token + profile + fresh expiry).
    #[instrument(level = "info", skip(self, api, password))]
    pub async fn sign_in(
        &self,
        api: &RemoteApi,
        email: &str,
        password: &str,
    ) -> CoreResult<UserProfile> {
        let (token, user) = api.sign_in(email, password).await?;
        self.set_token(&token).await?;
        self.set_user_data(&user).await?;
        Ok(user)
    }
}
