//! Session store
//!
//! Single source of truth for who is logged in and which credential
//! authorizes requests. [`SessionStore::restore`], [`SessionStore::login`]
//! and [`SessionStore::logout`] are the only mutators; each keeps three
//! things in step: the in-memory session, the persisted `user`/`token` keys,
//! and the bearer binding of the API client.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::UserInfo;
use thiserror::Error;

use crate::http::RestaurantApi;
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use crate::ClientError;

const LOGIN_FAILED: &str = "Login failed";

/// Login failure with a message the UI can show as-is
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LoginFailure {
    pub message: String,
    #[source]
    pub cause: ClientError,
}

impl LoginFailure {
    fn from_error(cause: ClientError) -> Self {
        Self {
            message: cause.user_message(LOGIN_FAILED),
            cause,
        }
    }
}

/// Authentication state as seen by the route guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Session data held in memory during the process lifetime
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// Bearer token, absent for server-side session deployments
    pub token: Option<String>,
    /// Current user information after login
    pub user: Option<UserInfo>,
}

impl SessionData {
    pub fn set_login(&mut self, token: Option<String>, user: UserInfo) {
        self.token = token;
        self.user = Some(user);
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Process-wide session store
pub struct SessionStore {
    api: Arc<dyn RestaurantApi>,
    storage: Arc<dyn SessionStorage>,
    data: RwLock<SessionData>,
}

impl SessionStore {
    /// Anonymous store; call [`restore`](Self::restore) to pick up a persisted session
    pub fn new(api: Arc<dyn RestaurantApi>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            api,
            storage,
            data: RwLock::new(SessionData::default()),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.data.read().user.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.data.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.data.read().token.clone()
    }

    /// Display name of the logged-in user
    pub fn user_name(&self) -> Option<String> {
        self.data.read().user.as_ref().map(|u| u.name.clone())
    }

    /// Re-establish a persisted session at startup
    ///
    /// Only a session with both keys present is restored. Anything else,
    /// including unreadable or corrupt state, leaves the store anonymous.
    pub fn restore(&self) -> SessionState {
        let token = self.read_key(TOKEN_KEY);
        let user_json = self.read_key(USER_KEY);

        let (Some(token), Some(user_json)) = (token, user_json) else {
            tracing::debug!("No persisted session");
            self.data.write().clear();
            return SessionState::Anonymous;
        };

        let user: UserInfo = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Persisted user is corrupt, discarding session: {}", e);
                self.remove_key(TOKEN_KEY);
                self.remove_key(USER_KEY);
                self.data.write().clear();
                return SessionState::Anonymous;
            }
        };

        tracing::info!(user_id = user.id, "Restored persisted session");
        self.api.set_token(Some(token.clone()));
        self.data.write().set_login(Some(token), user);
        SessionState::Authenticated
    }

    /// Log in with email and password
    ///
    /// A response without a user identity is a failure even on HTTP 200.
    /// The persisted token and the API binding follow the response: set when
    /// it carries an `access_token`, cleared when it does not.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo, LoginFailure> {
        tracing::debug!(email, "Login attempt");

        let response = self.api.login(email, password).await.map_err(|e| {
            tracing::error!("Login request failed: {}", e);
            LoginFailure::from_error(e)
        })?;

        let Some(user) = response.user else {
            tracing::error!("No user in login response");
            return Err(LoginFailure {
                message: LOGIN_FAILED.to_string(),
                cause: ClientError::Auth("No user in response".into()),
            });
        };

        let user_json = serde_json::to_string(&user).map_err(|e| LoginFailure {
            message: LOGIN_FAILED.to_string(),
            cause: e.into(),
        })?;

        match &response.access_token {
            Some(token) => {
                self.write_key(TOKEN_KEY, token);
                self.api.set_token(Some(token.clone()));
            }
            None => {
                self.remove_key(TOKEN_KEY);
                self.api.set_token(None);
            }
        }
        self.write_key(USER_KEY, &user_json);

        tracing::info!(
            user_id = user.id,
            role = %user.role,
            bearer = response.access_token.is_some(),
            "Login successful"
        );
        self.data
            .write()
            .set_login(response.access_token, user.clone());
        Ok(user)
    }

    /// Clear the session everywhere; safe to call when already anonymous
    pub fn logout(&self) {
        self.remove_key(TOKEN_KEY);
        self.remove_key(USER_KEY);
        self.api.set_token(None);

        let previous = {
            let mut data = self.data.write();
            let user = data.user.take();
            data.clear();
            user
        };
        match previous {
            Some(user) => tracing::info!(user_id = user.id, "Logged out"),
            None => tracing::debug!("Logout without active session"),
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, "Failed to read session storage: {}", e);
                None
            }
        }
    }

    fn write_key(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key, "Failed to persist session: {}", e);
        }
    }

    fn remove_key(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            tracing::warn!(key, "Failed to clear session storage: {}", e);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .finish()
    }
}
