//! Auth session store.
//!
//! Lifecycle: `Unknown (is_loading) -> Authenticated | Unauthenticated`.
//! Only [`AuthStore::logout`] leaves `Authenticated`; only a successful
//! login or register leaves `Unauthenticated`.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::keys;
use crate::api::AuthClient;
use crate::error::AuthError;
use crate::models::{AuthSession, User};
use crate::traits::SecureStore;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// True during a pending auth operation and before the session check.
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            is_loading: true,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// Outcome of the cold-start check; `None` means signed out.
    Restored(Option<AuthSession>),
    Started,
    SignedIn(AuthSession),
    Failed,
    SignedOut,
}

pub fn reduce(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::Restored(Some(session)) | AuthAction::SignedIn(session) => {
            state.user = Some(session.user);
            state.token = Some(session.token);
            state.is_loading = false;
        }
        AuthAction::Restored(None) | AuthAction::SignedOut => {
            state.user = None;
            state.token = None;
            state.is_loading = false;
        }
        AuthAction::Started => state.is_loading = true,
        AuthAction::Failed => state.is_loading = false,
    }
}

pub struct AuthStore {
    client: AuthClient,
    storage: Arc<dyn SecureStore>,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    pub fn new(client: AuthClient, storage: Arc<dyn SecureStore>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            client,
            storage,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    fn dispatch(&self, action: AuthAction) {
        self.state.send_modify(|state| reduce(state, action));
    }

    /// Restore the persisted session. Call once at startup.
    ///
    /// Missing, unreadable or corrupt entries all resolve to signed out.
    pub async fn restore_session(&self) {
        let token = self.read_key(keys::AUTH_TOKEN).await;
        let user = self.read_key(keys::USER).await;

        let session = match (token, user) {
            (Some(token), Some(raw_user)) => match serde_json::from_str::<User>(&raw_user) {
                Ok(user) => Some(AuthSession { user, token }),
                Err(e) => {
                    warn!(error = %e, "Discarding corrupt persisted user");
                    None
                }
            },
            _ => None,
        };

        match &session {
            Some(s) => info!(user_id = %s.user.id, "Restored session"),
            None => debug!("No persisted session"),
        }
        self.dispatch(AuthAction::Restored(session));
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read secure store");
                None
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.dispatch(AuthAction::Started);

        match self.client.login(email, password).await {
            Ok(Some(session)) => Ok(self.sign_in(session).await),
            Ok(None) => {
                info!("Login rejected: no matching user");
                self.dispatch(AuthAction::Failed);
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => {
                warn!(error = %e, "Login request failed");
                self.dispatch(AuthAction::Failed);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError> {
        self.dispatch(AuthAction::Started);

        match self.client.register(email, password, name).await {
            Ok(session) => Ok(self.sign_in(session).await),
            Err(source) => {
                warn!(error = %source, "Registration failed");
                self.dispatch(AuthAction::Failed);
                Err(AuthError::RegistrationFailed { source })
            }
        }
    }

    async fn sign_in(&self, session: AuthSession) -> User {
        self.persist(&session).await;
        info!(user_id = %session.user.id, "Signed in");
        let user = session.user.clone();
        self.dispatch(AuthAction::SignedIn(session));
        user
    }

    /// Best-effort: a failed write leaves the session valid in memory only.
    async fn persist(&self, session: &AuthSession) {
        if let Err(e) = self.storage.set(keys::AUTH_TOKEN, &session.token).await {
            warn!(error = %e, "Failed to persist auth token");
        }
        match serde_json::to_string(&session.user) {
            Ok(user) => {
                if let Err(e) = self.storage.set(keys::USER, &user).await {
                    warn!(error = %e, "Failed to persist user");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize user"),
        }
    }

    /// Clear persisted credentials and sign out. Never fails.
    pub async fn logout(&self) {
        for key in [keys::AUTH_TOKEN, keys::USER] {
            if let Err(e) = self.storage.remove(key).await {
                warn!(key, error = %e, "Failed to remove persisted credential");
            }
        }
        self.dispatch(AuthAction::SignedOut);
        info!("Signed out");
    }
}
