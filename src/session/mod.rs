// src/session/mod.rs - Authentication state and its persistence

pub mod credentials;
pub mod manager;
pub mod store;
pub mod token;

pub use credentials::{AuthMode, Credentials};
pub use manager::{AuthState, SessionManager};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Store key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Store key of the token scheme.
pub const TOKEN_TYPE_KEY: &str = "token_type";
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// An authenticated identity, represented by its persisted bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub token_type: String,
}

impl Session {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: DEFAULT_TOKEN_TYPE.into(),
        }
    }

    /// Read the session back from `store`. A missing or empty token means
    /// there is no session.
    pub fn load(store: &dyn TokenStore) -> Option<Self> {
        let token = store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())?;
        let token_type = store
            .get(TOKEN_TYPE_KEY)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.into());
        Some(Self { token, token_type })
    }
}

/// Session value handed to the generation manager.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated(s) if !s.token.is_empty() => Some(&s.token),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        session.map_or(SessionState::Anonymous, SessionState::Authenticated)
    }
}
