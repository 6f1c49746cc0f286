// src/session/manager.rs - Sign-up, login and logout lifecycle
//
// Credentials are validated before any request is built. A login only counts
// once a non-empty token has been extracted and written to the store.

use std::sync::Arc;

use super::credentials::{AuthMode, Credentials};
use super::store::TokenStore;
use super::token::{extract_token, extract_token_type};
use super::{Session, SessionState, ACCESS_TOKEN_KEY, TOKEN_TYPE_KEY};
use crate::backend::{Backend, RawResponse};
use crate::infra::errors::AuthError;

const GENERIC_FAILURE: &str = "Something went wrong.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    Submitting,
}

struct Submitting<'a>(&'a mut AuthState);

impl<'a> Submitting<'a> {
    fn enter(state: &'a mut AuthState) -> Self {
        *state = AuthState::Submitting;
        Self(state)
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        *self.0 = AuthState::Idle;
    }
}

pub struct SessionManager {
    backend: Arc<dyn Backend>,
    store: Box<dyn TokenStore>,
    mode: AuthMode,
    state: AuthState,
    identity: Option<String>,
    last_error: Option<String>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn Backend>, store: Box<dyn TokenStore>) -> Self {
        Self {
            backend,
            store,
            mode: AuthMode::default(),
            state: AuthState::Idle,
            identity: None,
            last_error: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switch between sign-up and login, dropping any error shown for the
    /// previous mode.
    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.last_error = None;
    }

    /// Message of the most recent failed submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Email of the account that logged in during this process, if any.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Whether the submit action is enabled for `credentials` in the current mode.
    pub fn can_submit(&self, credentials: &Credentials) -> bool {
        self.state == AuthState::Idle && credentials.validate(self.mode).is_ok()
    }

    pub fn is_authenticated(&self) -> bool {
        Session::load(self.store.as_ref()).is_some()
    }

    /// Session value to inject into the generation manager.
    pub fn session_state(&self) -> SessionState {
        Session::load(self.store.as_ref()).into()
    }

    /// Create an account. Success switches the mode to `LogIn` and clears the
    /// confirmation field; no session is created.
    pub async fn sign_up(&mut self, credentials: &mut Credentials) -> Result<(), AuthError> {
        self.last_error = None;
        let result = self.try_sign_up(credentials).await;
        match &result {
            Ok(()) => credentials.confirmation.clear(),
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }

    /// Log in and persist the returned token.
    pub async fn log_in(&mut self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.last_error = None;
        let result = self.try_log_in(credentials).await;
        if let Err(e) = &result {
            self.last_error = Some(e.to_string());
        }
        result
    }

    async fn try_sign_up(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        self.ensure_idle()?;
        credentials.validate(AuthMode::SignUp)?;
        let email = credentials.trimmed_email();

        let response = {
            let _submitting = Submitting::enter(&mut self.state);
            self.backend.sign_up(email, &credentials.password).await
        };
        let response = response.map_err(|e| {
            tracing::warn!(error = %e, "Sign-up request failed");
            AuthError::from(e)
        })?;
        check_success(&response, "Sign-up")?;

        tracing::info!(%email, "Account created");
        self.mode = AuthMode::LogIn;
        Ok(())
    }

    async fn try_log_in(&mut self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.ensure_idle()?;
        credentials.validate(AuthMode::LogIn)?;
        let email = credentials.trimmed_email();

        let response = {
            let _submitting = Submitting::enter(&mut self.state);
            self.backend.log_in(email, &credentials.password).await
        };
        let response = response.map_err(|e| {
            tracing::warn!(error = %e, "Login request failed");
            AuthError::from(e)
        })?;
        check_success(&response, "Login")?;

        let token = extract_token(&response.body).ok_or_else(|| {
            tracing::warn!("Login response carried no access token");
            AuthError::MissingToken
        })?;
        let session = Session {
            token,
            token_type: extract_token_type(&response.body),
        };

        self.store
            .set_all(&[
                (ACCESS_TOKEN_KEY, session.token.as_str()),
                (TOKEN_TYPE_KEY, session.token_type.as_str()),
            ])
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        tracing::info!(%email, "Logged in");
        self.identity = Some(email.to_string());
        Ok(session)
    }

    /// Forget the persisted session. Purely local.
    pub fn log_out(&mut self) -> Result<(), AuthError> {
        self.store
            .remove_all(&[ACCESS_TOKEN_KEY, TOKEN_TYPE_KEY])
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        self.identity = None;
        self.mode = AuthMode::default();
        tracing::info!("Logged out");
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), AuthError> {
        if self.state == AuthState::Submitting {
            return Err(AuthError::Busy);
        }
        Ok(())
    }
}

fn check_success(response: &RawResponse, action: &str) -> Result<(), AuthError> {
    if response.is_success() {
        return Ok(());
    }
    tracing::warn!(status = response.status, "{action} rejected");
    Err(AuthError::NetworkOrServerFailure(
        response
            .message()
            .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
    ))
}
