// src/infra/errors.rs - Error types for mvgen

use thiserror::Error;

/// Client-side validation failures. These block a submission before any
/// request is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email is required")]
    BlankEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Prompt must be at least {min} characters")]
    PromptTooShort { min: usize },

    #[error("Unsupported resolution '{0}' (expected 1920x1080, 1280x720, 1080x1920 or 1024x1024)")]
    UnsupportedResolution(String),

    #[error("Unsupported duration '{0}' (expected 5, 10 or 15 seconds)")]
    UnsupportedDuration(String),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Another sign-in request is already in progress")]
    Busy,

    #[error("{0}")]
    NetworkOrServerFailure(String),

    #[error("Login succeeded but no access token was returned.")]
    MissingToken,

    #[error("Could not update the session store: {0}")]
    Storage(String),
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("A video is already being generated")]
    Busy,

    #[error("Not logged in. Run `mvgen login` first.")]
    NoSession,

    #[error("{0}")]
    ServerRejected(String),

    #[error("Backend response did not include a video id")]
    MissingId,

    #[error("{0}")]
    NetworkOrServerFailure(String),
}

/// Failures of the HTTP transport itself. Response bodies are never
/// interpreted at this layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Cannot reach backend: {0}")]
    Unreachable(String),

    #[error("Invalid backend URL '{0}'")]
    InvalidUrl(String),

    #[error("Failed to read backend response: {0}")]
    Body(String),
}

impl From<TransportError> for AuthError {
    fn from(e: TransportError) -> Self {
        AuthError::NetworkOrServerFailure(e.to_string())
    }
}

impl From<TransportError> for GenerationError {
    fn from(e: TransportError) -> Self {
        GenerationError::NetworkOrServerFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_name_the_limit() {
        assert_eq!(
            ValidationError::PasswordTooShort { min: 8 }.to_string(),
            "Password must be at least 8 characters"
        );
        assert_eq!(
            ValidationError::PromptTooShort { min: 10 }.to_string(),
            "Prompt must be at least 10 characters"
        );
    }

    #[test]
    fn test_transport_error_becomes_network_failure() {
        let auth: AuthError = TransportError::Unreachable("connection refused".into()).into();
        assert!(matches!(auth, AuthError::NetworkOrServerFailure(ref m) if m.contains("connection refused")));

        let generation: GenerationError = TransportError::Body("eof".into()).into();
        assert!(matches!(generation, GenerationError::NetworkOrServerFailure(ref m) if m.contains("eof")));
    }

    #[test]
    fn test_server_message_passes_through_verbatim() {
        let e = GenerationError::ServerRejected("Prompt violates policy".into());
        assert_eq!(e.to_string(), "Prompt violates policy");
    }
}
