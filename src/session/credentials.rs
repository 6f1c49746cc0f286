// src/session/credentials.rs - Credential entry and client-side validation

use crate::infra::errors::ValidationError;

pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignUp,
    LogIn,
}

/// Email, password and (in sign-up mode) the confirmation field.
#[derive(Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirmation: String::new(),
        }
    }

    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.confirmation = confirmation.into();
        self
    }

    /// Email as submitted to the backend.
    pub fn trimmed_email(&self) -> &str {
        self.email.trim()
    }

    pub fn validate(&self, mode: AuthMode) -> Result<(), ValidationError> {
        if self.trimmed_email().is_empty() {
            return Err(ValidationError::BlankEmail);
        }
        if password_units(&self.password) < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_CHARS,
            });
        }
        if mode == AuthMode::SignUp && self.password != self.confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Password length in UTF-16 code units, the unit browser-side forms count in.
fn password_units(password: &str) -> usize {
    password.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_email_rejected() {
        let c = Credentials::new("   ", "password123");
        assert_eq!(c.validate(AuthMode::LogIn), Err(ValidationError::BlankEmail));
    }

    #[test]
    fn test_short_password_rejected_in_both_modes() {
        for pw in ["", "a", "1234567"] {
            let c = Credentials::new("a@b.co", pw).with_confirmation(pw);
            assert!(matches!(
                c.validate(AuthMode::LogIn),
                Err(ValidationError::PasswordTooShort { min: 8 })
            ));
            assert!(matches!(
                c.validate(AuthMode::SignUp),
                Err(ValidationError::PasswordTooShort { min: 8 })
            ));
        }
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        let c = Credentials::new("a@b.co", "😀😀😀😀");
        assert!(c.validate(AuthMode::LogIn).is_ok());
        let c = Credentials::new("a@b.co", "😀😀😀");
        assert_eq!(
            c.validate(AuthMode::LogIn),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        let c = Credentials::new("a@b.co", "ééééééé");
        assert!(c.validate(AuthMode::LogIn).is_err());
    }

    #[test]
    fn test_signup_requires_exact_confirmation() {
        let c = Credentials::new("a@b.co", "password123").with_confirmation("password123 ");
        assert_eq!(
            c.validate(AuthMode::SignUp),
            Err(ValidationError::PasswordMismatch)
        );
        let c = Credentials::new("a@b.co", "Password123").with_confirmation("password123");
        assert_eq!(
            c.validate(AuthMode::SignUp),
            Err(ValidationError::PasswordMismatch)
        );
        let c = Credentials::new("a@b.co", "password123").with_confirmation("password123");
        assert!(c.validate(AuthMode::SignUp).is_ok());
    }

    #[test]
    fn test_login_ignores_confirmation() {
        let c = Credentials::new(" a@b.co ", "password123");
        assert!(c.validate(AuthMode::LogIn).is_ok());
        assert_eq!(c.trimmed_email(), "a@b.co");
    }

    #[test]
    fn test_debug_redacts_password() {
        let c = Credentials::new("a@b.co", "hunter2hunter2");
        let out = format!("{c:?}");
        assert!(!out.contains("hunter2"));
    }
}
