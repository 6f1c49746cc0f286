// src/backend/mod.rs - Transport seam between the managers and the HTTP backend
//
// Implementations only move bytes. Status codes and bodies are handed back
// raw so that the session and generation managers decide what a response means.

pub mod http;

use async_trait::async_trait;

use crate::generation::params::{ClipDuration, Resolution};
use crate::infra::errors::TransportError;

pub use http::HttpBackend;

/// Status code and body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable text the server sent back, if any.
    ///
    /// JSON bodies carrying a string `detail` or `message` field yield that
    /// field; any other non-blank body is returned trimmed.
    pub fn message(&self) -> Option<String> {
        let text = self.body.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(text)
        {
            for key in ["detail", "message"] {
                if let Some(msg) = map.get(key).and_then(|v| v.as_str()) {
                    let msg = msg.trim();
                    if !msg.is_empty() {
                        return Some(msg.to_string());
                    }
                }
            }
        }
        Some(text.to_string())
    }
}

/// Fields of one multipart generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateForm {
    pub prompt: String,
    pub resolution: Resolution,
    pub duration: ClipDuration,
}

impl GenerateForm {
    /// Multipart field name/value pairs in submission order.
    pub fn fields(&self) -> [(&'static str, String); 3] {
        [
            ("prompt", self.prompt.clone()),
            ("resolution", self.resolution.to_string()),
            ("duration", self.duration.seconds().to_string()),
        ]
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST` the credentials to the sign-up route.
    async fn sign_up(&self, email: &str, password: &str) -> Result<RawResponse, TransportError>;

    /// `POST` the credentials to the login route.
    async fn log_in(&self, email: &str, password: &str) -> Result<RawResponse, TransportError>;

    /// `POST` a multipart generation request with `Authorization: Bearer <token>`.
    async fn generate(
        &self,
        form: &GenerateForm,
        token: &str,
    ) -> Result<RawResponse, TransportError>;

    /// Playable stream reference for a server-assigned video id.
    fn stream_url(&self, video_id: &str) -> String;
}
