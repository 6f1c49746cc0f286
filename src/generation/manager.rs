// src/generation/manager.rs - Generation request lifecycle
//
// Idle -> Generating -> Idle. A failed call leaves history untouched; a
// successful one prepends the new entry and makes it the current preview.

use std::sync::Arc;

use super::history::{display_timestamp, GenerationRequest, History};
use super::params::{self, ClipDuration, Resolution};
use crate::backend::{Backend, GenerateForm};
use crate::infra::errors::GenerationError;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
}

/// The editable prompt, resolution and duration fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    prompt: String,
    pub resolution: Resolution,
    pub duration: ClipDuration,
}

impl Draft {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt, truncating to the input cap.
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = params::cap_prompt(prompt);
    }
}

/// Resets the state to `Idle` when the in-flight call finishes or its future
/// is dropped.
struct InFlight<'a>(&'a mut GenerationState);

impl<'a> InFlight<'a> {
    fn enter(state: &'a mut GenerationState) -> Self {
        *state = GenerationState::Generating;
        Self(state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = GenerationState::Idle;
    }
}

pub struct GenerationManager {
    backend: Arc<dyn Backend>,
    session: SessionState,
    state: GenerationState,
    draft: Draft,
    preview: Option<String>,
    history: History,
}

impl GenerationManager {
    pub fn new(backend: Arc<dyn Backend>, session: SessionState) -> Self {
        Self {
            backend,
            session,
            state: GenerationState::Idle,
            draft: Draft::default(),
            preview: None,
            history: History::new(),
        }
    }

    pub fn set_session(&mut self, session: SessionState) {
        self.session = session;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Duration, resolution, generate and reset are locked while a request is
    /// outstanding.
    pub fn controls_locked(&self) -> bool {
        self.state == GenerationState::Generating
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Stream reference currently shown as the preview.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_submit(&self) -> bool {
        !self.controls_locked() && params::validate_prompt(self.draft.prompt()).is_ok()
    }

    /// Submit the current draft.
    pub async fn generate(&mut self) -> Result<GenerationRequest, GenerationError> {
        if self.controls_locked() {
            return Err(GenerationError::Busy);
        }
        params::validate_prompt(self.draft.prompt())?;

        let token = match self.session.token() {
            Some(token) => token.to_string(),
            None => {
                tracing::warn!("Generation requested without a session");
                return Err(GenerationError::NoSession);
            }
        };

        let form = GenerateForm {
            prompt: self.draft.prompt().trim().to_string(),
            resolution: self.draft.resolution,
            duration: self.draft.duration,
        };

        self.preview = None;
        let result = {
            let _in_flight = InFlight::enter(&mut self.state);
            self.backend.generate(&form, &token).await
        };
        let response = result.map_err(|e| {
            tracing::warn!(error = %e, "Generation request failed");
            GenerationError::from(e)
        })?;

        if !response.is_success() {
            let message = response
                .message()
                .unwrap_or_else(|| format!("Generation failed (HTTP {})", response.status));
            tracing::warn!(status = response.status, "Generation rejected");
            return Err(GenerationError::ServerRejected(message));
        }

        let id = super::extract_video_id(&response.body).ok_or_else(|| {
            tracing::warn!("Generation response carried no video id");
            GenerationError::MissingId
        })?;

        let entry = GenerationRequest {
            stream_url: Some(self.backend.stream_url(&id)),
            id,
            created_at: display_timestamp(&chrono::Local::now()),
            prompt: form.prompt,
            resolution: form.resolution,
            duration: form.duration,
        };
        tracing::info!(id = %entry.id, "Video generation accepted");

        self.preview = entry.stream_url.clone();
        self.history.record(entry.clone());
        Ok(entry)
    }

    /// Load a history entry back into the draft and show its stream.
    pub fn reuse(&mut self, entry: &GenerationRequest) {
        self.draft.set_prompt(&entry.prompt);
        self.draft.resolution = entry.resolution;
        self.draft.duration = entry.duration;
        self.preview = entry.stream_url.clone();
    }

    /// Restore the draft defaults and clear the preview. History is kept.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockBackend, RawResponse};
    use crate::infra::errors::{TransportError, ValidationError};
    use crate::session::Session;
    use pretty_assertions::assert_eq;

    const PROMPT: &str = "A modern skincare ad, soft studio lighting";

    fn authed() -> SessionState {
        SessionState::Authenticated(Session::bearer("tok-1"))
    }

    fn with_stream_urls(mock: &mut MockBackend) {
        mock.expect_stream_url()
            .returning(|id| format!("http://backend/videos/{id}/stream"));
    }

    fn responding(status: u16, body: &'static str) -> MockBackend {
        let mut mock = MockBackend::new();
        mock.expect_generate()
            .times(1)
            .returning(move |_, _| Ok(RawResponse::new(status, body)));
        with_stream_urls(&mut mock);
        mock
    }

    fn manager(mock: MockBackend, session: SessionState) -> GenerationManager {
        let mut m = GenerationManager::new(Arc::new(mock), session);
        m.draft_mut().set_prompt(PROMPT);
        m
    }

    #[test]
    fn test_can_submit_requires_ten_trimmed_chars() {
        let mut m = GenerationManager::new(Arc::new(MockBackend::new()), authed());
        m.draft_mut().set_prompt("   too short   ");
        assert!(!m.can_submit());
        m.draft_mut().set_prompt("  long enough  ");
        assert!(m.can_submit());
    }

    #[test]
    fn test_can_submit_false_while_generating() {
        let mut m = manager(MockBackend::new(), authed());
        m.state = GenerationState::Generating;
        assert!(!m.can_submit());
        assert!(m.controls_locked());
    }

    #[tokio::test]
    async fn test_generate_success_prepends_entry_and_sets_preview() {
        let mut mock = MockBackend::new();
        mock.expect_generate()
            .withf(|form, token| {
                form.prompt == PROMPT
                    && form.resolution == Resolution::Square1024x1024
                    && form.duration == ClipDuration::Ten
                    && token.to_string() == "tok-1"
            })
            .times(1)
            .returning(|_, _| Ok(RawResponse::new(200, r#"{"id":"v1"}"#)));
        with_stream_urls(&mut mock);

        let mut m = manager(mock, authed());
        m.draft_mut().resolution = Resolution::Square1024x1024;
        m.draft_mut().duration = ClipDuration::Ten;

        let entry = m.generate().await.unwrap();
        assert_eq!(entry.id, "v1");
        assert_eq!(
            entry.stream_url.as_deref(),
            Some("http://backend/videos/v1/stream")
        );
        assert_eq!(m.preview(), Some("http://backend/videos/v1/stream"));
        assert_eq!(m.history().len(), 1);
        assert_eq!(m.history().latest(), Some(&entry));
        assert_eq!(m.state(), GenerationState::Idle);
        assert!(!entry.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_is_sent_trimmed() {
        let mut mock = MockBackend::new();
        mock.expect_generate()
            .withf(|form, _| form.prompt == "padded prompt text")
            .times(1)
            .returning(|_, _| Ok(RawResponse::new(201, r#"{"video_id":"v9"}"#)));
        with_stream_urls(&mut mock);

        let mut m = GenerationManager::new(Arc::new(mock), authed());
        m.draft_mut().set_prompt("   padded prompt text   ");
        let entry = m.generate().await.unwrap();
        assert_eq!(entry.prompt, "padded prompt text");
        assert_eq!(entry.id, "v9");
    }

    #[tokio::test]
    async fn test_two_generations_newest_first() {
        let mut mock = MockBackend::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(RawResponse::new(200, r#"{"id":"first"}"#)));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(RawResponse::new(200, r#"{"videoId":"second"}"#)));
        with_stream_urls(&mut mock);

        let mut m = manager(mock, authed());
        m.generate().await.unwrap();
        m.generate().await.unwrap();

        let ids: Vec<&str> = m.history().all().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_no_session_makes_no_request() {
        let mut mock = MockBackend::new();
        mock.expect_generate().times(0);
        let mut m = manager(mock, SessionState::Anonymous);

        let err = m.generate().await.unwrap_err();
        assert!(matches!(err, GenerationError::NoSession));
        assert!(m.history().is_empty());
        assert_eq!(m.state(), GenerationState::Idle);
    }

    #[tokio::test]
    async fn test_session_swap_after_relogin() {
        let mut mock = MockBackend::new();
        mock.expect_generate()
            .withf(|_, token| token.to_string() == "tok-2")
            .times(1)
            .returning(|_, _| Ok(RawResponse::new(200, r#"{"id":"v2"}"#)));
        with_stream_urls(&mut mock);
        let mut m = manager(mock, authed());

        m.set_session(SessionState::Anonymous);
        assert!(matches!(
            m.generate().await.unwrap_err(),
            GenerationError::NoSession
        ));

        m.set_session(SessionState::Authenticated(Session::bearer("tok-2")));
        let entry = m.generate().await.unwrap();
        assert_eq!(entry.id, "v2");
        assert_eq!(m.history().len(), 1);
    }

    #[tokio::test]
    async fn test_short_prompt_makes_no_request() {
        let mut mock = MockBackend::new();
        mock.expect_generate().times(0);
        let mut m = GenerationManager::new(Arc::new(mock), authed());
        m.draft_mut().set_prompt("tiny");

        let err = m.generate().await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Invalid(ValidationError::PromptTooShort { min: 10 })
        ));
    }

    #[tokio::test]
    async fn test_server_rejection_uses_body_text() {
        let mut m = manager(
            responding(400, r#"{"detail":"Prompt violates content policy"}"#),
            authed(),
        );
        let err = m.generate().await.unwrap_err();
        match err {
            GenerationError::ServerRejected(msg) => {
                assert_eq!(msg, "Prompt violates content policy")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(m.history().is_empty());
        assert_eq!(m.state(), GenerationState::Idle);
    }

    #[tokio::test]
    async fn test_server_rejection_without_body_names_status() {
        let mut m = manager(responding(503, ""), authed());
        let err = m.generate().await.unwrap_err();
        assert_eq!(err.to_string(), "Generation failed (HTTP 503)");
    }

    #[tokio::test]
    async fn test_missing_id_leaves_history_unchanged() {
        let mut m = manager(responding(200, r#"{"status":"queued"}"#), authed());
        let err = m.generate().await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingId));
        assert!(m.history().is_empty());
        assert_eq!(m.preview(), None);
    }

    #[tokio::test]
    async fn test_unparseable_success_body_is_missing_id() {
        let mut m = manager(responding(200, "accepted"), authed());
        assert!(matches!(
            m.generate().await.unwrap_err(),
            GenerationError::MissingId
        ));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut mock = MockBackend::new();
        mock.expect_generate()
            .times(1)
            .returning(|_, _| Err(TransportError::Unreachable("connection refused".into())));
        let mut m = manager(mock, authed());

        let err = m.generate().await.unwrap_err();
        assert!(matches!(err, GenerationError::NetworkOrServerFailure(_)));
        assert_eq!(m.state(), GenerationState::Idle);
        assert!(m.history().is_empty());
    }

    #[tokio::test]
    async fn test_reuse_copies_fields_and_preview() {
        let mut m = manager(responding(200, r#"{"id":"v1"}"#), authed());
        m.draft_mut().resolution = Resolution::Hd1280x720;
        m.draft_mut().duration = ClipDuration::Fifteen;
        let entry = m.generate().await.unwrap();

        m.reset();
        assert_eq!(m.preview(), None);

        m.reuse(&entry);
        assert_eq!(m.draft().prompt(), PROMPT);
        assert_eq!(m.draft().resolution, Resolution::Hd1280x720);
        assert_eq!(m.draft().duration, ClipDuration::Fifteen);
        assert_eq!(m.preview(), entry.stream_url.as_deref());
        assert_eq!(m.history().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults_and_keeps_history() {
        let mut m = manager(responding(200, r#"{"id":"v1"}"#), authed());
        m.draft_mut().resolution = Resolution::Vertical1080x1920;
        m.draft_mut().duration = ClipDuration::Fifteen;
        m.generate().await.unwrap();

        m.reset();
        assert_eq!(m.draft().prompt(), "");
        assert_eq!(m.draft().resolution, Resolution::FullHd1920x1080);
        assert_eq!(m.draft().duration, ClipDuration::Five);
        assert_eq!(m.preview(), None);
        assert_eq!(m.history().len(), 1);
    }

    #[test]
    fn test_set_prompt_caps_length() {
        let mut draft = Draft::default();
        draft.set_prompt(&"x".repeat(1200));
        assert_eq!(draft.prompt().chars().count(), params::MAX_PROMPT_CHARS);
    }
}
