// src/backend/http.rs - reqwest implementation of the backend seam

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use url::Url;

use super::{Backend, GenerateForm, RawResponse};
use crate::infra::config::{Config, EndpointsConfig};
use crate::infra::errors::{GenerationError, TransportError};

pub struct HttpBackend {
    base_url: Url,
    endpoints: EndpointsConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.backend.base_url)
            .map_err(|_| TransportError::InvalidUrl(config.backend.base_url.clone()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl(config.backend.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.backend.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        Ok(Self {
            base_url,
            endpoints: config.endpoints.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join a route onto the base URL, keeping any path prefix the base carries.
    fn endpoint(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }

    async fn post_credentials(
        &self,
        route: &str,
        email: &str,
        password: &str,
    ) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(route);
        tracing::debug!(%url, "POST credentials");
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        read_response(resp).await
    }

    /// Stream a video to `destination`, returning the number of bytes written.
    pub async fn download(
        &self,
        stream_url: &str,
        token: Option<&str>,
        destination: &Path,
    ) -> Result<u64, GenerationError> {
        tracing::debug!(url = %stream_url, "GET video stream");
        let mut request = self.client.get(stream_url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let raw = read_response(resp).await?;
            return Err(GenerationError::ServerRejected(raw.message().unwrap_or_else(
                || format!("Download failed (HTTP {})", status.as_u16()),
            )));
        }

        let mut file = tokio::fs::File::create(destination).await.map_err(|e| {
            GenerationError::NetworkOrServerFailure(format!(
                "Cannot create {}: {e}",
                destination.display()
            ))
        })?;

        match write_body(resp, &mut file, destination).await {
            Ok(written) => {
                tracing::info!(bytes = written, path = %destination.display(), "Video downloaded");
                Ok(written)
            }
            Err(e) => {
                drop(file);
                if let Err(rm) = tokio::fs::remove_file(destination).await {
                    tracing::warn!(path = %destination.display(), "Cannot remove partial download: {rm}");
                }
                Err(e)
            }
        }
    }
}

async fn write_body(
    resp: reqwest::Response,
    file: &mut tokio::fs::File,
    destination: &Path,
) -> Result<u64, GenerationError> {
    let mut written: u64 = 0;
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| TransportError::Body(e.to_string()))?;
        file.write_all(&chunk).await.map_err(|e| {
            GenerationError::NetworkOrServerFailure(format!(
                "Cannot write {}: {e}",
                destination.display()
            ))
        })?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|e| GenerationError::NetworkOrServerFailure(e.to_string()))?;
    Ok(written)
}

async fn read_response(resp: reqwest::Response) -> Result<RawResponse, TransportError> {
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| TransportError::Body(e.to_string()))?;
    Ok(RawResponse { status, body })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<RawResponse, TransportError> {
        self.post_credentials(&self.endpoints.signup, email, password)
            .await
    }

    async fn log_in(&self, email: &str, password: &str) -> Result<RawResponse, TransportError> {
        self.post_credentials(&self.endpoints.login, email, password)
            .await
    }

    async fn generate(
        &self,
        form: &GenerateForm,
        token: &str,
    ) -> Result<RawResponse, TransportError> {
        let url = self.endpoint(&self.endpoints.generate);
        tracing::debug!(%url, resolution = %form.resolution, duration = form.duration.seconds(), "POST generate");

        let multipart = form
            .fields()
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |acc, (name, value)| {
                acc.text(name, value)
            });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(multipart)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        read_response(resp).await
    }

    /// Each template segment is pushed as a path segment, so the id is
    /// percent-encoded and cannot escape its segment.
    fn stream_url(&self, video_id: &str) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            for part in self.endpoints.stream.split('/').filter(|p| !p.is_empty()) {
                segments.push(&part.replace("{id}", video_id));
            }
        }
        url.to_string()
    }
}
