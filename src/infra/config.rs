// src/infra/config.rs - Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::paths;

/// Environment override for `[backend] base_url`.
pub const BACKEND_URL_ENV: &str = "MVGEN_BACKEND_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Request timeout. Unset means the transport's own behavior applies.
    pub timeout_seconds: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            timeout_seconds: None,
        }
    }
}

/// Paths of the backend routes, relative to `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub signup: String,
    pub login: String,
    pub generate: String,
    /// Must contain the `{id}` placeholder.
    pub stream: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            signup: "/signup".into(),
            login: "/token".into(),
            generate: "/generate".into(),
            stream: "/videos/{id}/stream".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from `path` (or the default location), then apply
    /// `MVGEN_BACKEND_URL` and finally the `--backend` flag.
    pub fn resolve(path: Option<&Path>, backend_flag: Option<String>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.override_base_url(std::env::var(BACKEND_URL_ENV).ok());
        config.override_base_url(backend_flag);
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        if !config.endpoints.stream.contains("{id}") {
            anyhow::bail!(
                "endpoints.stream must contain the {{id}} placeholder, got '{}'",
                config.endpoints.stream
            );
        }
        Ok(config)
    }

    /// Replace the backend base URL when `url` is a non-blank value.
    pub fn override_base_url(&mut self, url: Option<String>) {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.backend.base_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_backend_routes() {
        let c = Config::default();
        assert_eq!(c.backend.base_url, "http://127.0.0.1:8000");
        assert!(c.backend.timeout_seconds.is_none());
        assert_eq!(c.endpoints.signup, "/signup");
        assert_eq!(c.endpoints.login, "/token");
        assert_eq!(c.endpoints.generate, "/generate");
        assert_eq!(c.endpoints.stream, "/videos/{id}/stream");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.endpoints.login, "/token");
    }

    #[test]
    fn test_parse_partial_endpoints() {
        let toml_str = r#"
[backend]
base_url = "https://api.example.com/v1"
timeout_seconds = 120

[endpoints]
login = "/auth/login"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.com/v1");
        assert_eq!(config.backend.timeout_seconds, Some(120));
        assert_eq!(config.endpoints.login, "/auth/login");
        assert_eq!(config.endpoints.signup, "/signup");
    }

    #[test]
    fn test_parse_backend_timeout_only() {
        let config: Config = toml::from_str("[backend]\ntimeout_seconds = 30\n").unwrap();
        assert_eq!(config.backend.timeout_seconds, Some(30));
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_load_rejects_stream_without_placeholder() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[endpoints]\nstream = \"/videos/stream\"").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("{id}"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_flag_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nbase_url = \"http://file:8000\"").unwrap();
        let config =
            Config::resolve(Some(file.path()), Some("http://flag:9000".into())).unwrap();
        assert_eq!(config.backend.base_url, "http://flag:9000");
    }

    #[test]
    fn test_override_base_url_ignores_blank() {
        let mut c = Config::default();
        c.override_base_url(Some("   ".into()));
        assert_eq!(c.backend.base_url, "http://127.0.0.1:8000");
        c.override_base_url(None);
        assert_eq!(c.backend.base_url, "http://127.0.0.1:8000");
        c.override_base_url(Some(" http://10.0.0.5:9000 ".into()));
        assert_eq!(c.backend.base_url, "http://10.0.0.5:9000");
    }
}
