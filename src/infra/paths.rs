// src/infra/paths.rs - Config and session file locations
//
// MVGEN_HOME overrides everything; otherwise files live under ~/.mvgen/.

use std::path::PathBuf;

fn mvgen_home() -> Option<PathBuf> {
    std::env::var_os("MVGEN_HOME").map(PathBuf::from)
}

/// Configuration directory: $MVGEN_HOME/ or ~/.mvgen/
pub fn config_dir() -> PathBuf {
    if let Some(home) = mvgen_home() {
        return home;
    }
    dirs_home().join(".mvgen")
}

/// Home directory, falling back to the working directory when none is known.
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Durable key/value store holding `access_token` and `token_type`.
pub fn session_file_path() -> PathBuf {
    config_dir().join("session.json")
}
