// src/session/store.rs - Durable key/value storage for the session token
//
// The file store keeps a flat JSON object on disk (chmod 600 on Unix),
// written atomically through a temp file.

use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::infra::paths;

/// Client-side key/value storage. Multi-key writes and removals are applied
/// together.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()>;

    fn remove_all(&mut self, keys: &[&str]) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    entries: HashMap<String, String>,
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileTokenStore {
    /// Open the store at the default location (`session.json` in the config dir).
    pub fn open_default() -> Result<Self> {
        Self::open(&paths::session_file_path())
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }
        self.save()
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let before = self.entries.len();
        for key in keys {
            self.entries.remove(*key);
        }
        if self.entries.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        if self.entries.len() != before {
            self.save()?;
        }
        Ok(())
    }
}
