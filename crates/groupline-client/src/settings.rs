//! Persisted client settings.
//!
//! Settings live in a TOML file in the platform config directory. They are
//! read when a session is started; changing them while connected only affects
//! the next connect.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{ConfigError, Endpoint, GroupListPolicy, SessionConfig};

const SETTINGS_FILE: &str = "settings.toml";

/// User-editable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last username used to connect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// How group announcements are applied.
    pub group_list_policy: GroupListPolicy,
    /// Select the first group automatically.
    pub auto_select_first: bool,
    /// Server to connect to.
    pub endpoint: Endpoint,
}

impl Default for Settings {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            username: None,
            group_list_policy: session.group_list_policy,
            auto_select_first: session.auto_select_first,
            endpoint: Endpoint::default(),
        }
    }
}

impl Settings {
    /// Platform settings path, e.g. `~/.config/groupline/settings.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs =
            ProjectDirs::from("org", "groupline", "groupline").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Write to `path` atomically, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write { path: path.to_path_buf(), source };
        let contents = toml::to_string_pretty(self)?;

        let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let mut file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(write_err)?;

        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Session behaviour derived from these settings.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            group_list_policy: self.group_list_policy,
            auto_select_first: self.auto_select_first,
        }
    }
}

/// Settings bound to the file they persist to.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings from `path`, or defaults if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let settings = Settings::load(&path)?;
        Ok(Self { path, settings })
    }

    /// Open the platform settings file.
    pub fn open_default() -> Result<Self, ConfigError> {
        Self::open(Settings::default_path()?)
    }

    /// File backing these settings.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Configured server.
    pub fn endpoint(&self) -> &Endpoint {
        &self.settings.endpoint
    }

    /// Change and persist the server. Takes effect at the next connect.
    pub fn set_endpoint(&mut self, endpoint: Endpoint) -> Result<(), ConfigError> {
        tracing::info!(%endpoint, path = %self.path.display(), "saving endpoint");
        self.settings.endpoint = endpoint;
        self.settings.save(&self.path)
    }

    /// Remember and persist the last username.
    pub fn set_username(&mut self, username: &str) -> Result<(), ConfigError> {
        if self.settings.username.as_deref() == Some(username) {
            return Ok(());
        }
        self.settings.username = Some(username.to_owned());
        self.settings.save(&self.path)
    }

    /// Apply an in-memory override without persisting it.
    pub fn override_with(&mut self, update: impl FnOnce(&mut Settings)) {
        update(&mut self.settings);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let settings = Settings {
            username: Some("alice".into()),
            group_list_policy: GroupListPolicy::Replace,
            auto_select_first: false,
            endpoint: Endpoint::new("chat.internal", 6000).unwrap(),
        };
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "group_list_policy = \"replace\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.group_list_policy, GroupListPolicy::Replace);
        assert_eq!(settings.endpoint, Endpoint::default());
        assert!(settings.auto_select_first);
    }

    #[test]
    fn invalid_port_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[endpoint]\nhost = \"localhost\"\nport = 70000\n").unwrap();

        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn set_endpoint_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        let mut store = SettingsStore::open(&path).unwrap();
        store.set_endpoint(Endpoint::new("10.1.2.3", 7000).unwrap()).unwrap();

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.endpoint().to_string(), "10.1.2.3:7000");
    }

    #[test]
    fn override_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        let mut store = SettingsStore::open(&path).unwrap();
        store.override_with(|s| s.auto_select_first = false);

        assert!(!store.settings().auto_select_first);
        assert!(!path.exists());
    }
}
