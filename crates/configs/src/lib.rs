//! # configs
//!
//! Layered settings for Rusty-Forum hosts: built-in defaults, then an optional
//! `rusty-forum.toml`, then `RUSTY_FORUM__*` environment variables
//! (e.g. `RUSTY_FORUM__FORUM__POPULARITY=score_and_comments`).

use config::{Config, Environment, File};
use rf_core::ForumConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "rusty-forum.toml";
pub const ENV_PREFIX: &str = "RUSTY_FORUM";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub forum: ForumConfig,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory the local blob store writes under.
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./data/forum") }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}

impl Settings {
    /// Reads `.env` (if any), `rusty-forum.toml` (if any) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE), default_environment())
    }

    /// Same layering as [`Settings::load`] with an explicit file and environment source.
    pub fn load_from(file: &Path, env: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(file).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }
}

pub fn default_environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::{PopularityKey, VoteMode};
    use std::collections::HashMap;
    use std::fs;

    fn no_env() -> Environment {
        default_environment().source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.toml"), no_env()).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.forum.storage_key, "forumPosts");
        assert_eq!(settings.storage.data_dir, PathBuf::from("./data/forum"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rusty-forum.toml");
        fs::write(
            &file,
            r#"
[forum]
voting = "like"
require_title = false

[storage]
data_dir = "/var/lib/forum"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&file, no_env()).unwrap();
        assert_eq!(settings.forum.voting, VoteMode::Like);
        assert!(!settings.forum.require_title);
        assert!(settings.forum.require_topic);
        assert_eq!(settings.storage.data_dir, PathBuf::from("/var/lib/forum"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rusty-forum.toml");
        fs::write(&file, "[forum]\npopularity = \"score\"\n").unwrap();

        let env = default_environment().source(Some(HashMap::from([
            (
                "RUSTY_FORUM__FORUM__POPULARITY".to_string(),
                "score_and_comments".to_string(),
            ),
            ("RUSTY_FORUM__FORUM__STORAGE_KEY".to_string(), "debates".to_string()),
        ])));

        let settings = Settings::load_from(&file, env).unwrap();
        assert_eq!(settings.forum.popularity, PopularityKey::ScoreAndComments);
        assert_eq!(settings.forum.storage_key, "debates");
    }
}
