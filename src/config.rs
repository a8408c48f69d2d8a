//! Application configuration loaded from a TOML file.
//!
//! Every field has a default, so an empty or missing file yields a working
//! SQLite-backed setup. Command line flags are applied on top with
//! `AppConfig::apply_overrides`.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "flashcard-match.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub feedback: FeedbackTimings,
    pub window: WindowConfig,
}

/// Where decks and flashcards come from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    Sqlite {
        #[serde(default = "default_db_path")]
        path: PathBuf,
        #[serde(default = "default_true")]
        seed_sample_data: bool,
    },
    Http {
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Sqlite {
            path: default_db_path(),
            seed_sample_data: true,
        }
    }
}

/// Delays for the transient feedback of the matching game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedbackTimings {
    pub message_ms: u64,
    pub wrong_flash_ms: u64,
}

impl Default for FeedbackTimings {
    fn default() -> Self {
        Self {
            message_ms: 1000,
            wrong_flash_ms: 200,
        }
    }
}

impl FeedbackTimings {
    pub fn message(&self) -> Duration {
        Duration::from_millis(self.message_ms)
    }

    pub fn wrong_flash(&self) -> Duration {
        Duration::from_millis(self.wrong_flash_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 700.0,
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("db.sqlite3")
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Applies command line flags on top of the file settings.
    ///
    /// `api` wins over `db`. Switching backend keeps the file's timeout or seed
    /// setting when the file already used that backend kind. `no_seed` only
    /// affects a SQLite backend.
    pub fn apply_overrides(&mut self, api: Option<&str>, db: Option<&Path>, no_seed: bool) {
        if let Some(base_url) = api {
            let timeout_secs = match &self.backend {
                BackendConfig::Http { timeout_secs, .. } => *timeout_secs,
                BackendConfig::Sqlite { .. } => default_timeout_secs(),
            };
            self.backend = BackendConfig::Http {
                base_url: base_url.to_string(),
                timeout_secs,
            };
        } else if let Some(path) = db {
            let seed_sample_data = match &self.backend {
                BackendConfig::Sqlite {
                    seed_sample_data, ..
                } => *seed_sample_data,
                BackendConfig::Http { .. } => default_true(),
            };
            self.backend = BackendConfig::Sqlite {
                path: path.to_path_buf(),
                seed_sample_data,
            };
        }

        if no_seed {
            if let BackendConfig::Sqlite {
                seed_sample_data, ..
            } = &mut self.backend
            {
                *seed_sample_data = false;
            }
        }
    }

    /// Reads `explicit` if given, otherwise the default file when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
