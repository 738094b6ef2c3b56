use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::cache::CacheConfig;
use crate::core::engine::EngineConfig;
use crate::core::resolver::{ResolverConfig, SenseConfig};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lexicon: LexiconConfig,
    pub resolver: ResolverConfig,
    pub senses: SenseConfig,
    pub cache: CacheConfig,
}

/// Where the lexicon and its side files live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Feed loaded when none is given on the command line.
    pub feed_path: Option<PathBuf>,
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// How a configuration load went.
///
/// Loading happens before logging is initialized (the log directory comes
/// from the config), so the outcome is kept and reported afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, error: String },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => log::info!("Loaded config from {}", path.display()),
            ConfigSource::Missing(path) => {
                log::debug!("No config file at {}, using defaults", path.display())
            }
            ConfigSource::Invalid { path, error } => log::warn!(
                "Failed to parse config at {}: {error}, using defaults",
                path.display()
            ),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/wordlens/config.toml`.
    /// Falls back to `Default` if the file is missing or unparseable.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallback.
    /// Nothing is logged here; see [`ConfigSource::log`].
    pub fn load_from(config_path: &Path) -> (Self, ConfigSource) {
        let path = config_path.to_path_buf();
        let Ok(contents) = std::fs::read_to_string(config_path) else {
            return (Self::default(), ConfigSource::Missing(path));
        };
        match toml::from_str(&contents) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => (
                Self::default(),
                ConfigSource::Invalid {
                    path,
                    error: e.to_string(),
                },
            ),
        }
    }

    /// The engine-facing part of the configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            resolver: self.resolver,
            senses: self.senses,
            cache: self.cache,
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.lexicon.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("wordlens"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("wordlens").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
