use std::path::PathBuf;

use serde::Deserialize;

use threadline_types::DEFAULT_REPLIES_LIMIT;

use crate::logging::default_log_path;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    replies_limit: Option<u32>,
}

#[derive(Deserialize, Default)]
struct RuntimeConfig {
    verbose_logging: Option<bool>,
    log_file: Option<PathBuf>,
    outcome_log: Option<PathBuf>,
}

/// Error type for parsing a configuration string.
#[derive(Debug)]
pub struct ConfigError(toml::de::Error);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid config: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    defaults: DefaultsConfig,
    runtime: RuntimeConfig,
}

impl Config {
    /// Embedded defaults, overridden by `~/.config/threadline/config.toml` if present.
    pub fn load() -> Self {
        let mut config = Self::embedded();

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => config.merge(user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        config
    }

    /// Embedded defaults overridden by `contents`.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let user: ConfigFile = toml::from_str(contents).map_err(ConfigError)?;
        let mut config = Self::embedded();
        config.merge(user);
        Ok(config)
    }

    fn embedded() -> Self {
        let base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");
        Config { defaults: base.defaults, runtime: base.runtime }
    }

    fn merge(&mut self, user: ConfigFile) {
        if user.defaults.replies_limit.is_some() {
            self.defaults.replies_limit = user.defaults.replies_limit;
        }
        if user.runtime.verbose_logging.is_some() {
            self.runtime.verbose_logging = user.runtime.verbose_logging;
        }
        if user.runtime.log_file.is_some() {
            self.runtime.log_file = user.runtime.log_file;
        }
        if user.runtime.outcome_log.is_some() {
            self.runtime.outcome_log = user.runtime.outcome_log;
        }
    }

    /// Replies page size for `loadMoreReplies` without an explicit limit (at least 1).
    pub fn replies_limit(&self) -> u32 {
        self.defaults.replies_limit.unwrap_or(DEFAULT_REPLIES_LIMIT).max(1)
    }

    pub fn verbose_logging(&self) -> bool {
        self.runtime.verbose_logging.unwrap_or(false)
    }

    pub fn log_path(&self) -> PathBuf {
        self.runtime.log_file.clone().unwrap_or_else(default_log_path)
    }

    pub fn outcome_log_path(&self) -> Option<&PathBuf> {
        self.runtime.outcome_log.as_ref()
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("threadline").join("config.toml"))
}
