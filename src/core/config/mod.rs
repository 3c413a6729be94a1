use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

mod loader;
mod paths;

use crate::input::{Tokenizer, DEFAULT_MAX_LINE_LEN, DEFAULT_MAX_TOKENS};
use crate::process::TimeoutAction;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 20;

/// Runtime settings. Every key is optional in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Seconds an external foreground command may run.
    pub timeout_secs: u64,
    /// What an expired deadline terminates.
    pub timeout_action: TimeoutAction,
    /// Token slots per line, one of which is reserved.
    pub max_tokens: usize,
    /// Line buffer size in bytes, one of which is reserved.
    pub max_line_len: usize,
    /// How often the foreground wait polls the child.
    pub poll_interval_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timeout_action: TimeoutAction::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ShellConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ShellConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        if self.max_tokens < 2 {
            return Err(ConfigError::Invalid("max_tokens must be at least 2".into()));
        }
        if self.max_line_len < 2 {
            return Err(ConfigError::Invalid("max_line_len must be at least 2".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.max_tokens, self.max_line_len)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
