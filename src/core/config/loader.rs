use std::fs;
use std::path::Path;

use tracing::debug;

use super::{ConfigError, ConfigPaths, ShellConfig};
use crate::flags::Flags;

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    /// Reads the config file (if any), then applies command line overrides.
    pub fn load(&self, flags: &Flags) -> Result<ShellConfig, ConfigError> {
        let mut config = match self.paths {
            ConfigPaths::Explicit(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.clone()));
                }
                Self::read(path)?
            }
            ConfigPaths::Default(path) if path.exists() => Self::read(path)?,
            ConfigPaths::Default(_) | ConfigPaths::None => ShellConfig::default(),
        };

        if let Some(timeout) = flags.get_value("timeout") {
            config.timeout_secs = timeout
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("timeout is not a number: {}", timeout)))?;
        }

        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<ShellConfig, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ShellConfig::from_toml_str(&content)
    }
}
