use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPaths {
    /// Given on the command line; must exist.
    Explicit(PathBuf),
    /// The per-user default; silently skipped when absent.
    Default(PathBuf),
    None,
}

impl ConfigPaths {
    pub fn new(explicit: Option<&str>) -> Self {
        match explicit {
            Some(path) => ConfigPaths::Explicit(PathBuf::from(path)),
            None => match dirs::config_dir() {
                Some(dir) => ConfigPaths::Default(Self::default_file(&dir)),
                None => ConfigPaths::None,
            },
        }
    }

    pub fn default_file(config_dir: &Path) -> PathBuf {
        config_dir.join("vessel").join("config.toml")
    }
}
